//! The four grouping dimensions: environment, hierarchy, tag and technology.
//!
//! Each dimension is built on its own and only the enabled ones contribute.
//! Members are still node ids here; the assembler turns them into host names.

use super::classify::Classification;
use super::sanitize::NameRegistry;
use crate::config::{HierarchyNaming, InventoryOptions};
use crate::error::{GroupDimension, NameCollisionError};
use crate::model::{Environment, NodeId, Workspace};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedGroup {
    pub name: String,
    pub dimension: GroupDimension,
    /// Raw name the group was derived from, before sanitizing.
    pub source: String,
    pub members: Vec<NodeId>,
    pub children: Vec<String>,
}

impl PlannedGroup {
    fn add_member(&mut self, node: NodeId) {
        if !self.members.contains(&node) {
            self.members.push(node);
        }
    }

    fn add_child(&mut self, group: &str) {
        if !self.children.iter().any(|c| c == group) {
            self.children.push(group.to_string());
        }
    }
}

/// Groups of one dimension, in first-appearance order.
struct DimensionGroups {
    registry: NameRegistry,
    groups: Vec<PlannedGroup>,
    index: HashMap<String, usize>,
    dimension: GroupDimension,
}

impl DimensionGroups {
    fn new(dimension: GroupDimension) -> Self {
        Self {
            registry: NameRegistry::new(dimension),
            groups: Vec::new(),
            index: HashMap::new(),
            dimension,
        }
    }

    fn upsert(&mut self, prefix: &str, raw: &str) -> Result<&mut PlannedGroup, NameCollisionError> {
        self.upsert_as(prefix, raw, raw)
    }

    /// Group owned by `claimant` alone; see [`NameRegistry::claim_as`].
    fn upsert_as(
        &mut self,
        prefix: &str,
        raw: &str,
        claimant: &str,
    ) -> Result<&mut PlannedGroup, NameCollisionError> {
        let name = self.registry.claim_as(prefix, raw, claimant)?;
        let idx = match self.index.get(&name) {
            Some(&idx) => idx,
            None => {
                self.groups.push(PlannedGroup {
                    name: name.clone(),
                    dimension: self.dimension,
                    source: raw.to_string(),
                    members: Vec::new(),
                    children: Vec::new(),
                });
                self.index.insert(name, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        Ok(&mut self.groups[idx])
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut PlannedGroup> {
        let idx = *self.index.get(name)?;
        self.groups.get_mut(idx)
    }
}

pub fn build_groups(
    workspace: &Workspace,
    environments: &[&Environment],
    classification: &Classification,
    options: &InventoryOptions,
) -> Result<Vec<PlannedGroup>, NameCollisionError> {
    let mut planned = Vec::new();

    if options.group_by_environment {
        planned.extend(environment_groups(workspace, environments, classification)?);
    }
    if options.group_by_hierarchy {
        planned.extend(hierarchy_groups(workspace, classification, options.hierarchy_group_naming)?);
    }
    if options.group_by_tags {
        planned.extend(tag_groups(workspace, classification, &options.exclude_tags)?);
    }
    if options.group_by_technology {
        planned.extend(technology_groups(workspace, classification)?);
    }

    check_cross_dimension(&planned)?;

    debug!(groups = planned.len(), "built inventory groups");
    Ok(planned)
}

fn environment_groups(
    workspace: &Workspace,
    environments: &[&Environment],
    classification: &Classification,
) -> Result<Vec<PlannedGroup>, NameCollisionError> {
    let mut groups = DimensionGroups::new(GroupDimension::Environment);
    for env in environments {
        let group = groups.upsert("env_", &env.name)?;
        for host in classification.hosts() {
            if workspace.node(host).environment == env.name {
                group.add_member(host);
            }
        }
    }
    Ok(groups.groups)
}

/// Raw hierarchy name of a group-owning node.
fn hierarchy_source(workspace: &Workspace, id: NodeId, naming: HierarchyNaming) -> String {
    let node = workspace.node(id);
    let mut parts = match naming {
        HierarchyNaming::Name => return node.name.clone(),
        HierarchyNaming::Path => Vec::new(),
        HierarchyNaming::EnvironmentPath => vec![node.environment.as_str()],
    };
    parts.extend(workspace.ancestry(id));
    parts.push(node.name.as_str());
    parts.join("_")
}

/// One group per group-owning node, nested exactly like the node tree.
fn hierarchy_groups(
    workspace: &Workspace,
    classification: &Classification,
    naming: HierarchyNaming,
) -> Result<Vec<PlannedGroup>, NameCollisionError> {
    let mut groups = DimensionGroups::new(GroupDimension::Hierarchy);

    // Name every owner first so parents can reference children by name.
    let mut names: HashMap<NodeId, String> = HashMap::new();
    for owner in classification.group_owners() {
        let source = hierarchy_source(workspace, owner, naming);
        let group = groups.upsert_as("", &source, &workspace.node(owner).id)?;
        names.insert(owner, group.name.clone());
    }

    for owner in classification.group_owners() {
        let node = workspace.node(owner);
        let Some(group) = names.get(&owner).and_then(|name| groups.get_mut(name)) else {
            continue;
        };

        for &child in node.children.iter().chain(node.leaves.iter()) {
            let Some(role) = classification.role(child) else {
                continue;
            };
            if role.is_host() {
                group.add_member(child);
            }
            if role.owns_group() {
                if let Some(child_name) = names.get(&child) {
                    group.add_child(child_name);
                }
            }
        }
    }

    Ok(groups.groups)
}

fn tag_groups(
    workspace: &Workspace,
    classification: &Classification,
    exclude: &[String],
) -> Result<Vec<PlannedGroup>, NameCollisionError> {
    let mut groups = DimensionGroups::new(GroupDimension::Tag);
    for host in classification.hosts() {
        for tag in &workspace.node(host).tags {
            if exclude.iter().any(|e| e == tag) {
                continue;
            }
            groups.upsert("tag_", tag)?.add_member(host);
        }
    }
    Ok(groups.groups)
}

fn technology_groups(
    workspace: &Workspace,
    classification: &Classification,
) -> Result<Vec<PlannedGroup>, NameCollisionError> {
    let mut groups = DimensionGroups::new(GroupDimension::Technology);
    for host in classification.hosts() {
        if let Some(technology) = &workspace.node(host).technology {
            groups.upsert("tech_", technology)?.add_member(host);
        }
    }
    Ok(groups.groups)
}

/// A name produced by two dimensions would merge unrelated groups.
fn check_cross_dimension(groups: &[PlannedGroup]) -> Result<(), NameCollisionError> {
    let mut seen: HashMap<&str, &PlannedGroup> = HashMap::new();
    for group in groups {
        if let Some(first) = seen.insert(group.name.as_str(), group) {
            return Err(NameCollisionError {
                dimension: group.dimension,
                group: group.name.clone(),
                first: format!("{} {}", first.dimension, first.source),
                second: format!("{} {}", group.dimension, group.source),
            });
        }
    }
    Ok(())
}
