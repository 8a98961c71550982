//! Normalization of a decoded workspace export into the typed [`Workspace`] arena.
//!
//! This is the only place that touches loosely-typed JSON. Everything after it
//! works on [`ModelNode`]s addressed by [`NodeId`].

mod raw;

use crate::config::InventoryOptions;
use crate::error::SchemaError;
use crate::model::{Environment, ModelNode, NodeId, NodeKind, Properties, Workspace};
use raw::{RawElement, RawNode};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Environment assigned to root nodes that do not name one.
pub const DEFAULT_ENVIRONMENT: &str = "Default";

/// Which leaf-candidate kinds take part in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafKinds {
    pub infrastructure_nodes: bool,
    pub software_system_instances: bool,
    pub container_instances: bool,
}

impl From<&InventoryOptions> for LeafKinds {
    fn from(options: &InventoryOptions) -> Self {
        Self {
            infrastructure_nodes: options.include_infrastructure_nodes,
            software_system_instances: options.include_software_system_instances,
            container_instances: options.include_container_instances,
        }
    }
}

/// Parse a decoded workspace document.
///
/// Fails without producing anything when `model` or `model.deploymentNodes`
/// is missing or mis-shaped, or when any node is malformed.
pub fn parse_workspace(document: &Value, kinds: LeafKinds) -> Result<Workspace, SchemaError> {
    let root = document
        .as_object()
        .ok_or_else(|| SchemaError::new("$", "workspace document must be a JSON object"))?;

    let model = match root.get("model") {
        Some(Value::Object(model)) => model,
        Some(_) => return Err(SchemaError::new("model", "expected an object")),
        None => return Err(SchemaError::new("model", "missing model root")),
    };

    let deployment_nodes = match model.get("deploymentNodes") {
        Some(Value::Array(nodes)) => nodes,
        Some(_) => return Err(SchemaError::new("model.deploymentNodes", "expected an array")),
        None => {
            return Err(SchemaError::new(
                "model.deploymentNodes",
                "missing deployment node collection",
            ));
        }
    };

    let elements = if kinds.software_system_instances || kinds.container_instances {
        ElementIndex::build(model.get("softwareSystems"))?
    } else {
        ElementIndex::default()
    };

    let mut normalizer = Normalizer {
        kinds,
        elements,
        nodes: Vec::new(),
    };
    let mut environments: Vec<Environment> = Vec::new();

    for (i, value) in deployment_nodes.iter().enumerate() {
        let path = format!("model.deploymentNodes[{}]", i);
        let raw = decode_node(value, &path)?;
        let env_name = raw
            .environment
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let id = normalizer.add_deployment_node(raw, &env_name, None, &path)?;

        match environments.iter_mut().find(|e| e.name == env_name) {
            Some(env) => env.roots.push(id),
            None => environments.push(Environment {
                name: env_name,
                roots: vec![id],
            }),
        }
    }

    let name = root
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string);

    debug!(
        environments = environments.len(),
        nodes = normalizer.nodes.len(),
        "normalized workspace"
    );

    Ok(Workspace::from_parts(name, environments, normalizer.nodes))
}

fn decode_node(value: &Value, path: &str) -> Result<RawNode, SchemaError> {
    if !value.is_object() {
        return Err(SchemaError::new(path, "expected an object"));
    }
    RawNode::deserialize(value).map_err(|e| SchemaError::new(path, e.to_string()))
}

struct Normalizer {
    kinds: LeafKinds,
    elements: ElementIndex,
    nodes: Vec<ModelNode>,
}

impl Normalizer {
    fn add_deployment_node(
        &mut self,
        raw: RawNode,
        environment: &str,
        parent: Option<NodeId>,
        path: &str,
    ) -> Result<NodeId, SchemaError> {
        let id = raw
            .id
            .map(|id| id.into_string())
            .ok_or_else(|| SchemaError::new(path, "deployment node is missing 'id'"))?;
        let name = raw
            .name
            .ok_or_else(|| SchemaError::new(path, "deployment node is missing 'name'"))?;

        let node_id = self.push(ModelNode {
            id,
            name,
            kind: NodeKind::DeploymentNode,
            description: raw.description,
            technology: non_empty(raw.technology),
            tags: raw.tags.map(|t| t.normalize()).unwrap_or_default(),
            properties: Properties::new(match raw.properties {
                Some(props) => props.normalize(path)?,
                None => Vec::new(),
            }),
            environment: environment.to_string(),
            parent,
            children: Vec::new(),
            leaves: Vec::new(),
        });

        let child_values = raw.children.unwrap_or_default();
        let mut children = Vec::with_capacity(child_values.len());
        for (i, value) in child_values.iter().enumerate() {
            let child_path = format!("{}.children[{}]", path, i);
            let child = decode_node(value, &child_path)?;
            children.push(self.add_deployment_node(child, environment, Some(node_id), &child_path)?);
        }

        let mut leaves = Vec::new();
        let groups = [
            (
                self.kinds.infrastructure_nodes,
                NodeKind::InfrastructureNode,
                "infrastructureNodes",
                raw.infrastructure_nodes.unwrap_or_default(),
            ),
            (
                self.kinds.software_system_instances,
                NodeKind::SoftwareSystemInstance,
                "softwareSystemInstances",
                raw.software_system_instances.unwrap_or_default(),
            ),
            (
                self.kinds.container_instances,
                NodeKind::ContainerInstance,
                "containerInstances",
                raw.container_instances.unwrap_or_default(),
            ),
        ];
        for (enabled, kind, key, values) in groups {
            if !enabled {
                continue;
            }
            for (i, value) in values.iter().enumerate() {
                let leaf_path = format!("{}.{}[{}]", path, key, i);
                let leaf = decode_node(value, &leaf_path)?;
                leaves.push(self.add_leaf(leaf, kind, environment, node_id, &leaf_path)?);
            }
        }

        let node = &mut self.nodes[node_id.0];
        node.children = children;
        node.leaves = leaves;

        Ok(node_id)
    }

    fn add_leaf(
        &mut self,
        raw: RawNode,
        kind: NodeKind,
        environment: &str,
        parent: NodeId,
        path: &str,
    ) -> Result<NodeId, SchemaError> {
        let id = raw
            .id
            .map(|id| id.into_string())
            .ok_or_else(|| SchemaError::new(path, format!("{} is missing 'id'", kind)))?;

        let element = match kind {
            NodeKind::SoftwareSystemInstance => raw
                .software_system_id
                .and_then(|r| self.elements.get(&r.into_string())),
            NodeKind::ContainerInstance => raw
                .container_id
                .and_then(|r| self.elements.get(&r.into_string())),
            _ => None,
        };

        let name = raw
            .name
            .filter(|n| !n.is_empty())
            .or_else(|| element.and_then(|e| e.name.clone()))
            .unwrap_or_else(|| id.clone());
        let description = raw
            .description
            .or_else(|| element.and_then(|e| e.description.clone()));
        let technology =
            non_empty(raw.technology).or_else(|| element.and_then(|e| e.technology.clone()));

        Ok(self.push(ModelNode {
            id,
            name,
            kind,
            description,
            technology,
            tags: raw.tags.map(|t| t.normalize()).unwrap_or_default(),
            properties: Properties::new(match raw.properties {
                Some(props) => props.normalize(path)?,
                None => Vec::new(),
            }),
            environment: environment.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            leaves: Vec::new(),
        }))
    }

    fn push(&mut self, node: ModelNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone)]
struct ElementInfo {
    name: Option<String>,
    description: Option<String>,
    technology: Option<String>,
}

/// Software systems and containers by id, for naming deployment instances.
#[derive(Debug, Default)]
struct ElementIndex {
    by_id: HashMap<String, ElementInfo>,
}

impl ElementIndex {
    fn build(systems: Option<&Value>) -> Result<Self, SchemaError> {
        let mut index = Self::default();
        let Some(systems) = systems else {
            return Ok(index);
        };

        let systems = Vec::<RawElement>::deserialize(systems)
            .map_err(|e| SchemaError::new("model.softwareSystems", e.to_string()))?;
        for system in systems {
            for container in system.containers {
                index.insert(container);
            }
            index.insert(RawElement {
                containers: Vec::new(),
                ..system
            });
        }
        Ok(index)
    }

    fn insert(&mut self, element: RawElement) {
        self.by_id.insert(
            element.id.into_string(),
            ElementInfo {
                name: element.name,
                description: element.description,
                technology: non_empty(element.technology),
            },
        );
    }

    fn get(&self, id: &str) -> Option<&ElementInfo> {
        self.by_id.get(id)
    }
}
