use crate::model::{Environment, NodeId, Workspace};
use std::collections::HashMap;
use tracing::debug;

/// Property that turns an inner deployment node into a host as well.
pub const FORCE_HOST_PROPERTY: &str = "ansible_force_host";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Host,
    Group,
    /// Forced inner node: a host in its parent's group and the owner of its own.
    HostAndGroup,
}

impl NodeRole {
    pub fn is_host(self) -> bool {
        matches!(self, NodeRole::Host | NodeRole::HostAndGroup)
    }

    pub fn owns_group(self) -> bool {
        matches!(self, NodeRole::Group | NodeRole::HostAndGroup)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedNode {
    pub node: NodeId,
    pub role: NodeRole,
}

/// Roles of every in-scope node, in pre-order traversal order.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub nodes: Vec<ClassifiedNode>,
    roles: HashMap<NodeId, NodeRole>,
}

impl Classification {
    pub fn hosts(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|c| c.role.is_host())
            .map(|c| c.node)
    }

    pub fn group_owners(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|c| c.role.owns_group())
            .map(|c| c.node)
    }

    pub fn role(&self, node: NodeId) -> Option<NodeRole> {
        self.roles.get(&node).copied()
    }

    fn push(&mut self, node: NodeId, role: NodeRole) {
        self.nodes.push(ClassifiedNode { node, role });
        self.roles.insert(node, role);
    }
}

/// Case-insensitive `true`, `1` or `yes`.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

pub fn classify(workspace: &Workspace, environments: &[&Environment]) -> Classification {
    let mut classification = Classification::default();
    for env in environments {
        for &root in &env.roots {
            visit(workspace, root, &mut classification);
        }
    }

    debug!(
        nodes = classification.nodes.len(),
        hosts = classification.hosts().count(),
        "classified deployment tree"
    );
    classification
}

fn visit(workspace: &Workspace, id: NodeId, out: &mut Classification) {
    let node = workspace.node(id);

    let role = if node.kind.is_leaf_candidate() || !node.has_descendants() {
        NodeRole::Host
    } else if node
        .properties
        .get(FORCE_HOST_PROPERTY)
        .is_some_and(is_truthy)
    {
        NodeRole::HostAndGroup
    } else {
        NodeRole::Group
    };
    out.push(id, role);

    for &child in node.children.iter().chain(node.leaves.iter()) {
        visit(workspace, child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{LeafKinds, parse_workspace};
    use serde_json::json;

    fn parse(doc: serde_json::Value) -> Workspace {
        let kinds = LeafKinds {
            infrastructure_nodes: true,
            software_system_instances: false,
            container_instances: false,
        };
        parse_workspace(&doc, kinds).unwrap()
    }

    fn roles(ws: &Workspace) -> Vec<(String, NodeRole)> {
        let envs: Vec<_> = ws.environments.iter().collect();
        classify(ws, &envs)
            .nodes
            .iter()
            .map(|c| (ws.node(c.node).name.clone(), c.role))
            .collect()
    }

    #[test]
    fn test_inner_node_is_group_leaf_is_host() {
        let ws = parse(json!({"model": {"deploymentNodes": [
            {"id": "1", "name": "dc", "children": [{"id": "2", "name": "web"}],
             "infrastructureNodes": [{"id": "3", "name": "lb"}]}
        ]}}));

        assert_eq!(
            roles(&ws),
            vec![
                ("dc".to_string(), NodeRole::Group),
                ("web".to_string(), NodeRole::Host),
                ("lb".to_string(), NodeRole::Host),
            ]
        );
    }

    #[test]
    fn test_forced_inner_node_is_host_and_group() {
        let ws = parse(json!({"model": {"deploymentNodes": [
            {"id": "1", "name": "cluster",
             "properties": [{"name": "ansible_force_host", "value": "YES"}],
             "children": [{"id": "2", "name": "node-a"}]}
        ]}}));

        assert_eq!(roles(&ws)[0], ("cluster".to_string(), NodeRole::HostAndGroup));
    }

    #[test]
    fn test_force_flag_on_leaf_is_plain_host() {
        let ws = parse(json!({"model": {"deploymentNodes": [
            {"id": "1", "name": "solo", "properties": {"ansible_force_host": "true"}}
        ]}}));

        assert_eq!(roles(&ws), vec![("solo".to_string(), NodeRole::Host)]);
    }

    #[test]
    fn test_falsy_force_flag_is_ignored() {
        let ws = parse(json!({"model": {"deploymentNodes": [
            {"id": "1", "name": "dc", "properties": {"ansible_force_host": "false"},
             "children": [{"id": "2", "name": "web"}]}
        ]}}));

        assert_eq!(roles(&ws)[0].1, NodeRole::Group);
    }

    #[test]
    fn test_truthy_values() {
        for value in ["true", "TRUE", "1", "Yes", " yes "] {
            assert!(is_truthy(value), "{} should be truthy", value);
        }
        for value in ["false", "0", "no", "", "on"] {
            assert!(!is_truthy(value), "{} should not be truthy", value);
        }
    }
}
