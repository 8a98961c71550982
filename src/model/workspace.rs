use std::fmt;

/// Stable index of a node inside [`Workspace::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    DeploymentNode,
    InfrastructureNode,
    SoftwareSystemInstance,
    ContainerInstance,
}

impl NodeKind {
    /// Leaf candidates can only ever become hosts.
    pub fn is_leaf_candidate(self) -> bool {
        !matches!(self, NodeKind::DeploymentNode)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::DeploymentNode => write!(f, "deployment node"),
            NodeKind::InfrastructureNode => write!(f, "infrastructure node"),
            NodeKind::SoftwareSystemInstance => write!(f, "software system instance"),
            NodeKind::ContainerInstance => write!(f, "container instance"),
        }
    }
}

/// String properties in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(Vec<(String, String)>);

impl Properties {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self(entries)
    }

    /// Last value wins when the export repeats a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One element of the deployment tree: a deployment node or a leaf candidate.
#[derive(Debug, Clone)]
pub struct ModelNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub description: Option<String>,
    pub technology: Option<String>,
    pub tags: Vec<String>,
    pub properties: Properties,
    /// Name of the environment owning the root this node hangs from.
    pub environment: String,
    pub parent: Option<NodeId>,
    /// Child deployment nodes, source order.
    pub children: Vec<NodeId>,
    /// Enabled leaf candidates, in kind order then source order.
    pub leaves: Vec<NodeId>,
}

impl ModelNode {
    pub fn has_descendants(&self) -> bool {
        !self.children.is_empty() || !self.leaves.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub name: String,
    pub roots: Vec<NodeId>,
}

/// Normalized deployment model. Nodes are owned by the arena; every link
/// between them is a [`NodeId`].
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub name: Option<String>,
    pub environments: Vec<Environment>,
    nodes: Vec<ModelNode>,
}

impl Workspace {
    pub(crate) fn from_parts(
        name: Option<String>,
        environments: Vec<Environment>,
        nodes: Vec<ModelNode>,
    ) -> Self {
        Self {
            name,
            environments,
            nodes,
        }
    }

    pub fn node(&self, id: NodeId) -> &ModelNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[ModelNode] {
        &self.nodes
    }

    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.name == name)
    }

    pub fn environment_names(&self) -> Vec<String> {
        self.environments.iter().map(|e| e.name.clone()).collect()
    }

    /// Names of the deployment nodes above `id`, root first.
    pub fn ancestry(&self, id: NodeId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            let node = self.node(parent);
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.reverse();
        names
    }
}
