use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Host or group variables. Sorted keys keep serialized output stable.
pub type Vars = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Host {
    pub name: String,
    pub vars: Vars,
    /// Groups listing this host directly, in inventory group order.
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub name: String,
    pub hosts: Vec<String>,
    pub children: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub vars: Vars,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hosts: Vec::new(),
            children: Vec::new(),
            vars: Vars::new(),
        }
    }
}

/// Final, immutable result of an inventory build.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryGraph {
    hosts: Vec<Host>,
    groups: Vec<Group>,
    warnings: Vec<String>,
    #[serde(skip)]
    host_index: HashMap<String, usize>,
    #[serde(skip)]
    group_index: HashMap<String, usize>,
}

impl InventoryGraph {
    pub(crate) fn new(hosts: Vec<Host>, groups: Vec<Group>, warnings: Vec<String>) -> Self {
        let host_index = hosts
            .iter()
            .enumerate()
            .map(|(i, h)| (h.name.clone(), i))
            .collect();
        let group_index = groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.name.clone(), i))
            .collect();

        Self {
            hosts,
            groups,
            warnings,
            host_index,
            group_index,
        }
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Non-fatal problems met while building, e.g. identifier fallbacks.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn host(&self, name: &str) -> Option<&Host> {
        self.host_index.get(name).map(|&i| &self.hosts[i])
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.group_index.get(name).map(|&i| &self.groups[i])
    }

    pub fn host_names(&self) -> Vec<&str> {
        self.hosts.iter().map(|h| h.name.as_str()).collect()
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Groups that are nobody's child, in group order.
    pub fn top_level_groups(&self) -> Vec<&Group> {
        let nested: std::collections::HashSet<&str> = self
            .groups
            .iter()
            .flat_map(|g| g.children.iter().map(String::as_str))
            .collect();
        self.groups
            .iter()
            .filter(|g| !nested.contains(g.name.as_str()))
            .collect()
    }

    /// Hosts that belong to no group at all.
    pub fn ungrouped_hosts(&self) -> Vec<&Host> {
        self.hosts.iter().filter(|h| h.groups.is_empty()).collect()
    }
}

impl PartialEq for InventoryGraph {
    fn eq(&self, other: &Self) -> bool {
        self.hosts == other.hosts && self.groups == other.groups && self.warnings == other.warnings
    }
}
