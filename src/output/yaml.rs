//! Ansible YAML inventory.
//!
//! Host variables are attached once under `all.hosts`; every group is then
//! declared under `all.children` listing its hosts and child groups by name.

use crate::model::InventoryGraph;
use crate::output::OutputFormatter;
use serde_yaml::{Mapping, Value};
use std::io::Write;

pub struct YamlOutput;

impl YamlOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlOutput {
    fn default() -> Self {
        Self::new()
    }
}

fn key(name: &str) -> Value {
    Value::String(name.to_string())
}

fn empty() -> Value {
    Value::Mapping(Mapping::new())
}

fn name_set<'a>(names: impl IntoIterator<Item = &'a String>) -> Value {
    Value::Mapping(names.into_iter().map(|n| (key(n), empty())).collect())
}

pub fn inventory_document(inventory: &InventoryGraph) -> Result<Value, serde_yaml::Error> {
    let mut hosts = Mapping::new();
    for host in inventory.hosts() {
        let vars = if host.vars.is_empty() {
            empty()
        } else {
            serde_yaml::to_value(&host.vars)?
        };
        hosts.insert(key(&host.name), vars);
    }

    let mut children = Mapping::new();
    for group in inventory.groups() {
        let mut entry = Mapping::new();
        if !group.hosts.is_empty() {
            entry.insert(key("hosts"), name_set(&group.hosts));
        }
        if !group.children.is_empty() {
            entry.insert(key("children"), name_set(&group.children));
        }
        if !group.vars.is_empty() {
            entry.insert(key("vars"), serde_yaml::to_value(&group.vars)?);
        }
        children.insert(key(&group.name), Value::Mapping(entry));
    }

    let mut all = Mapping::new();
    if !hosts.is_empty() {
        all.insert(key("hosts"), Value::Mapping(hosts));
    }
    if !children.is_empty() {
        all.insert(key("children"), Value::Mapping(children));
    }

    let mut root = Mapping::new();
    root.insert(key("all"), Value::Mapping(all));
    Ok(Value::Mapping(root))
}

impl OutputFormatter for YamlOutput {
    fn format<W: Write>(&self, inventory: &InventoryGraph, writer: &mut W) -> std::io::Result<()> {
        let yaml = inventory_document(inventory)
            .and_then(|doc| serde_yaml::to_string(&doc))
            .map_err(std::io::Error::other)?;
        write!(writer, "{}", yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InventoryOptions;
    use crate::transform::build_inventory;
    use serde_json::json;

    #[test]
    fn test_yaml_inventory_layout() {
        let doc = json!({"model": {"deploymentNodes": [
            {"id": "1", "name": "site", "environment": "Staging", "children": [
                {"id": "2", "name": "app-01", "properties": {"ansible_port": "2222"}}
            ]}
        ]}});
        let inventory = build_inventory(&doc, &InventoryOptions::default()).unwrap();

        let mut buf = Vec::new();
        YamlOutput::new().format(&inventory, &mut buf).unwrap();
        let parsed: Value = serde_yaml::from_slice(&buf).unwrap();

        let all = &parsed["all"];
        assert_eq!(all["hosts"]["app-01"]["ansible_port"], Value::from("2222"));
        assert_eq!(
            all["children"]["site"]["hosts"]["app-01"],
            Value::Mapping(Mapping::new())
        );
        assert!(all["children"]["env_Staging"]["hosts"]["app-01"].is_mapping());
    }

    #[test]
    fn test_empty_inventory() {
        let doc = json!({"model": {"deploymentNodes": []}});
        let inventory = build_inventory(&doc, &InventoryOptions::default()).unwrap();

        let rendered = inventory_document(&inventory).unwrap();
        assert_eq!(rendered["all"], Value::Mapping(Mapping::new()));
    }
}
