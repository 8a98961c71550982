//! `ansible-inventory --list` shaped JSON.

use crate::model::{Host, InventoryGraph};
use crate::output::{OutputFormatter, UNGROUPED, all_children};
use serde_json::{Map, Value, json};
use std::io::Write;

pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// The document `ansible-inventory --list` would print for this inventory.
pub fn list_document(inventory: &InventoryGraph) -> Value {
    let mut root = Map::new();

    let hostvars: Map<String, Value> = inventory
        .hosts()
        .iter()
        .map(|h| (h.name.clone(), host_vars_json(h)))
        .collect();
    root.insert("_meta".to_string(), json!({ "hostvars": hostvars }));
    root.insert("all".to_string(), json!({ "children": all_children(inventory) }));

    for group in inventory.groups() {
        let mut entry = Map::new();
        if !group.hosts.is_empty() {
            entry.insert("hosts".to_string(), json!(group.hosts));
        }
        if !group.children.is_empty() {
            entry.insert("children".to_string(), json!(group.children));
        }
        if !group.vars.is_empty() {
            entry.insert("vars".to_string(), json!(group.vars));
        }
        root.insert(group.name.clone(), Value::Object(entry));
    }

    let ungrouped: Vec<&str> = inventory
        .ungrouped_hosts()
        .iter()
        .map(|h| h.name.as_str())
        .collect();
    let mut entry = Map::new();
    if !ungrouped.is_empty() {
        entry.insert("hosts".to_string(), json!(ungrouped));
    }
    root.insert(UNGROUPED.to_string(), Value::Object(entry));

    Value::Object(root)
}

/// A host's variables as a JSON object, as printed by `--host`.
pub fn host_vars_json(host: &Host) -> Value {
    Value::Object(host.vars.clone().into_iter().collect())
}

impl OutputFormatter for JsonOutput {
    fn format<W: Write>(&self, inventory: &InventoryGraph, writer: &mut W) -> std::io::Result<()> {
        let document = list_document(inventory);
        let json = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        }
        .map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)
    }
}
