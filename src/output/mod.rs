mod graph;
mod json;
mod yaml;

pub use graph::GraphOutput;
pub use json::{JsonOutput, host_vars_json, list_document};
pub use yaml::{YamlOutput, inventory_document};

use crate::model::InventoryGraph;
use std::io::Write;

/// Name Ansible gives hosts that belong to no group.
pub const UNGROUPED: &str = "ungrouped";

pub trait OutputFormatter {
    fn format<W: Write>(&self, inventory: &InventoryGraph, writer: &mut W) -> std::io::Result<()>;
}

/// Top-level group names as listed under `all`, `ungrouped` last.
pub fn all_children(inventory: &InventoryGraph) -> Vec<&str> {
    inventory
        .top_level_groups()
        .into_iter()
        .map(|g| g.name.as_str())
        .chain(std::iter::once(UNGROUPED))
        .collect()
}
