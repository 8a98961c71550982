//! `ansible-inventory --graph` style tree.

use crate::model::{Group, InventoryGraph};
use crate::output::{OutputFormatter, UNGROUPED};
use std::io::Write;

pub struct GraphOutput {
    show_vars: bool,
}

impl GraphOutput {
    pub fn new() -> Self {
        Self { show_vars: false }
    }

    /// Also print each host's variables beneath it.
    pub fn with_vars(mut self, show_vars: bool) -> Self {
        self.show_vars = show_vars;
        self
    }

    fn line<W: Write>(writer: &mut W, depth: usize, text: &str) -> std::io::Result<()> {
        if depth == 0 {
            writeln!(writer, "{}", text)
        } else {
            writeln!(writer, "{}--{}", "  |".repeat(depth), text)
        }
    }

    fn write_hosts<'a, W: Write>(
        &self,
        inventory: &InventoryGraph,
        hosts: impl IntoIterator<Item = &'a String>,
        depth: usize,
        writer: &mut W,
    ) -> std::io::Result<()> {
        for name in hosts {
            Self::line(writer, depth, name)?;
            if !self.show_vars {
                continue;
            }
            if let Some(host) = inventory.host(name) {
                for (key, value) in &host.vars {
                    Self::line(writer, depth + 1, &format!("{{{} = {}}}", key, value))?;
                }
            }
        }
        Ok(())
    }

    fn write_group<W: Write>(
        &self,
        inventory: &InventoryGraph,
        group: &Group,
        depth: usize,
        path: &mut Vec<String>,
        writer: &mut W,
    ) -> std::io::Result<()> {
        Self::line(writer, depth, &format!("@{}:", group.name))?;
        // A group already on the current path would recurse forever.
        if path.contains(&group.name) {
            return Ok(());
        }
        path.push(group.name.clone());

        for child in &group.children {
            if let Some(child) = inventory.group(child) {
                self.write_group(inventory, child, depth + 1, path, writer)?;
            }
        }
        self.write_hosts(inventory, &group.hosts, depth + 1, writer)?;

        path.pop();
        Ok(())
    }
}

impl Default for GraphOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for GraphOutput {
    fn format<W: Write>(&self, inventory: &InventoryGraph, writer: &mut W) -> std::io::Result<()> {
        Self::line(writer, 0, "@all:")?;

        let mut path = Vec::new();
        for group in inventory.top_level_groups() {
            self.write_group(inventory, group, 1, &mut path, writer)?;
        }

        Self::line(writer, 1, &format!("@{}:", UNGROUPED))?;
        let ungrouped: Vec<String> = inventory
            .ungrouped_hosts()
            .iter()
            .map(|h| h.name.clone())
            .collect();
        self.write_hosts(inventory, &ungrouped, 2, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InventoryOptions;
    use crate::transform::build_inventory;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(output: GraphOutput, doc: serde_json::Value, options: &InventoryOptions) -> String {
        let inventory = build_inventory(&doc, options).unwrap();
        let mut buf = Vec::new();
        output.format(&inventory, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_graph_tree() {
        let doc = json!({"model": {"deploymentNodes": [
            {"id": "1", "name": "dc", "environment": "Production", "children": [
                {"id": "2", "name": "rack", "children": [{"id": "3", "name": "web-01"}]},
                {"id": "4", "name": "db-01"}
            ]},
            {"id": "5", "name": "bastion", "environment": "Production"}
        ]}});
        let options = InventoryOptions {
            group_by_environment: false,
            ..Default::default()
        };

        let expected = "\
@all:
  |--@dc:
  |  |--@dc_rack:
  |  |  |--web-01
  |  |--db-01
  |--@ungrouped:
  |  |--bastion
";
        assert_eq!(render(GraphOutput::new(), doc, &options), expected);
    }

    #[test]
    fn test_graph_with_vars() {
        let doc = json!({"model": {"deploymentNodes": [
            {"id": "7", "name": "solo"}
        ]}});
        let options = InventoryOptions {
            group_by_environment: false,
            ..Default::default()
        };

        let rendered = render(GraphOutput::new().with_vars(true), doc, &options);
        assert!(rendered.contains("  |  |--solo\n"));
        assert!(rendered.contains("  |  |  |--{structurizr_id = \"7\"}\n"));
    }
}
