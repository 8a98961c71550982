//! Host variable resolution.
//!
//! Variables are layered in a fixed order, later layers overwriting earlier
//! ones on the same key:
//!
//! 1. `ansible_*` properties, verbatim;
//! 2. node metadata (`structurizr_id`, `structurizr_name`,
//!    `structurizr_description`, `structurizr_environment`,
//!    `structurizr_hierarchy`);
//! 3. `technology` and `tags`;
//! 4. remaining custom properties under `<property_prefix><key>`;
//! 5. passthrough properties, verbatim.

use crate::config::InventoryOptions;
use crate::model::{NodeId, Vars, Workspace};
use serde_json::Value;

const ANSIBLE_PREFIX: &str = "ansible_";

pub fn resolve_host_vars(workspace: &Workspace, id: NodeId, options: &InventoryOptions) -> Vars {
    let node = workspace.node(id);
    let passthrough = &options.ansible_property_passthrough;
    let mut vars = Vars::new();

    for (key, value) in node.properties.iter() {
        if key.starts_with(ANSIBLE_PREFIX) {
            vars.insert(key.to_string(), Value::from(value));
        }
    }

    vars.insert("structurizr_id".to_string(), Value::from(node.id.as_str()));
    vars.insert(
        "structurizr_name".to_string(),
        Value::from(node.name.as_str()),
    );
    if let Some(description) = node.description.as_deref().filter(|d| !d.is_empty()) {
        vars.insert(
            "structurizr_description".to_string(),
            Value::from(description),
        );
    }
    vars.insert(
        "structurizr_environment".to_string(),
        Value::from(node.environment.as_str()),
    );
    let ancestry = workspace.ancestry(id);
    if !ancestry.is_empty() {
        vars.insert(
            "structurizr_hierarchy".to_string(),
            Value::from(ancestry),
        );
    }

    if let Some(technology) = &node.technology {
        vars.insert("technology".to_string(), Value::from(technology.as_str()));
    }
    if !node.tags.is_empty() {
        vars.insert("tags".to_string(), Value::from(node.tags.clone()));
    }

    for (key, value) in node.properties.iter() {
        if key.starts_with(ANSIBLE_PREFIX) || passthrough.iter().any(|p| p == key) {
            continue;
        }
        vars.insert(
            format!("{}{}", options.property_prefix, key),
            Value::from(value),
        );
    }

    for key in passthrough {
        if let Some(value) = node.properties.get(key) {
            vars.insert(key.clone(), Value::from(value));
        }
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{LeafKinds, parse_workspace};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn workspace() -> Workspace {
        let doc = json!({"model": {"deploymentNodes": [
            {"id": "1", "name": "EU-West", "environment": "Production", "children": [
                {
                    "id": "111",
                    "name": "web-prod-01",
                    "description": "Primary web server",
                    "technology": "Ubuntu 22.04",
                    "tags": "Element,Deployment Node,Web",
                    "properties": [
                        {"name": "ansible_host", "value": "10.0.1.10"},
                        {"name": "ansible_user", "value": "ubuntu"},
                        {"name": "instance_type", "value": "t3.large"},
                        {"name": "fqdn", "value": "web-prod-01.example.com"}
                    ]
                }
            ]}
        ]}});
        let kinds = LeafKinds {
            infrastructure_nodes: true,
            software_system_instances: false,
            container_instances: false,
        };
        parse_workspace(&doc, kinds).unwrap()
    }

    fn web(ws: &Workspace) -> NodeId {
        ws.node(ws.environments[0].roots[0]).children[0]
    }

    #[test]
    fn test_default_resolution() {
        let ws = workspace();
        let vars = resolve_host_vars(&ws, web(&ws), &InventoryOptions::default());

        let expected: Vars = serde_json::from_value(json!({
            "ansible_host": "10.0.1.10",
            "ansible_user": "ubuntu",
            "structurizr_id": "111",
            "structurizr_name": "web-prod-01",
            "structurizr_description": "Primary web server",
            "structurizr_environment": "Production",
            "structurizr_hierarchy": ["EU-West"],
            "technology": "Ubuntu 22.04",
            "tags": ["Element", "Deployment Node", "Web"],
            "instance_type": "t3.large",
            "fqdn": "web-prod-01.example.com"
        }))
        .unwrap();
        assert_eq!(vars, expected);
    }

    #[test]
    fn test_prefix_applies_to_custom_properties_only() {
        let ws = workspace();
        let options = InventoryOptions {
            property_prefix: "structurizr_".to_string(),
            ..Default::default()
        };
        let vars = resolve_host_vars(&ws, web(&ws), &options);

        assert_eq!(vars["ansible_host"], json!("10.0.1.10"));
        assert_eq!(vars["structurizr_instance_type"], json!("t3.large"));
        assert!(!vars.contains_key("instance_type"));
    }

    #[test]
    fn test_passthrough_is_verbatim_and_not_prefixed() {
        let ws = workspace();
        let options = InventoryOptions {
            property_prefix: "s_".to_string(),
            ansible_property_passthrough: vec!["fqdn".to_string(), "missing".to_string()],
            ..Default::default()
        };
        let vars = resolve_host_vars(&ws, web(&ws), &options);

        assert_eq!(vars["fqdn"], json!("web-prod-01.example.com"));
        assert!(!vars.contains_key("s_fqdn"));
        assert!(!vars.contains_key("missing"));
        assert_eq!(vars["s_instance_type"], json!("t3.large"));
    }

    #[test]
    fn test_passthrough_wins_over_prefixed_property() {
        let doc = json!({"model": {"deploymentNodes": [
            {"id": "1", "name": "host", "properties": {"s_x": "direct", "x": "prefixed"}}
        ]}});
        let kinds = LeafKinds {
            infrastructure_nodes: true,
            software_system_instances: false,
            container_instances: false,
        };
        let ws = parse_workspace(&doc, kinds).unwrap();
        let options = InventoryOptions {
            property_prefix: "s_".to_string(),
            ansible_property_passthrough: vec!["s_x".to_string()],
            ..Default::default()
        };
        let vars = resolve_host_vars(&ws, ws.environments[0].roots[0], &options);

        assert_eq!(vars["s_x"], json!("direct"));
    }

    #[test]
    fn test_custom_property_overrides_metadata() {
        let doc = json!({"model": {"deploymentNodes": [
            {"id": "1", "name": "host", "technology": "Debian",
             "properties": {"technology": "custom"}}
        ]}});
        let kinds = LeafKinds {
            infrastructure_nodes: true,
            software_system_instances: false,
            container_instances: false,
        };
        let ws = parse_workspace(&doc, kinds).unwrap();
        let vars = resolve_host_vars(&ws, ws.environments[0].roots[0], &InventoryOptions::default());

        assert_eq!(vars["technology"], json!("custom"));
        assert!(!vars.contains_key("structurizr_hierarchy"));
    }
}
