use super::classify::Classification;
use super::groups::PlannedGroup;
use crate::config::HostIdentifier;
use crate::error::DuplicateHostError;
use crate::model::{Group, Host, InventoryGraph, NodeId, Vars, Workspace};
use std::collections::HashMap;
use tracing::warn;

/// Inventory name of `id` under `policy`, plus a warning when it had to fall
/// back to the node id.
pub fn resolve_identifier(
    workspace: &Workspace,
    id: NodeId,
    policy: &HostIdentifier,
) -> (String, Option<String>) {
    let node = workspace.node(id);
    match policy {
        HostIdentifier::Name => (node.name.clone(), None),
        HostIdentifier::Id => (node.id.clone(), None),
        HostIdentifier::Property(key) => match node.properties.get(key) {
            Some(value) if !value.trim().is_empty() => (value.trim().to_string(), None),
            _ => (
                node.id.clone(),
                Some(format!(
                    "{} '{}' has no '{}' property; using its id '{}' as host name",
                    node.kind, node.name, key, node.id
                )),
            ),
        },
    }
}

/// Name every host, reject duplicates, and lay out the final graph.
pub fn assemble(
    workspace: &Workspace,
    classification: &Classification,
    mut host_vars: HashMap<NodeId, Vars>,
    planned: Vec<PlannedGroup>,
    policy: &HostIdentifier,
) -> Result<InventoryGraph, DuplicateHostError> {
    let mut warnings = Vec::new();
    let mut names: HashMap<NodeId, String> = HashMap::new();
    let mut owners: HashMap<String, NodeId> = HashMap::new();
    let mut order: Vec<NodeId> = Vec::new();

    for node in classification.hosts() {
        let (name, warning) = resolve_identifier(workspace, node, policy);
        if let Some(warning) = warning {
            warn!("{}", warning);
            warnings.push(warning);
        }

        if let Some(&first) = owners.get(&name) {
            return Err(DuplicateHostError {
                host: name,
                first_node_id: workspace.node(first).id.clone(),
                second_node_id: workspace.node(node).id.clone(),
            });
        }
        owners.insert(name.clone(), node);
        names.insert(node, name);
        order.push(node);
    }

    let mut memberships: HashMap<NodeId, Vec<String>> = HashMap::new();
    let groups: Vec<Group> = planned
        .into_iter()
        .map(|planned| {
            let mut group = Group::new(planned.name);
            for member in planned.members {
                if let Some(name) = names.get(&member) {
                    group.hosts.push(name.clone());
                    memberships
                        .entry(member)
                        .or_default()
                        .push(group.name.clone());
                }
            }
            group.children = planned.children;
            group
        })
        .collect();

    let hosts: Vec<Host> = order
        .into_iter()
        .map(|node| Host {
            name: names.remove(&node).unwrap_or_default(),
            vars: host_vars.remove(&node).unwrap_or_default(),
            groups: memberships.remove(&node).unwrap_or_default(),
        })
        .collect();

    Ok(InventoryGraph::new(hosts, groups, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{LeafKinds, parse_workspace};
    use serde_json::json;

    fn workspace() -> Workspace {
        let doc = json!({"model": {"deploymentNodes": [
            {"id": "10", "name": "web-01", "properties": {"fqdn": "web-01.example.com"}},
            {"id": "11", "name": "web-02"},
            {"id": "12", "name": "web-03", "properties": {"fqdn": "  web-03.example.com "}},
            {"id": "13", "name": "web-04", "properties": {"fqdn": "   "}}
        ]}});
        let kinds = LeafKinds {
            infrastructure_nodes: true,
            software_system_instances: false,
            container_instances: false,
        };
        parse_workspace(&doc, kinds).unwrap()
    }

    #[test]
    fn test_identifier_policies() {
        let ws = workspace();
        let web1 = ws.environments[0].roots[0];

        assert_eq!(
            resolve_identifier(&ws, web1, &HostIdentifier::Name).0,
            "web-01"
        );
        assert_eq!(resolve_identifier(&ws, web1, &HostIdentifier::Id).0, "10");
        assert_eq!(
            resolve_identifier(&ws, web1, &HostIdentifier::Property("fqdn".to_string())),
            ("web-01.example.com".to_string(), None)
        );
    }

    #[test]
    fn test_missing_property_falls_back_to_id_with_warning() {
        let ws = workspace();
        let web2 = ws.environments[0].roots[1];

        let (name, warning) =
            resolve_identifier(&ws, web2, &HostIdentifier::Property("fqdn".to_string()));
        assert_eq!(name, "11");
        assert!(warning.unwrap().contains("'fqdn'"));
    }

    #[test]
    fn test_property_identifier_is_trimmed() {
        let ws = workspace();
        let fqdn = HostIdentifier::Property("fqdn".to_string());

        let web3 = ws.environments[0].roots[2];
        assert_eq!(
            resolve_identifier(&ws, web3, &fqdn),
            ("web-03.example.com".to_string(), None)
        );

        let web4 = ws.environments[0].roots[3];
        let (name, warning) = resolve_identifier(&ws, web4, &fqdn);
        assert_eq!(name, "13");
        assert!(warning.is_some());
    }
}
