use crate::error::ConfigurationError;
use crate::model::{Environment, Workspace};

/// Environments to process: the one named by `filter`, or all of them.
///
/// An unknown name is an error, never an empty inventory.
pub fn select_environments<'a>(
    workspace: &'a Workspace,
    filter: Option<&str>,
) -> Result<Vec<&'a Environment>, ConfigurationError> {
    match filter {
        None => Ok(workspace.environments.iter().collect()),
        Some(name) => workspace
            .environment(name)
            .map(|env| vec![env])
            .ok_or_else(|| ConfigurationError::UnknownEnvironment {
                requested: name.to_string(),
                available: workspace.environment_names(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{LeafKinds, parse_workspace};
    use serde_json::json;

    fn workspace() -> Workspace {
        let doc = json!({"model": {"deploymentNodes": [
            {"id": "1", "name": "a", "environment": "Production"},
            {"id": "2", "name": "b", "environment": "Staging"}
        ]}});
        let kinds = LeafKinds {
            infrastructure_nodes: true,
            software_system_instances: false,
            container_instances: false,
        };
        parse_workspace(&doc, kinds).unwrap()
    }

    #[test]
    fn test_no_filter_keeps_all() {
        let ws = workspace();
        let envs = select_environments(&ws, None).unwrap();
        assert_eq!(envs.len(), 2);
    }

    #[test]
    fn test_filter_selects_one() {
        let ws = workspace();
        let envs = select_environments(&ws, Some("Staging")).unwrap();
        assert_eq!(envs.len(), 1);
        assert_eq!(envs[0].name, "Staging");
    }

    #[test]
    fn test_unknown_environment_lists_available() {
        let ws = workspace();
        let err = select_environments(&ws, Some("production")).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownEnvironment {
                requested: "production".to_string(),
                available: vec!["Production".to_string(), "Staging".to_string()],
            }
        );
    }
}
