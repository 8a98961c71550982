//! Errors raised while turning a workspace export into an inventory.
//!
//! Every variant is fatal: the build stops and no partial inventory is produced.

use std::fmt;
use thiserror::Error;

/// Result type alias for inventory builds.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Any failure of the core transformation.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    NameCollision(#[from] NameCollisionError),

    #[error(transparent)]
    DuplicateHost(#[from] DuplicateHostError),
}

/// The input document is missing required structure or carries a field of the
/// wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Schema error at {path}: {message}")]
pub struct SchemaError {
    /// JSON path of the offending value, e.g. `model.deploymentNodes[0].name`.
    pub path: String,
    pub message: String,
}

impl SchemaError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// The build options cannot be satisfied by this workspace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error(
        "Environment '{requested}' not found in workspace (available: {})",
        format_names(available)
    )]
    UnknownEnvironment {
        requested: String,
        available: Vec<String>,
    },

    #[error("Invalid host_identifier '{0}': expected 'name', 'id' or 'property:<key>'")]
    InvalidHostIdentifier(String),

    #[error("host_identifier 'property:' requires a property key")]
    MissingPropertyKey,

    #[error("Invalid hierarchy_group_naming '{0}': expected 'path', 'environment_path' or 'name'")]
    InvalidHierarchyNaming(String),
}

fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

/// Two different sources map to the same group name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Group name collision in {dimension} groups: '{first}' and '{second}' both sanitize to '{group}'"
)]
pub struct NameCollisionError {
    pub dimension: GroupDimension,
    pub group: String,
    pub first: String,
    pub second: String,
}

/// Two distinct nodes resolve to the same host identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Duplicate host '{host}' produced by nodes '{first_node_id}' and '{second_node_id}'")]
pub struct DuplicateHostError {
    pub host: String,
    pub first_node_id: String,
    pub second_node_id: String,
}

/// Grouping dimension a group name was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupDimension {
    Environment,
    Tag,
    Technology,
    Hierarchy,
}

impl fmt::Display for GroupDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupDimension::Environment => write!(f, "environment"),
            GroupDimension::Tag => write!(f, "tag"),
            GroupDimension::Technology => write!(f, "technology"),
            GroupDimension::Hierarchy => write!(f, "hierarchy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_environment_lists_available_names() {
        let err = ConfigurationError::UnknownEnvironment {
            requested: "Prod".to_string(),
            available: vec!["Production".to_string(), "Staging".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'Prod'"));
        assert!(msg.contains("Production, Staging"));
    }

    #[test]
    fn test_duplicate_host_names_both_nodes() {
        let err = DuplicateHostError {
            host: "web-prod-01".to_string(),
            first_node_id: "11".to_string(),
            second_node_id: "42".to_string(),
        };
        let msg = InventoryError::from(err).to_string();
        assert!(msg.contains("'11'"));
        assert!(msg.contains("'42'"));
    }
}
