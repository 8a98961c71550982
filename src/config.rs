use crate::error::ConfigurationError;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".structurizr-inventory.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(#[from] ConfigurationError),
}

/// How a host's inventory name is derived from its node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HostIdentifier {
    #[default]
    Name,
    Id,
    /// Value of the named property; nodes without it fall back to their id.
    Property(String),
}

impl FromStr for HostIdentifier {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(HostIdentifier::Name),
            "id" => Ok(HostIdentifier::Id),
            _ => match s.strip_prefix("property:") {
                Some(key) if !key.trim().is_empty() => {
                    Ok(HostIdentifier::Property(key.trim().to_string()))
                }
                Some(_) => Err(ConfigurationError::MissingPropertyKey),
                None => Err(ConfigurationError::InvalidHostIdentifier(s.to_string())),
            },
        }
    }
}

impl fmt::Display for HostIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostIdentifier::Name => write!(f, "name"),
            HostIdentifier::Id => write!(f, "id"),
            HostIdentifier::Property(key) => write!(f, "property:{}", key),
        }
    }
}

/// Naming of groups produced by the hierarchy dimension. Whatever the
/// naming, two distinct nodes never share a hierarchy group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HierarchyNaming {
    /// Ancestor names and the node's own name joined with `_`.
    #[default]
    Path,
    /// The environment name followed by the path.
    EnvironmentPath,
    /// The node's own name.
    Name,
}

impl FromStr for HierarchyNaming {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(HierarchyNaming::Path),
            "environment_path" => Ok(HierarchyNaming::EnvironmentPath),
            "name" => Ok(HierarchyNaming::Name),
            _ => Err(ConfigurationError::InvalidHierarchyNaming(s.to_string())),
        }
    }
}

/// Tags Structurizr attaches to every element of a kind.
pub const BUILT_IN_TAGS: [&str; 5] = [
    "Element",
    "Deployment Node",
    "Infrastructure Node",
    "Software System Instance",
    "Container Instance",
];

/// Everything the transformation needs. Fetching the document is not its
/// concern, so `source` lives on [`Config`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryOptions {
    pub environment: Option<String>,
    pub include_infrastructure_nodes: bool,
    pub include_software_system_instances: bool,
    pub include_container_instances: bool,
    pub group_by_environment: bool,
    pub group_by_tags: bool,
    pub group_by_technology: bool,
    pub group_by_hierarchy: bool,
    pub host_identifier: HostIdentifier,
    pub property_prefix: String,
    pub ansible_property_passthrough: Vec<String>,
    /// Tags that never produce a `tag_` group.
    pub exclude_tags: Vec<String>,
    pub hierarchy_group_naming: HierarchyNaming,
}

impl Default for InventoryOptions {
    fn default() -> Self {
        Self {
            environment: None,
            include_infrastructure_nodes: true,
            include_software_system_instances: false,
            include_container_instances: false,
            group_by_environment: true,
            group_by_tags: true,
            group_by_technology: false,
            group_by_hierarchy: true,
            host_identifier: HostIdentifier::Name,
            property_prefix: String::new(),
            ansible_property_passthrough: Vec::new(),
            exclude_tags: BUILT_IN_TAGS.iter().map(|t| t.to_string()).collect(),
            hierarchy_group_naming: HierarchyNaming::Path,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Path or http(s) URL of the workspace JSON export.
    pub source: Option<String>,
    /// Directory relative sources are resolved against.
    pub base_dir: Option<PathBuf>,
    pub options: InventoryOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    source: Option<String>,
    environment: Option<String>,
    include_infrastructure_nodes: Option<bool>,
    include_software_system_instances: Option<bool>,
    include_container_instances: Option<bool>,
    group_by_environment: Option<bool>,
    group_by_tags: Option<bool>,
    group_by_technology: Option<bool>,
    group_by_hierarchy: Option<bool>,
    host_identifier: Option<String>,
    property_prefix: Option<String>,
    ansible_property_passthrough: Option<Vec<String>>,
    exclude_tags: Option<Vec<String>>,
    hierarchy_group_naming: Option<String>,
}

impl Config {
    /// Load `path`. Relative sources in it resolve against its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Load `.structurizr-inventory.toml` from `dir` if there is one.
    pub fn discover(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(None);
        }
        Self::load(&config_path).map(Some)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let defaults = InventoryOptions::default();

        let host_identifier = match raw.host_identifier {
            Some(s) => s.parse()?,
            None => defaults.host_identifier,
        };
        let hierarchy_group_naming = match raw.hierarchy_group_naming {
            Some(s) => s.parse()?,
            None => defaults.hierarchy_group_naming,
        };

        let options = InventoryOptions {
            environment: raw.environment.filter(|e| !e.is_empty()),
            include_infrastructure_nodes: raw
                .include_infrastructure_nodes
                .unwrap_or(defaults.include_infrastructure_nodes),
            include_software_system_instances: raw
                .include_software_system_instances
                .unwrap_or(defaults.include_software_system_instances),
            include_container_instances: raw
                .include_container_instances
                .unwrap_or(defaults.include_container_instances),
            group_by_environment: raw
                .group_by_environment
                .unwrap_or(defaults.group_by_environment),
            group_by_tags: raw.group_by_tags.unwrap_or(defaults.group_by_tags),
            group_by_technology: raw
                .group_by_technology
                .unwrap_or(defaults.group_by_technology),
            group_by_hierarchy: raw.group_by_hierarchy.unwrap_or(defaults.group_by_hierarchy),
            host_identifier,
            property_prefix: raw.property_prefix.unwrap_or_default(),
            ansible_property_passthrough: raw.ansible_property_passthrough.unwrap_or_default(),
            exclude_tags: raw.exclude_tags.unwrap_or(defaults.exclude_tags),
            hierarchy_group_naming,
        };

        Ok(Self {
            source: raw.source,
            base_dir: None,
            options,
        })
    }
}

/// Starter config written by `structurizr-inventory init`.
pub fn generate_config_template() -> String {
    r#"# structurizr-inventory configuration

# Path (relative to this file) or http(s) URL of the Structurizr workspace JSON export.
source = "workspace.json"

# Only build hosts from this deployment environment. Omit to include all.
# environment = "Production"

include_infrastructure_nodes = true
include_software_system_instances = false
include_container_instances = false

group_by_environment = true
group_by_tags = true
group_by_technology = false
group_by_hierarchy = true

# "path" (ancestors and node name joined), "environment_path" (the same behind the
# environment name, for models reusing node names across environments) or "name".
hierarchy_group_naming = "path"

# "name", "id" or "property:<key>" (falls back to the id when the property is missing).
host_identifier = "name"

# Prefix for custom (non ansible_*) properties, e.g. "structurizr_".
property_prefix = ""

# Properties copied verbatim, overriding everything else.
ansible_property_passthrough = []

# Tags that should not become tag_ groups. Defaults to the tags Structurizr adds
# to every element; set to [] to group by them too.
exclude_tags = ["Element", "Deployment Node", "Infrastructure Node", "Software System Instance", "Container Instance"]
"#
    .to_string()
}
