//! Library API for structurizr-inventory.
//!
//! The CLI commands print and return exit codes; these functions return
//! `Result`s so other tools can embed the inventory build.
//!
//! # Example
//!
//! ```no_run
//! use structurizr_inventory::{Config, load_inventory};
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("inventory/.structurizr-inventory.toml"))?;
//! let inventory = load_inventory(&config)?;
//! for host in inventory.hosts() {
//!     println!("{} in {:?}", host.name, host.groups);
//! }
//! # Ok::<(), structurizr_inventory::LoadError>(())
//! ```

use crate::config::{Config, ConfigError, InventoryOptions};
use crate::error::InventoryError;
use crate::fs::{FileSystem, default_fs};
use crate::model::InventoryGraph;
use crate::source::{SourceError, read_source};
use crate::transform::build_inventory;
use thiserror::Error;

/// Anything that can stop an inventory from being produced.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No workspace source was configured.
    #[error("No Structurizr workspace source configured (set `source` or pass --source)")]
    MissingSource,

    /// Configuration file error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The workspace could not be read or decoded.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The workspace was read but could not be turned into an inventory.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Read the configured source and build its inventory.
///
/// # Example
///
/// ```no_run
/// use structurizr_inventory::{Config, load_inventory};
///
/// let mut config = Config::default();
/// config.source = Some("https://structurizr.example.com/workspace/1.json".to_string());
/// config.options.environment = Some("Production".to_string());
///
/// let inventory = load_inventory(&config)?;
/// assert!(inventory.group("env_Production").is_some());
/// # Ok::<(), structurizr_inventory::LoadError>(())
/// ```
pub fn load_inventory(config: &Config) -> Result<InventoryGraph, LoadError> {
    load_inventory_with_fs(config, default_fs())
}

/// Like [`load_inventory`], reading local sources through `fs`.
pub fn load_inventory_with_fs(
    config: &Config,
    fs: &dyn FileSystem,
) -> Result<InventoryGraph, LoadError> {
    let source = config.source.as_deref().ok_or(LoadError::MissingSource)?;
    let document = read_source(source, config.base_dir.as_deref(), fs)?;
    Ok(build_inventory(&document, &config.options)?)
}

/// Build an inventory from workspace JSON text.
///
/// # Example
///
/// ```
/// use structurizr_inventory::{InventoryOptions, inventory_from_json};
///
/// let json = r#"{"model": {"deploymentNodes": [
///     {"id": "1", "name": "db-01", "environment": "Staging"}
/// ]}}"#;
///
/// let inventory = inventory_from_json(json, &InventoryOptions::default())?;
/// assert_eq!(inventory.host_names(), vec!["db-01"]);
/// assert!(inventory.group("env_Staging").is_some());
/// # Ok::<(), structurizr_inventory::LoadError>(())
/// ```
pub fn inventory_from_json(
    json: &str,
    options: &InventoryOptions,
) -> Result<InventoryGraph, LoadError> {
    let document = serde_json::from_str(json).map_err(|source| SourceError::Json {
        origin: "<input>".to_string(),
        source,
    })?;
    Ok(build_inventory(&document, options)?)
}
