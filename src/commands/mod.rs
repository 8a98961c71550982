mod graph;
mod host;
mod init;
mod list;

pub use graph::cmd_graph;
pub use host::cmd_host;
pub use init::cmd_init;
pub use list::cmd_list;

use crate::api::load_inventory;
use crate::cli::SourceArgs;
use crate::config::{CONFIG_FILE_NAME, Config, ConfigError};
use crate::error::ConfigurationError;
use crate::fs::FileSystem;
use crate::model::InventoryGraph;
use crate::style;
use std::io::{self, Write};
use std::path::Path;

/// Shared context for command execution, reducing boilerplate across commands.
pub struct CommandContext {
    pub config: Config,
}

impl CommandContext {
    /// Load the config (explicit path, else discovered in the working
    /// directory, else defaults) and apply command-line overrides.
    /// Returns Err(exit_code) if setup fails.
    pub fn new(config_path: Option<&Path>, overrides: &SourceArgs) -> Result<Self, i32> {
        let loaded = match config_path {
            Some(path) => Config::load(path).map(Some),
            None => std::env::current_dir()
                .map_err(ConfigError::from)
                .and_then(|dir| Config::discover(&dir)),
        };

        let mut config = match loaded {
            Ok(Some(config)) => config,
            Ok(None) => Config::default(),
            Err(e) => {
                let shown = config_path.unwrap_or(Path::new(CONFIG_FILE_NAME));
                style::error(&format!("{} ({})", e, style::path(shown)));
                return Err(1);
            }
        };

        if let Err(e) = apply_overrides(&mut config, overrides) {
            style::error(&e.to_string());
            return Err(1);
        }

        Ok(Self { config })
    }

    /// Build the inventory, reporting failures on stderr.
    pub fn load_inventory(&self) -> Result<InventoryGraph, i32> {
        load_inventory(&self.config).map_err(|e| {
            style::error(&e.to_string());
            if self.config.source.is_none() {
                style::hint("Run `structurizr-inventory init` to create a config file");
            }
            1
        })
    }
}

/// Command-line values win over the config file.
pub fn apply_overrides(config: &mut Config, args: &SourceArgs) -> Result<(), ConfigurationError> {
    if let Some(source) = &args.source {
        config.source = Some(source.clone());
        // Relative to the working directory, not the config file.
        config.base_dir = None;
    }
    if let Some(environment) = &args.environment {
        config.options.environment = Some(environment.clone());
    }
    if let Some(policy) = &args.host_identifier {
        config.options.host_identifier = policy.parse()?;
    }
    if args.group_by_technology {
        config.options.group_by_technology = true;
    }
    Ok(())
}

/// Write rendered output to `path`, or to stdout when there is none.
fn emit(rendered: &[u8], path: Option<&Path>, fs: &dyn FileSystem) -> i32 {
    let result = match path {
        Some(path) => fs.write(path, &String::from_utf8_lossy(rendered)),
        None => io::stdout().write_all(rendered),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            style::error(&format!("Failed to write output: {}", e));
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostIdentifier;
    use std::path::PathBuf;

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = Config::parse(
            r#"
source = "workspace.json"
environment = "Staging"
"#,
        )
        .unwrap();
        config.base_dir = Some(PathBuf::from("/etc/inventory"));

        let args = SourceArgs {
            source: Some("other.json".to_string()),
            environment: Some("Production".to_string()),
            host_identifier: Some("property:fqdn".to_string()),
            group_by_technology: true,
        };
        apply_overrides(&mut config, &args).unwrap();

        assert_eq!(config.source.as_deref(), Some("other.json"));
        assert_eq!(config.base_dir, None);
        assert_eq!(config.options.environment.as_deref(), Some("Production"));
        assert_eq!(
            config.options.host_identifier,
            HostIdentifier::Property("fqdn".to_string())
        );
        assert!(config.options.group_by_technology);
    }

    #[test]
    fn test_absent_overrides_keep_file_values() {
        let mut config = Config::parse(
            r#"
source = "workspace.json"
group_by_technology = true
"#,
        )
        .unwrap();
        config.base_dir = Some(PathBuf::from("/etc/inventory"));

        apply_overrides(&mut config, &SourceArgs::default()).unwrap();
        assert_eq!(config.source.as_deref(), Some("workspace.json"));
        assert_eq!(config.base_dir, Some(PathBuf::from("/etc/inventory")));
        assert!(config.options.group_by_technology);
    }

    #[test]
    fn test_invalid_identifier_override() {
        let mut config = Config::default();
        let args = SourceArgs {
            host_identifier: Some("hostname".to_string()),
            ..Default::default()
        };
        assert_eq!(
            apply_overrides(&mut config, &args),
            Err(ConfigurationError::InvalidHostIdentifier("hostname".to_string()))
        );
    }

    #[test]
    fn test_emit_to_file() {
        let fs = crate::fs::mock::MockFs::new();
        let path = Path::new("/out/inventory.json");

        assert_eq!(emit(b"{}\n", Some(path), &fs), 0);
        assert_eq!(fs.file(path).as_deref(), Some("{}\n"));
    }
}
