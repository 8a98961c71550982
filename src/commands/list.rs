use crate::cli::{ListArgs, OutputFormat};
use crate::fs::{FileSystem, default_fs};
use crate::model::InventoryGraph;
use crate::output::{JsonOutput, OutputFormatter, YamlOutput};
use crate::style;
use std::path::Path;

use super::{CommandContext, emit};

pub fn cmd_list(args: ListArgs, config_path: Option<&Path>) -> i32 {
    let ctx = match CommandContext::new(config_path, &args.source) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    let inventory = match ctx.load_inventory() {
        Ok(inventory) => inventory,
        Err(code) => return code,
    };

    write_inventory(&inventory, &args, default_fs())
}

fn write_inventory(inventory: &InventoryGraph, args: &ListArgs, fs: &dyn FileSystem) -> i32 {
    let mut buffer = Vec::new();
    let format_result = match args.format {
        OutputFormat::Json => JsonOutput::new().format(inventory, &mut buffer),
        OutputFormat::Yaml => YamlOutput::new().format(inventory, &mut buffer),
    };

    if let Err(e) = format_result {
        style::error(&format!("Failed to format output: {}", e));
        return 1;
    }

    let code = emit(&buffer, args.output.as_deref(), fs);
    if code == 0 {
        if let Some(path) = &args.output {
            style::success(&format!(
                "Wrote {} hosts and {} groups to {}",
                inventory.hosts().len(),
                inventory.groups().len(),
                style::path(path)
            ));
        }
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InventoryOptions;
    use crate::fs::mock::MockFs;
    use crate::transform::build_inventory;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_write_yaml_to_file() {
        let doc = json!({"model": {"deploymentNodes": [{"id": "1", "name": "web-01"}]}});
        let inventory = build_inventory(&doc, &InventoryOptions::default()).unwrap();
        let fs = MockFs::new();
        let args = ListArgs {
            format: OutputFormat::Yaml,
            output: Some(PathBuf::from("/tmp/inventory.yml")),
            ..Default::default()
        };

        assert_eq!(write_inventory(&inventory, &args, &fs), 0);
        let written = fs.file(Path::new("/tmp/inventory.yml")).unwrap();
        assert!(written.starts_with("all:"));
        assert!(written.contains("env_Default"));
    }
}
