use crate::cli::InitArgs;
use crate::config::{CONFIG_FILE_NAME, generate_config_template};
use crate::fs::{FileSystem, default_fs};
use crate::style;

pub fn cmd_init(args: InitArgs) -> i32 {
    cmd_init_with_fs(args, default_fs())
}

pub fn cmd_init_with_fs(args: InitArgs, fs: &dyn FileSystem) -> i32 {
    let config_path = args.path.join(CONFIG_FILE_NAME);
    if fs.exists(&config_path) {
        style::error(&format!(
            "{} already exists at {}",
            CONFIG_FILE_NAME,
            style::path(&config_path)
        ));
        return 1;
    }

    let template = generate_config_template();
    if let Err(e) = fs.write(&config_path, &template) {
        style::error(&format!("Failed to write config file: {}", e));
        return 1;
    }

    style::success(&format!(
        "Created {} at {}",
        CONFIG_FILE_NAME,
        style::path(&config_path)
    ));
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fs::mock::MockFs;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_init_writes_parseable_template() {
        let fs = MockFs::new();
        let code = cmd_init_with_fs(
            InitArgs {
                path: PathBuf::from("/project"),
            },
            &fs,
        );
        assert_eq!(code, 0);

        let written = fs
            .file(Path::new("/project/.structurizr-inventory.toml"))
            .unwrap();
        let config = Config::parse(&written).unwrap();
        assert_eq!(config.source.as_deref(), Some("workspace.json"));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let fs = MockFs::with_files([(
            Path::new("/project/.structurizr-inventory.toml"),
            "source = \"mine.json\"\n",
        )]);
        let code = cmd_init_with_fs(
            InitArgs {
                path: PathBuf::from("/project"),
            },
            &fs,
        );
        assert_eq!(code, 1);
        assert_eq!(
            fs.file(Path::new("/project/.structurizr-inventory.toml"))
                .as_deref(),
            Some("source = \"mine.json\"\n")
        );
    }
}
