pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod model;
pub mod output;
pub mod parser;
pub mod source;
pub mod style;
pub mod transform;

pub use api::{LoadError, inventory_from_json, load_inventory, load_inventory_with_fs};
pub use cli::Cli;
pub use commands::{cmd_graph, cmd_host, cmd_init, cmd_list};
pub use config::{Config, HierarchyNaming, HostIdentifier, InventoryOptions};
pub use error::{
    ConfigurationError, DuplicateHostError, GroupDimension, InventoryError, InventoryResult,
    NameCollisionError, SchemaError,
};
pub use model::{Group, Host, InventoryGraph, Vars, Workspace};
pub use transform::build_inventory;
