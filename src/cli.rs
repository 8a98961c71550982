use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "structurizr-inventory")]
#[command(about = "Build Ansible inventories from Structurizr deployment models")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (defaults to .structurizr-inventory.toml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Options used when no subcommand is given
    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the whole inventory (default behavior)
    List(ListArgs),

    /// Print the variables of one host
    Host(HostArgs),

    /// Print the inventory as a tree of groups and hosts
    Graph(GraphArgs),

    /// Generate a starter .structurizr-inventory.toml configuration file
    Init(InitArgs),
}

/// Overrides for values normally read from the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Workspace JSON file or http(s) URL
    #[arg(short, long)]
    pub source: Option<String>,

    /// Only include this deployment environment
    #[arg(short, long)]
    pub environment: Option<String>,

    /// Host naming policy: name, id or property:<key>
    #[arg(long)]
    pub host_identifier: Option<String>,

    /// Also create tech_* groups
    #[arg(long)]
    pub group_by_technology: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct HostArgs {
    /// Inventory name of the host
    pub name: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Show host variables in the tree
    #[arg(long)]
    pub vars: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Directory where to create .structurizr-inventory.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `ansible-inventory --list` JSON
    #[default]
    Json,
    /// Ansible YAML inventory
    Yaml,
}
