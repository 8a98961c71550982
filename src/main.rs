use clap::Parser;
use structurizr_inventory::cli::{Cli, Command};
use structurizr_inventory::{cmd_graph, cmd_host, cmd_init, cmd_list};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("structurizr_inventory={}", level)));

    // stdout carries the inventory, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let exit_code = match cli.command {
        Some(Command::List(args)) => cmd_list(args, config),
        Some(Command::Host(args)) => cmd_host(args, config),
        Some(Command::Graph(args)) => cmd_graph(args, config),
        Some(Command::Init(args)) => cmd_init(args),
        None => cmd_list(cli.list, config),
    };

    std::process::exit(exit_code);
}
