use crate::cli::GraphArgs;
use crate::output::{GraphOutput, OutputFormatter};
use crate::style;
use std::io;
use std::path::Path;

use super::CommandContext;

pub fn cmd_graph(args: GraphArgs, config_path: Option<&Path>) -> i32 {
    let ctx = match CommandContext::new(config_path, &args.source) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    let inventory = match ctx.load_inventory() {
        Ok(inventory) => inventory,
        Err(code) => return code,
    };

    let formatter = GraphOutput::new().with_vars(args.vars);
    if let Err(e) = formatter.format(&inventory, &mut io::stdout().lock()) {
        style::error(&format!("Failed to write output: {}", e));
        return 1;
    }
    0
}
