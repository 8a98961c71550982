use crate::cli::HostArgs;
use crate::output::host_vars_json;
use crate::style;
use std::path::Path;

use super::CommandContext;

pub fn cmd_host(args: HostArgs, config_path: Option<&Path>) -> i32 {
    let ctx = match CommandContext::new(config_path, &args.source) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    let inventory = match ctx.load_inventory() {
        Ok(inventory) => inventory,
        Err(code) => return code,
    };

    let Some(host) = inventory.host(&args.name) else {
        style::error(&format!("Unknown host '{}'", args.name));
        return 1;
    };

    match serde_json::to_string_pretty(&host_vars_json(host)) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            style::error(&format!("Failed to format output: {}", e));
            1
        }
    }
}
