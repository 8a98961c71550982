//! The inventory pipeline: normalize → filter → classify → resolve vars →
//! build groups → assemble. Every stage is a pure function of its inputs.

mod assemble;
mod classify;
mod filter;
mod groups;
mod sanitize;
mod vars;

pub use assemble::{assemble, resolve_identifier};
pub use classify::{Classification, ClassifiedNode, FORCE_HOST_PROPERTY, NodeRole, classify, is_truthy};
pub use filter::select_environments;
pub use groups::{PlannedGroup, build_groups};
pub use sanitize::{NameRegistry, sanitize_group_name};
pub use vars::resolve_host_vars;

use crate::config::InventoryOptions;
use crate::error::InventoryResult;
use crate::model::{InventoryGraph, Workspace};
use crate::parser::{LeafKinds, parse_workspace};
use serde_json::Value;
use tracing::info;

/// Build an inventory from a decoded workspace document.
pub fn build_inventory(document: &Value, options: &InventoryOptions) -> InventoryResult<InventoryGraph> {
    let workspace = parse_workspace(document, LeafKinds::from(options))?;
    build_from_workspace(&workspace, options)
}

/// Build an inventory from an already normalized workspace.
///
/// `options` include flags only matter at normalization time; the workspace
/// already reflects them.
pub fn build_from_workspace(
    workspace: &Workspace,
    options: &InventoryOptions,
) -> InventoryResult<InventoryGraph> {
    let environments = select_environments(workspace, options.environment.as_deref())?;
    let classification = classify(workspace, &environments);

    let host_vars = classification
        .hosts()
        .map(|node| (node, resolve_host_vars(workspace, node, options)))
        .collect();

    let planned = build_groups(workspace, &environments, &classification, options)?;
    let graph = assemble(
        workspace,
        &classification,
        host_vars,
        planned,
        &options.host_identifier,
    )?;

    info!(
        hosts = graph.hosts().len(),
        groups = graph.groups().len(),
        warnings = graph.warnings().len(),
        "built inventory"
    );
    Ok(graph)
}
