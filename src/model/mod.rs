mod inventory;
mod workspace;

pub use inventory::{Group, Host, InventoryGraph, Vars};
pub use workspace::{Environment, ModelNode, NodeId, NodeKind, Properties, Workspace};
