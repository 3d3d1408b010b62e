//! Command dispatch: bridges CLI args -> core components -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod people;
pub mod scans;
pub mod util;

use netdex_core::Inventory;

use crate::cli::{GlobalOpts, ServerCommand};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: ServerCommand,
    inventory: &Inventory,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        ServerCommand::Devices(args) => devices::handle(inventory, args, global).await,
        ServerCommand::People(args) => people::handle(inventory, args, global).await,
        ServerCommand::Scans(args) => scans::handle(inventory, args, global).await,
    }
}
