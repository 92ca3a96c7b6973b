//! Command dispatch: bridges CLI args -> domain clients -> output formatting.

pub mod analytics;
pub mod config_cmd;
pub mod dashboard;
pub mod devices;
pub mod ssl;
pub mod uptime;
pub mod util;

use std::sync::Arc;

use watchdeck_api::Executor;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    exec: Arc<Executor>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Ssl(args) => ssl::handle(exec, args, global).await,
        Command::Uptime(args) => uptime::handle(exec, args, global).await,
        Command::Devices(args) => devices::handle(exec, args, global).await,
        Command::Analytics(args) => analytics::handle(exec, args, global).await,
        Command::Dashboard(args) => dashboard::handle(exec, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
