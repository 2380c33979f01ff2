//! Command dispatch: bridges CLI args -> Studio operations -> output formatting.

pub mod cache_cmd;
pub mod categories;
pub mod config_cmd;
pub mod designs;
pub mod projects;
pub mod test;
pub mod util;

use inkfly_core::Studio;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a credential-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, studio: &Studio, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Test => test::handle(studio, global).await,
        Command::Categories(args) => categories::handle(studio, args, global).await,
        Command::Designs(args) => designs::handle(studio, args, global).await,
        Command::Projects(args) => projects::handle(studio, args, global).await,
        Command::Cache(args) => cache_cmd::handle(studio, &args, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
