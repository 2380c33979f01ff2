//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::ProgressBar;

use inkfly_core::ApiResult;

use crate::error::CliError;

/// Unwrap an operation outcome, turning a provider failure into a `CliError`.
pub fn require_success<T>(outcome: ApiResult<T>) -> Result<T, CliError> {
    match outcome {
        ApiResult::Success { data } => Ok(data),
        ApiResult::Failure { message } => Err(CliError::Operation { message }),
    }
}

/// Start a stderr spinner, unless quiet or not attached to a terminal.
pub fn spinner(message: &str, quiet: bool) -> Option<ProgressBar> {
    if quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let bar = ProgressBar::new_spinner().with_message(message.to_owned());
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}
