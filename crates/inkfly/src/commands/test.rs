//! Connection test handler.

use owo_colors::OwoColorize;

use inkfly_core::Studio;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(studio: &Studio, global: &GlobalOpts) -> Result<(), CliError> {
    let message = util::require_success(studio.test_connection().await)?;
    if !global.quiet {
        if output::should_color(&global.color) {
            println!("{} {message}", "✓".green());
        } else {
            println!("✓ {message}");
        }
    }
    Ok(())
}
