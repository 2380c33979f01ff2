//! Project command handlers.
//!
//! Project state is provider-defined JSON; detail views pass it through
//! pretty-printed rather than forcing it into a table.

use std::path::PathBuf;

use serde_json::Value;

use inkfly_core::Studio;

use crate::cli::{GlobalOpts, ProjectsArgs, ProjectsCommand, Unit};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    studio: &Studio,
    args: ProjectsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProjectsCommand::Get { project } => {
            let state = util::require_success(studio.project(&project).await)?;
            print_value(&state, global);
            Ok(())
        }

        ProjectsCommand::RenderPdf { project } => {
            let reply = util::require_success(studio.render_pdf(&project).await)?;
            print_value(&reply, global);
            Ok(())
        }

        ProjectsCommand::Clone { project } => {
            let reply = util::require_success(studio.clone_project(&project).await)?;
            print_value(&reply, global);
            Ok(())
        }

        ProjectsCommand::Create {
            width,
            height,
            unit,
        } => {
            let reply = util::require_success(
                studio
                    .create_blank_project(width, height, unit_value(&unit))
                    .await,
            )?;
            print_value(&reply, global);
            Ok(())
        }

        ProjectsCommand::Raster { project, file } => {
            let bytes = util::require_success(studio.raster(&project).await)?;
            let path = file.unwrap_or_else(|| PathBuf::from(format!("{project}.zip")));
            std::fs::write(&path, &bytes)?;
            if !global.quiet {
                eprintln!("Wrote {} bytes to {}", bytes.len(), path.display());
            }
            Ok(())
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Render a raw JSON reply in the chosen format.
fn print_value(value: &Value, global: &GlobalOpts) {
    let out = output::render_single(
        &global.output,
        value,
        |v| output::json_pretty(v),
        value_id,
    );
    output::print_output(&out, global.quiet);
}

/// Identifier for plain output: the reply's project id when present,
/// otherwise the whole reply on one line.
fn value_id(value: &Value) -> String {
    value
        .get("projectId")
        .or_else(|| value.get("id"))
        .and_then(Value::as_str)
        .map_or_else(|| output::json_compact(value), ToOwned::to_owned)
}

/// Wire value for the project-creation unit field.
fn unit_value(unit: &Unit) -> &'static str {
    match unit {
        Unit::In => "in",
        Unit::Cm => "cm",
        Unit::Mm => "mm",
        Unit::Px => "px",
    }
}
