//! Category command handlers.

use tabled::Tabled;

use inkfly_core::{Category, Studio};

use crate::cli::{CategoriesArgs, CategoriesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

/// Probe list used when `categories scan` is given no candidates.
const DEFAULT_SCAN_CANDIDATES: [&str; 5] = ["cat1", "cat2", "cat3", "cat4", "cat5"];

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id.clone(),
            title: c.title.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    studio: &Studio,
    args: CategoriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CategoriesCommand::List { refresh } => {
            if refresh {
                studio.invalidate_cache();
            }
            let categories = util::require_success(studio.categories().await)?;
            let out =
                output::render_list(&global.output, &categories, |c| CategoryRow::from(c), |c| {
                    c.id.clone()
                });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Scan { candidates } => {
            let candidates: Vec<String> = if candidates.is_empty() {
                DEFAULT_SCAN_CANDIDATES.iter().map(|&c| c.to_owned()).collect()
            } else {
                candidates
            };

            let bar = util::spinner("Probing candidate categories...", global.quiet);
            let outcome = studio.scan_categories(&candidates).await;
            if let Some(bar) = bar {
                bar.finish_and_clear();
            }
            let report = util::require_success(outcome)?;

            let out = output::render_list(
                &global.output,
                &report.categories,
                |c| CategoryRow::from(c),
                |c| c.id.clone(),
            );
            output::print_output(&out, global.quiet);
            if !global.quiet {
                eprintln!(
                    "Scan complete: {} of {} candidates confirmed.",
                    report.found,
                    candidates.len()
                );
            }
            Ok(())
        }
    }
}
