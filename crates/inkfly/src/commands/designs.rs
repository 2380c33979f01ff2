//! Design command handlers.

use serde::Serialize;
use tabled::Tabled;

use inkfly_core::{Category, Design, Studio};

use crate::cli::{DesignsArgs, DesignsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DesignRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
}

impl From<&Design> for DesignRow {
    fn from(d: &Design) -> Self {
        Self {
            id: d.design_id.clone(),
            title: d.title.clone(),
        }
    }
}

/// One category section in `designs browse` output.
#[derive(Serialize)]
struct CategoryGroup {
    category: Category,
    designs: Vec<Design>,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    studio: &Studio,
    args: DesignsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DesignsCommand::List { category } => {
            let designs = util::require_success(studio.designs(&category).await)?;
            let out =
                output::render_list(&global.output, &designs, |d| DesignRow::from(d), |d| {
                    d.design_id.clone()
                });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DesignsCommand::Browse => {
            let categories = util::require_success(studio.categories().await)?;
            let mut groups = Vec::with_capacity(categories.len());
            for category in categories {
                let designs = util::require_success(studio.designs(&category.id).await)?;
                groups.push(CategoryGroup { category, designs });
            }

            let out = output::render_single(&global.output, &groups, |g| render_sections(g), |groups| {
                groups
                    .iter()
                    .flat_map(|g| g.designs.iter().map(|d| d.design_id.clone()))
                    .collect::<Vec<_>>()
                    .join("\n")
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// Sectioned text view: one heading + design table per category.
fn render_sections(groups: &[CategoryGroup]) -> String {
    let mut sections = Vec::with_capacity(groups.len());
    for group in groups {
        let heading = format!("{} ({})", group.category.title, group.category.id);
        if group.designs.is_empty() {
            sections.push(format!("{heading}\n  (no designs)"));
        } else {
            let rows: Vec<DesignRow> = group.designs.iter().map(DesignRow::from).collect();
            sections.push(format!("{heading}\n{}", output::rounded_table(&rows)));
        }
    }
    sections.join("\n\n")
}
