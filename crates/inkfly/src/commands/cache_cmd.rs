//! Discovery cache handlers.

use chrono::Duration;
use serde::Serialize;

use inkfly_core::{CacheEntry, Studio};

use crate::cli::{CacheArgs, CacheCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Status view ─────────────────────────────────────────────────────

/// Snapshot of the active tenant's cache entry for `cache status`.
#[derive(Serialize)]
struct CacheStatus {
    tenant: String,
    cached: bool,
    categories: usize,
    design_sets: usize,
    age: Option<String>,
    fresh: Option<bool>,
}

fn status_view(studio: &Studio, entry: Option<&CacheEntry>) -> CacheStatus {
    match entry {
        Some(entry) => {
            let age = entry.age();
            CacheStatus {
                tenant: studio.tenant().to_owned(),
                cached: true,
                categories: entry.categories.len(),
                design_sets: entry.designs.len(),
                age: Some(format_age(age)),
                fresh: Some(age < studio.cache_ttl()),
            }
        }
        None => CacheStatus {
            tenant: studio.tenant().to_owned(),
            cached: false,
            categories: 0,
            design_sets: 0,
            age: None,
            fresh: None,
        },
    }
}

/// Human-readable age like "3h 12m".
fn format_age(age: Duration) -> String {
    let minutes = age.num_minutes().max(0);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

fn format_status(status: &CacheStatus) -> String {
    if !status.cached {
        return format!("No cached discovery data for tenant {}", status.tenant);
    }
    let freshness = match status.fresh {
        Some(true) => "fresh",
        _ => "stale",
    };
    format!(
        "Tenant:      {}\n\
         Categories:  {}\n\
         Design sets: {}\n\
         Age:         {} ({freshness})",
        status.tenant,
        status.categories,
        status.design_sets,
        status.age.as_deref().unwrap_or("-"),
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(studio: &Studio, args: &CacheArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        CacheCommand::Status => {
            let entry = studio.cache_entry();
            let status = status_view(studio, entry.as_ref());
            let out =
                output::render_single(&global.output, &status, format_status, |s| s.tenant.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CacheCommand::Clear { all } => {
            if all {
                studio.clear_cache();
            } else {
                studio.invalidate_cache();
            }
            if !global.quiet {
                eprintln!("Cache cleared");
            }
            Ok(())
        }
    }
}
