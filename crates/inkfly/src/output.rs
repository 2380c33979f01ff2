//! Rendering for the format picked by `--output`.
//!
//! `table` goes through `tabled` row structs, `json`/`json-compact`/`yaml`
//! serialize the original data, and `plain` reduces items to bare
//! identifiers for scripting.

use std::io::{self, IsTerminal, Write};

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::{ColorMode, OutputFormat};

/// True when styled output should be emitted.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::env::var("NO_COLOR").is_err() && io::stdout().is_terminal(),
    }
}

// ── Dispatchers ──────────────────────────────────────────────────────

/// Render a listing. `to_row` feeds the table view, `id_fn` the plain
/// view; the structured formats serialize `data` itself.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            rounded_table(&rows)
        }
        OutputFormat::Json => json_pretty(data),
        OutputFormat::JsonCompact => json_compact(data),
        OutputFormat::Yaml => to_yaml(data),
        OutputFormat::Plain => {
            let ids: Vec<String> = data.iter().map(&id_fn).collect();
            ids.join("\n")
        }
    }
}

/// Render one serializable item.
///
/// Single items have no natural row shape, so the table view comes from
/// `detail_fn` as pre-formatted text; `id_fn` supplies the plain view.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => json_pretty(data),
        OutputFormat::JsonCompact => json_compact(data),
        OutputFormat::Yaml => to_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Write rendered output to stdout. Quiet mode and empty renders print
/// nothing at all, not even the trailing newline.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let _ = writeln!(io::stdout().lock(), "{output}");
}

// ── Per-format renderers ─────────────────────────────────────────────

pub(crate) fn rounded_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

// Everything rendered here was just deserialized or built in memory, so
// re-serializing it is infallible.
pub(crate) fn json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).expect("in-memory value must serialize")
}

pub(crate) fn json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).expect("in-memory value must serialize")
}

fn to_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("in-memory value must serialize")
}
