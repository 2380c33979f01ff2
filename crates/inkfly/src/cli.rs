//! Clap derive structures for the `inkfly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// inkfly -- command-line workbench for the Inkpress print editor
#[derive(Debug, Parser)]
#[command(
    name = "inkfly",
    version,
    about = "Manage Inkpress print projects from the command line",
    long_about = "A CLI for the Inkpress web-to-print editor.\n\n\
        Discovers design categories, browses template designs, and drives\n\
        project rendering (PDF and raster ZIP) through the signed runtime API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Credential profile to use
    #[arg(long, short = 'p', env = "INKFLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API key (overrides profile)
    #[arg(long, env = "INKFLY_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Secret key (overrides profile and keyring)
    #[arg(long, env = "INKFLY_SECRET_KEY", global = true, hide_env = true)]
    pub secret_key: Option<String>,

    /// Runtime API base URL (overrides profile)
    #[arg(long, env = "INKFLY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Raster endpoint URL (overrides profile)
    #[arg(long, env = "INKFLY_RASTER_URL", global = true)]
    pub raster_url: Option<String>,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "INKFLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "INKFLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify credentials against the runtime API
    Test,

    /// Browse and discover design categories
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// Browse template designs
    #[command(alias = "des")]
    Designs(DesignsArgs),

    /// Inspect, render, and duplicate print projects
    #[command(alias = "proj")]
    Projects(ProjectsArgs),

    /// Inspect and clear the local discovery cache
    Cache(CacheArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CATEGORIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List design categories
    #[command(alias = "ls")]
    List {
        /// Bypass the discovery cache and refetch
        #[arg(long)]
        refresh: bool,
    },

    /// Probe candidate category ids against the designs endpoint
    Scan {
        /// Candidate ids to probe (defaults to a built-in list)
        #[arg(value_name = "CANDIDATE")]
        candidates: Vec<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DESIGNS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DesignsArgs {
    #[command(subcommand)]
    pub command: DesignsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DesignsCommand {
    /// List template designs in a category
    #[command(alias = "ls")]
    List {
        /// Category id to list designs for
        category: String,
    },

    /// Walk every known category and list its designs
    Browse,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PROJECTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// Fetch the full saved state of a project
    Get {
        /// Project id
        project: String,
    },

    /// Request print-ready PDF rendering for a project
    RenderPdf {
        /// Project id
        project: String,
    },

    /// Duplicate a project server-side
    Clone {
        /// Project id to duplicate
        project: String,
    },

    /// Create a blank project with explicit dimensions
    Create {
        /// Page width in the chosen unit
        #[arg(long)]
        width: f64,

        /// Page height in the chosen unit
        #[arg(long)]
        height: f64,

        /// Measurement unit for width and height
        #[arg(long, default_value = "in")]
        unit: Unit,
    },

    /// Download the rendered raster archive (ZIP) for a project
    Raster {
        /// Project id
        project: String,

        /// Write the archive to this path (defaults to <PROJECT>.zip)
        #[arg(long, short = 'f', value_name = "PATH")]
        file: Option<PathBuf>,
    },
}

/// Measurement units accepted by project creation.
#[derive(Debug, Clone, ValueEnum)]
pub enum Unit {
    /// Inches
    In,
    /// Centimeters
    Cm,
    /// Millimeters
    Mm,
    /// Pixels
    Px,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CACHE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Show cached discovery data for the active credentials
    Status,

    /// Drop cached discovery data
    Clear {
        /// Clear entries for every credential set, not just the active one
        #[arg(long)]
        all: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a configuration value
    Set {
        /// Config key (dot-separated path, e.g., "profiles.work.api_url")
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a secret key in the system keyring
    SetSecret {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
