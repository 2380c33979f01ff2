//! CLI error types with miette diagnostics.
//!
//! Maps configuration and runtime failures into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use inkfly_config::ConfigError;
use inkfly_core::CoreError;

/// Process exit codes for scripted callers.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const OPERATION: i32 = 4;
    pub const IO: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Credentials ──────────────────────────────────────────────────

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(inkfly::no_credentials),
        help(
            "Configure credentials with: inkfly config init\n\
             Or set the INKFLY_API_KEY and INKFLY_SECRET_KEY environment variables."
        )
    )]
    NoCredentials { profile: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(inkfly::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: inkfly config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    // ── Operations ───────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(inkfly::operation_failed))]
    Operation { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(inkfly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(inkfly::config))]
    Config(Box<ConfigError>),

    // ── Core / IO ────────────────────────────────────────────────────

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => exit_code::USAGE,
            Self::NoCredentials { .. } | Self::ProfileNotFound { .. } | Self::Config(_) => {
                exit_code::CONFIG
            }
            Self::Operation { .. } => exit_code::OPERATION,
            Self::Core(CoreError::Io(_)) | Self::Io(_) => exit_code::IO,
            _ => exit_code::GENERAL,
        }
    }
}
