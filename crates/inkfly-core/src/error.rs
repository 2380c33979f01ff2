// ── Core error types ──
//
// Failures from this crate's own machinery: Studio construction and
// cache persistence. Runtime API failures never surface here -- the
// `Studio` collapses those into `ApiResult::Failure` instead.

use thiserror::Error;

/// Error type for the core crate's own machinery.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ── Conversion from transport-layer errors ──────────────────────────
//
// Only reachable during construction (credential validation, URL
// parsing). The message passes through without an extra prefix.

impl From<inkfly_api::Error> for CoreError {
    fn from(err: inkfly_api::Error) -> Self {
        match err {
            inkfly_api::Error::Config { message } => CoreError::Config { message },
            other => CoreError::Config {
                message: other.to_string(),
            },
        }
    }
}
