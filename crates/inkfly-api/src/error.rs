use thiserror::Error;

/// Errors surfaced by the Inkpress runtime client.
///
/// The taxonomy exists for logging and diagnostics; callers above the
/// service boundary see every remote failure collapsed into a uniform
/// success/failure result instead.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ────────────────────────────────────────────
    /// Credentials were missing or empty at construction time.
    ///
    /// The only failure that rejects work before any network I/O.
    #[error("configuration error: {message}")]
    Config { message: String },

    // ── Transport ────────────────────────────────────────────────
    /// Network-level failure: DNS, connection refused, timeout.
    ///
    /// Retryable by the caller; the client never retries on its own.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Response handling ────────────────────────────────────────
    /// The body could not be interpreted: non-JSON reply on a JSON
    /// endpoint, or the wrong content type on the raster endpoint.
    #[error("bad response: {message}")]
    BadResponse { message: String },

    /// The provider reported a failure in an otherwise well-formed reply.
    #[error("{message}")]
    Provider { message: String },

    // ── URLs ─────────────────────────────────────────────────────
    /// A base or raster URL failed to parse at construction.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// True when retrying the same call later could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// True when the provider itself reported the failure.
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }

    /// The provider-reported message, when there is one.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::Provider { message } => Some(message),
            _ => None,
        }
    }
}
