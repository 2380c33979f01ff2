// HTTP transport configuration for Inkpress runtime clients.

use std::time::Duration;

use crate::error::Error;

/// Timeout for JSON runtime calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for raster archive fetches. Rendering raster previews is slow,
/// so these calls get double the JSON budget.
pub const RASTER_TIMEOUT: Duration = Duration::from_secs(60);

/// Transport-level configuration shared by client constructors.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout for JSON calls.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Config with a custom JSON call timeout, in whole seconds.
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(secs),
        }
    }
}

/// Build a `reqwest` client honoring the transport config.
pub(crate) fn build_client(config: &TransportConfig) -> Result<reqwest::Client, Error> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!("inkfly/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
