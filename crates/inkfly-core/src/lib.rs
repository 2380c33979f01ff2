//! Business layer between `inkfly-api` and UI consumers.
//!
//! This crate owns the domain logic of the inkfly workspace:
//!
//! - **[`Studio`]** — Facade over the signed Inkpress runtime client. Every
//!   operation returns an [`ApiResult`] envelope instead of a raw `Result`,
//!   so consumers (CLI, embedding hosts) can serialize outcomes directly
//!   without re-deriving a success flag from an error chain.
//!
//! - **[`DiscoveryCache`]** — Per-tenant, TTL-based cache of category and
//!   design listings (`DashMap` keyed by credential fingerprint). Supports
//!   JSON file persistence so repeated CLI invocations skip rediscovery.
//!
//! - **[`ApiResult`]** — Two-state outcome envelope. `Success { data }` or
//!   `Failure { message }`, with the provider's own error message preserved
//!   verbatim where one exists.
//!
//! The API crate's discovery types ([`Category`], [`Design`]) are re-exported
//! at the root for ergonomics.

pub mod cache;
pub mod error;
pub mod outcome;
pub mod service;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{CacheEntry, DiscoveryCache, DEFAULT_TTL_HOURS};
pub use error::CoreError;
pub use outcome::ApiResult;
pub use service::{ScanReport, Studio, StudioConfig};

// Re-export the API-layer types consumers need to build a `Studio`.
pub use inkfly_api::{Category, Credentials, Design, DEFAULT_API_URL, DEFAULT_RASTER_URL};
