// ── Studio facade ──
//
// One `Studio` per tenant credential set, injected where needed; no
// ambient global. Wraps the signed runtime client, consults the
// discovery cache, and collapses the API error taxonomy into the
// `ApiResult` envelope at this boundary. The taxonomy itself only
// reaches the logs.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Duration;
use futures_util::StreamExt;
use futures_util::stream;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, DEFAULT_TTL_HOURS, DiscoveryCache};
use crate::error::CoreError;
use crate::outcome::ApiResult;
use inkfly_api::{
    Category, Credentials, DEFAULT_API_URL, DEFAULT_RASTER_URL, Design, Error as ApiError,
    RuntimeClient, TransportConfig,
};

/// Sentinel category id for connection probes. The provider checks the
/// signature before resolving the category, so even a category-not-found
/// reply proves the credentials work.
const CONNECTION_PROBE_CATEGORY: &str = "test";

/// Upper bound on in-flight probes during a category scan.
const SCAN_CONCURRENCY: usize = 5;

/// How to build a [`Studio`]: endpoints, timeout, and cache behavior.
///
/// `Default` matches the hosted Inkpress service. Override the URLs to
/// point at a regional host or a test server.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub api_url: String,
    pub raster_url: String,
    pub timeout_secs: u64,
    pub cache_ttl_hours: i64,
    /// When set, the discovery cache is loaded from and persisted to
    /// this JSON file. `None` keeps the cache in memory only.
    pub cache_path: Option<PathBuf>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            raster_url: DEFAULT_RASTER_URL.to_owned(),
            timeout_secs: 30,
            cache_ttl_hours: DEFAULT_TTL_HOURS,
            cache_path: None,
        }
    }
}

/// Result of a candidate category scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Confirmed categories, in candidate order, with synthesized titles.
    pub categories: Vec<Category>,
    /// Number of confirmed categories.
    pub found: usize,
}

/// Facade over the Inkpress runtime API for a single tenant.
///
/// Every operation returns an [`ApiResult`] rather than a `Result`:
/// remote failures are ordinary outcomes here, not exceptional ones.
/// Discovery operations read through a TTL-gated [`DiscoveryCache`]
/// keyed by the credential fingerprint.
#[derive(Debug)]
pub struct Studio {
    api: RuntimeClient,
    cache: Arc<DiscoveryCache>,
    ttl: Duration,
    cache_path: Option<PathBuf>,
    tenant: String,
}

impl Studio {
    /// Builds a studio from credentials and configuration, loading the
    /// persisted discovery cache when a cache path is configured.
    pub fn new(credentials: Credentials, config: &StudioConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::with_timeout_secs(config.timeout_secs);
        let api = RuntimeClient::with_urls(
            credentials,
            &transport,
            &config.api_url,
            &config.raster_url,
        )?;
        let cache = match &config.cache_path {
            Some(path) => Arc::new(DiscoveryCache::load(path)),
            None => Arc::new(DiscoveryCache::new()),
        };
        Ok(Self {
            tenant: api.credentials().fingerprint(),
            api,
            cache,
            ttl: Duration::hours(config.cache_ttl_hours),
            cache_path: config.cache_path.clone(),
        })
    }

    /// Wraps an existing client with an externally owned cache.
    pub fn with_client(api: RuntimeClient, cache: Arc<DiscoveryCache>, ttl: Duration) -> Self {
        Self {
            tenant: api.credentials().fingerprint(),
            api,
            cache,
            ttl,
            cache_path: None,
        }
    }

    /// The credential fingerprint this studio caches under.
    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    // ── Connection ──────────────────────────────────────────────────

    /// Verifies the credentials with a single probe request.
    pub async fn test_connection(&self) -> ApiResult<String> {
        match self.api.fetch_designs(CONNECTION_PROBE_CATEGORY).await {
            Ok(_) => ApiResult::success("Connection OK: credentials accepted".to_owned()),
            Err(err) if mentions_category(&err) => {
                debug!(error = %err, "probe rejected the sentinel category; credentials are valid");
                ApiResult::success("Connection OK: credentials accepted".to_owned())
            }
            Err(err) => collapse(err),
        }
    }

    // ── Discovery ───────────────────────────────────────────────────

    /// Lists the tenant's design categories, serving a fresh cache
    /// entry when one exists.
    ///
    /// An account without an enumeration endpoint reports success with
    /// an empty listing; use [`scan_categories`](Self::scan_categories)
    /// to probe candidates in that case.
    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        if let Some(hit) = self.cache.categories(&self.tenant, self.ttl) {
            debug!(count = hit.len(), "serving categories from cache");
            return ApiResult::success(hit);
        }
        match self.api.fetch_categories().await {
            Ok(categories) => {
                if !categories.is_empty() {
                    self.cache.put_categories(&self.tenant, categories.clone());
                    self.spill_cache();
                }
                ApiResult::success(categories)
            }
            Err(err) if endpoint_unavailable(&err) => {
                debug!(error = %err, "category enumeration unavailable; treating as empty");
                ApiResult::success(Vec::new())
            }
            Err(err) => collapse(err),
        }
    }

    /// Lists the designs in one category, in provider order.
    ///
    /// Always hits the API; non-empty results are recorded in the
    /// cache opportunistically so later status displays have them.
    pub async fn designs(&self, category_id: &str) -> ApiResult<Vec<Design>> {
        if category_id.trim().is_empty() {
            return ApiResult::failure("category id is required");
        }
        match self.api.fetch_designs(category_id).await {
            Ok(designs) => {
                if !designs.is_empty() {
                    self.cache.record_designs(
                        &self.tenant,
                        synthesized_category(category_id),
                        designs.clone(),
                    );
                    self.spill_cache();
                }
                ApiResult::success(designs)
            }
            Err(err) => collapse(err),
        }
    }

    /// Probes candidate ids via the designs endpoint and reports which
    /// ones hold designs.
    ///
    /// Heuristic by construction: a real category with zero current
    /// designs reads as a miss. Probes run concurrently, at most five
    /// in flight; the single cache write happens after every probe has
    /// finished, and only when something was confirmed.
    pub async fn scan_categories(&self, candidates: &[String]) -> ApiResult<ScanReport> {
        let mut probes: Vec<(usize, String, Result<Vec<Design>, ApiError>)> =
            stream::iter(candidates.iter().enumerate().map(|(idx, candidate)| {
                let candidate = candidate.clone();
                async move {
                    let outcome = self.api.fetch_designs(&candidate).await;
                    (idx, candidate, outcome)
                }
            }))
            .buffer_unordered(SCAN_CONCURRENCY)
            .collect()
            .await;
        probes.sort_unstable_by_key(|probe| probe.0);

        let mut confirmed = Vec::new();
        let mut designs_by_category = HashMap::new();
        for (_, candidate, outcome) in probes {
            match outcome {
                Ok(designs) if !designs.is_empty() => {
                    confirmed.push(synthesized_category(&candidate));
                    designs_by_category.insert(candidate, designs);
                }
                Ok(_) => {}
                // Probe failures are misses, not scan failures.
                Err(err) => debug!(candidate = %candidate, error = %err, "scan probe failed"),
            }
        }

        if !confirmed.is_empty() {
            self.cache.replace(
                &self.tenant,
                CacheEntry::with_designs(confirmed.clone(), designs_by_category),
            );
            self.spill_cache();
        }
        let found = confirmed.len();
        ApiResult::success(ScanReport {
            categories: confirmed,
            found,
        })
    }

    // ── Projects ────────────────────────────────────────────────────

    /// Fetches a project's serialized state, passed through unchanged.
    pub async fn project(&self, project_id: &str) -> ApiResult<Value> {
        if project_id.trim().is_empty() {
            return ApiResult::failure("project id is required");
        }
        finish(self.api.fetch_project(project_id).await)
    }

    /// Requests print-ready PDF generation for a project.
    pub async fn render_pdf(&self, project_id: &str) -> ApiResult<Value> {
        if project_id.trim().is_empty() {
            return ApiResult::failure("project id is required");
        }
        finish(self.api.render_pdf(project_id).await)
    }

    /// Duplicates a project server-side.
    pub async fn clone_project(&self, project_id: &str) -> ApiResult<Value> {
        if project_id.trim().is_empty() {
            return ApiResult::failure("project id is required");
        }
        finish(self.api.clone_project(project_id).await)
    }

    /// Creates an empty project with the given canvas dimensions.
    pub async fn create_blank_project(
        &self,
        width: f64,
        height: f64,
        unit: &str,
    ) -> ApiResult<Value> {
        finish(self.api.create_project(width, height, unit).await)
    }

    /// Downloads the rasterized page archive for a project.
    pub async fn raster(&self, project_id: &str) -> ApiResult<Vec<u8>> {
        if project_id.trim().is_empty() {
            return ApiResult::failure("project id is required");
        }
        finish(self.api.fetch_raster(project_id).await)
    }

    // ── Cache management ────────────────────────────────────────────

    /// Snapshot of this tenant's cache entry, fresh or stale.
    pub fn cache_entry(&self) -> Option<CacheEntry> {
        self.cache.get(&self.tenant)
    }

    /// Drops this tenant's cache entry. Returns `true` if one existed.
    pub fn invalidate_cache(&self) -> bool {
        let removed = self.cache.invalidate(&self.tenant);
        if removed {
            self.spill_cache();
        }
        removed
    }

    /// Drops every tenant's cache entry.
    pub fn clear_cache(&self) {
        self.cache.clear();
        self.spill_cache();
    }

    pub fn cache_ttl(&self) -> Duration {
        self.ttl
    }

    /// Best-effort write-through; discovery data is re-fetchable, so a
    /// failed write only warns.
    fn spill_cache(&self) {
        let Some(path) = &self.cache_path else {
            return;
        };
        if let Err(err) = self.cache.persist(path) {
            warn!(error = %err, "failed to persist discovery cache");
        }
    }
}

// ── Collapse helpers ────────────────────────────────────────────────

/// Folds a client result into the outcome envelope.
fn finish<T>(result: Result<T, ApiError>) -> ApiResult<T> {
    match result {
        Ok(data) => ApiResult::success(data),
        Err(err) => collapse(err),
    }
}

/// Logs the typed error, then reduces it to a failure message. Provider
/// and response messages pass through verbatim; transport errors keep
/// their prefixed rendering.
fn collapse<T>(err: ApiError) -> ApiResult<T> {
    warn!(error = %err, "studio operation failed");
    let message = match err {
        ApiError::Provider { message }
        | ApiError::BadResponse { message }
        | ApiError::Config { message } => message,
        other => other.to_string(),
    };
    ApiResult::failure(message)
}

fn synthesized_category(id: &str) -> Category {
    Category {
        id: id.to_owned(),
        title: format!("Category {id}"),
    }
}

/// Provider message that names the category: the request itself was
/// authenticated, only the sentinel id was rejected.
fn mentions_category(err: &ApiError) -> bool {
    err.provider_message()
        .is_some_and(|m| m.to_lowercase().contains("category"))
}

/// Provider message indicating the account has no enumeration endpoint.
fn endpoint_unavailable(err: &ApiError) -> bool {
    err.provider_message().is_some_and(|m| {
        let m = m.to_lowercase();
        ["not found", "unknown", "unsupported"]
            .iter()
            .any(|needle| m.contains(needle))
    })
}
