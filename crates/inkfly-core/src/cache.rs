// ── Discovery cache ──
//
// Lock-free storage for discovered categories and designs, keyed by
// credential fingerprint so two tenants sharing a process (or a cache
// file) never see each other's listings. Writes always replace the
// whole entry and stamp it with the write time; freshness checks
// compare that single timestamp against the caller's TTL.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CoreError;
use inkfly_api::{Category, Design};

/// Cache freshness horizon used when no TTL is configured.
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// Everything discovered for one tenant: the category listing plus any
/// design listings fetched so far, under one shared timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub categories: Vec<Category>,
    /// Design listings keyed by category id.
    pub designs: HashMap<String, Vec<Design>>,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            designs: HashMap::new(),
            fetched_at: Utc::now(),
        }
    }

    pub fn with_designs(categories: Vec<Category>, designs: HashMap<String, Vec<Design>>) -> Self {
        Self {
            categories,
            designs,
            fetched_at: Utc::now(),
        }
    }

    /// Time elapsed since this entry was last written.
    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }
}

/// Per-tenant discovery cache with optional JSON file persistence.
///
/// All reads are TTL-gated: a stale entry behaves exactly like a
/// missing one, and stays in the map until overwritten or invalidated.
#[derive(Debug, Default)]
pub struct DiscoveryCache {
    entries: DashMap<String, CacheEntry>,
}

impl DiscoveryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a cache file written by [`persist`](Self::persist).
    ///
    /// A missing or unreadable file yields an empty cache; discovery
    /// data is always re-fetchable, so load never fails.
    pub fn load(path: &Path) -> Self {
        let cache = Self::new();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!("no discovery cache at {}: {err}", path.display());
                return cache;
            }
        };
        match serde_json::from_str::<HashMap<String, CacheEntry>>(&raw) {
            Ok(entries) => {
                for (tenant, entry) in entries {
                    cache.entries.insert(tenant, entry);
                }
            }
            Err(err) => warn!("discarding unreadable discovery cache: {err}"),
        }
        cache
    }

    /// Writes the whole cache to `path` as pretty-printed JSON,
    /// creating parent directories as needed.
    pub fn persist(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        // BTreeMap keeps the file diff-stable across runs.
        let snapshot: BTreeMap<String, CacheEntry> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        Ok(())
    }

    // ── TTL-gated reads ─────────────────────────────────────────────

    pub fn categories(&self, tenant: &str, ttl: Duration) -> Option<Vec<Category>> {
        let entry = self.entries.get(tenant)?;
        if entry.age() < ttl {
            Some(entry.categories.clone())
        } else {
            None
        }
    }

    pub fn designs(&self, tenant: &str, category_id: &str, ttl: Duration) -> Option<Vec<Design>> {
        let entry = self.entries.get(tenant)?;
        if entry.age() < ttl {
            entry.designs.get(category_id).cloned()
        } else {
            None
        }
    }

    // ── Writes ──────────────────────────────────────────────────────

    /// Replaces the tenant's entry with a fresh category listing.
    /// Any previously recorded designs are dropped with the old entry.
    pub fn put_categories(&self, tenant: &str, categories: Vec<Category>) {
        self.entries
            .insert(tenant.to_owned(), CacheEntry::new(categories));
    }

    /// Merges one category's design listing into the tenant's entry,
    /// creating the entry if none exists. The category itself is added
    /// to the listing when absent so partial discovery accumulates.
    pub fn record_designs(&self, tenant: &str, category: Category, designs: Vec<Design>) {
        let mut entry = self
            .entries
            .get(tenant)
            .map(|e| e.value().clone())
            .unwrap_or_else(|| CacheEntry::new(Vec::new()));
        if !entry.categories.iter().any(|c| c.id == category.id) {
            entry.categories.push(category.clone());
        }
        entry.designs.insert(category.id, designs);
        entry.fetched_at = Utc::now();
        self.entries.insert(tenant.to_owned(), entry);
    }

    /// Installs a fully built entry, replacing whatever was there.
    pub fn replace(&self, tenant: impl Into<String>, entry: CacheEntry) {
        self.entries.insert(tenant.into(), entry);
    }

    // ── Inspection and removal ──────────────────────────────────────

    /// Snapshot of the tenant's entry regardless of freshness.
    pub fn get(&self, tenant: &str) -> Option<CacheEntry> {
        self.entries.get(tenant).map(|e| e.value().clone())
    }

    /// Drops the tenant's entry. Returns `true` if one existed.
    pub fn invalidate(&self, tenant: &str) -> bool {
        self.entries.remove(tenant).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    fn category(id: &str) -> Category {
        Category {
            id: id.to_owned(),
            title: format!("Category {id}"),
        }
    }

    fn design(id: &str) -> Design {
        Design {
            design_id: id.to_owned(),
            title: format!("Design {id}"),
        }
    }

    fn ttl() -> Duration {
        Duration::hours(DEFAULT_TTL_HOURS)
    }

    #[test]
    fn test_fresh_categories_are_served() {
        let cache = DiscoveryCache::new();
        cache.put_categories("t1", vec![category("cards")]);

        let hit = cache.categories("t1", ttl()).unwrap();
        assert_eq!(hit, vec![category("cards")]);
    }

    #[test]
    fn test_expired_entry_reads_as_missing_but_stays_stored() {
        let cache = DiscoveryCache::new();
        let stale = CacheEntry {
            categories: vec![category("cards")],
            designs: HashMap::new(),
            fetched_at: Utc::now() - Duration::hours(DEFAULT_TTL_HOURS + 1),
        };
        cache.replace("t1", stale);

        assert_eq!(cache.categories("t1", ttl()), None);
        assert_eq!(cache.designs("t1", "cards", ttl()), None);
        assert!(cache.get("t1").is_some());
    }

    #[test]
    fn test_tenants_are_isolated() {
        let cache = DiscoveryCache::new();
        cache.put_categories("t1", vec![category("cards")]);

        assert_eq!(cache.categories("t2", ttl()), None);
    }

    #[test]
    fn test_record_designs_accumulates_categories() {
        let cache = DiscoveryCache::new();
        cache.record_designs("t1", category("cards"), vec![design("d1")]);
        cache.record_designs("t1", category("flyers"), vec![design("d2")]);
        // Same category again must not duplicate the listing entry.
        cache.record_designs("t1", category("cards"), vec![design("d3")]);

        let entry = cache.get("t1").unwrap();
        assert_eq!(entry.categories.len(), 2);
        assert_eq!(cache.designs("t1", "cards", ttl()).unwrap(), vec![design("d3")]);
        assert_eq!(cache.designs("t1", "flyers", ttl()).unwrap(), vec![design("d2")]);
    }

    #[test]
    fn test_put_categories_replaces_whole_entry() {
        let cache = DiscoveryCache::new();
        cache.record_designs("t1", category("cards"), vec![design("d1")]);
        cache.put_categories("t1", vec![category("flyers")]);

        assert_eq!(cache.designs("t1", "cards", ttl()), None);
        assert_eq!(cache.categories("t1", ttl()).unwrap(), vec![category("flyers")]);
    }

    #[test]
    fn test_invalidate_reports_presence() {
        let cache = DiscoveryCache::new();
        cache.put_categories("t1", vec![]);

        assert!(cache.invalidate("t1"));
        assert!(!cache.invalidate("t1"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_empties_all_tenants() {
        let cache = DiscoveryCache::new();
        cache.put_categories("t1", vec![]);
        cache.put_categories("t2", vec![]);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_persist_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("discovery.json");

        let cache = DiscoveryCache::new();
        cache.put_categories("t1", vec![category("cards")]);
        cache.record_designs("t1", category("cards"), vec![design("d1")]);
        cache.persist(&path).unwrap();

        let reloaded = DiscoveryCache::load(&path);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.categories("t1", ttl()).unwrap(), vec![category("cards")]);
        assert_eq!(reloaded.designs("t1", "cards", ttl()).unwrap(), vec![design("d1")]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DiscoveryCache::load(&dir.path().join("absent.json"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discovery.json");
        fs::write(&path, "{ not json").unwrap();

        let cache = DiscoveryCache::load(&path);
        assert!(cache.is_empty());
    }
}
