//! Per-template status, with a short-lived cache to collapse repeated
//! queries during a single batch (spec.md §4.7, §9 "cached template status").

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use srtd_core::TemplateBuildState;

/// The default cache TTL. Deliberately short: long enough to collapse a
/// burst of `get_status` calls within one processing batch, short enough
/// that a stale read never survives past the next ledger write.
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_secs(1);

/// A point-in-time view of a single template, merging the shared and local
/// ledger entries (spec.md §3 `TemplateBuildState`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStatus {
    pub name: String,
    pub path: PathBuf,
    pub current_hash: String,
    pub wip: bool,
    pub build_state: TemplateBuildState,
}

struct CacheEntry {
    status: TemplateStatus,
    fetched_at: Instant,
}

/// A per-path, TTL-bounded memo of [`TemplateStatus`].
///
/// Explicit invalidation (`invalidate`) is used whenever a ledger write or
/// file change makes a cached entry stale; the TTL is a backstop for
/// entries nothing explicitly invalidated.
pub struct StatusCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

impl StatusCache {
    pub fn new(ttl: Duration) -> Self {
        StatusCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, relative_path: &str) -> Option<&TemplateStatus> {
        self.entries.get(relative_path).and_then(|entry| {
            if entry.fetched_at.elapsed() < self.ttl {
                Some(&entry.status)
            } else {
                None
            }
        })
    }

    pub fn put(&mut self, relative_path: &str, status: TemplateStatus) {
        self.entries.insert(
            relative_path.to_string(),
            CacheEntry {
                status,
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&mut self, relative_path: &str) {
        self.entries.remove(relative_path);
    }
}

impl Default for StatusCache {
    fn default() -> Self {
        StatusCache::new(DEFAULT_STATUS_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(hash: &str) -> TemplateStatus {
        TemplateStatus {
            name: "a".into(),
            path: PathBuf::from("/proj/templates/a.sql"),
            current_hash: hash.into(),
            wip: false,
            build_state: TemplateBuildState::default(),
        }
    }

    #[test]
    fn cached_entry_is_returned_within_ttl() {
        let mut cache = StatusCache::new(Duration::from_secs(10));
        cache.put("a.sql", status("h1"));
        assert_eq!(cache.get("a.sql").unwrap().current_hash, "h1");
    }

    #[test]
    fn expired_entry_is_not_returned() {
        let mut cache = StatusCache::new(Duration::from_millis(1));
        cache.put("a.sql", status("h1"));
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("a.sql").is_none());
    }

    #[test]
    fn invalidate_removes_entry_immediately() {
        let mut cache = StatusCache::new(Duration::from_secs(10));
        cache.put("a.sql", status("h1"));
        cache.invalidate("a.sql");
        assert!(cache.get("a.sql").is_none());
    }
}
