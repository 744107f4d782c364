//! Offline cache for the event list.
//!
//! The last fetched snapshot is kept on disk so a restarted board can
//! show standings immediately while the first live fetch is in flight.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::EventRecord;

/// Consider cache stale after 5 minutes.
/// Live scores change quickly; the cache only bridges restarts within a session.
const CACHE_STALE_MINUTES: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        let now = Utc::now();
        (now - self.cached_at).num_minutes()
    }

    /// Human age, rounded to the nearest unit. Negative ages (clock
    /// skew) read as fresh.
    pub fn age_display(&self) -> String {
        match self.age_minutes() {
            m if m < 1 => "just now".to_string(),
            m if m < 60 => format!("{}m ago", m),
            m if m < 1440 => format!("{}h ago", (m + 30) / 60),
            m => format!("{}d ago", (m + 720) / 1440),
        }
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > CACHE_STALE_MINUTES
    }
}

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let path = self.cache_path(name);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    // ===== Events =====

    pub fn load_events(&self) -> Result<Option<CachedData<Vec<EventRecord>>>> {
        self.load("events")
    }

    pub fn save_events(&self, events: &[EventRecord]) -> Result<()> {
        self.save("events", &events)
    }

    pub fn clear_events(&self) -> Result<()> {
        let path = self.cache_path("events");
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove cache file: {}", path.display()))?;
        }
        Ok(())
    }

    // ===== Cache Age Information =====

    /// Age of the cached event list for display, "never" if absent.
    pub fn events_age(&self) -> String {
        match self.load_events() {
            Ok(Some(cached)) => cached.age_display(),
            Ok(None) => "never".to_string(),
            Err(e) => {
                debug!(error = %e, "Failed to load events cache for age display");
                "never".to_string()
            }
        }
    }

    /// Whether the cached event list needs refetching.
    pub fn events_stale(&self) -> bool {
        match self.load_events() {
            Ok(Some(cached)) => cached.is_stale(),
            Ok(None) => true, // No cache = stale
            Err(e) => {
                debug!(error = %e, "Failed to load events cache for staleness check");
                true // Error reading = treat as stale
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_cached_data_age_display_just_now() {
        let cached = CachedData::new(vec![1, 2, 3]);
        // Just created, should be "just now"
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn test_cached_data_is_stale() {
        let fresh = CachedData::new(vec![1]);
        assert!(!fresh.is_stale());

        // Create a cached data that's 6 minutes old
        let mut old = CachedData::new(vec![1]);
        old.cached_at = Utc::now() - Duration::minutes(6);
        assert!(old.is_stale());
    }

    #[test]
    fn test_cached_data_age_minutes() {
        let cached = CachedData::new(vec![1]);
        // Should be 0 or very close to 0
        assert!(cached.age_minutes() <= 1);
    }

    #[test]
    fn test_age_display_rounding() {
        let mut cached = CachedData::new(vec![1]);
        cached.cached_at = Utc::now() - Duration::minutes(45);
        assert_eq!(cached.age_display(), "45m ago");

        cached.cached_at = Utc::now() - Duration::minutes(95);
        assert_eq!(cached.age_display(), "2h ago");

        cached.cached_at = Utc::now() - Duration::minutes(70);
        assert_eq!(cached.age_display(), "1h ago");
    }
}
