//! In-memory caching using moka
//!
//! Travel lookups for the same member, venue and date return the same
//! answer for the life of an enquiry, so they are cached with a TTL.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache;
use serde::Serialize;
use tracing::info;

use crate::travel::TravelData;

/// Application cache holding travel-data lookups
#[derive(Clone)]
pub struct AppCache {
    /// Travel data (origin|destination|date -> TravelData)
    pub travel: Cache<String, Arc<TravelData>>,
}

impl AppCache {
    /// Create a new cache instance with the given capacity and TTL
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            travel: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            travel_entries: self.travel.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.travel.invalidate_all();
        info!("All caches invalidated");
    }

    /// Generate cache key for a travel lookup.
    /// Postcodes are compared case- and space-insensitively.
    pub fn travel_key(origin: &str, destination: &str, date: NaiveDate) -> String {
        fn squash(s: &str) -> String {
            s.split_whitespace().collect::<String>().to_uppercase()
        }
        format!("travel:{}:{}:{}", squash(origin), squash(destination), date)
    }
}

impl Default for AppCache {
    fn default() -> Self {
        // 2000 lookups, 6 hour TTL
        Self::new(2000, Duration::from_secs(6 * 60 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub travel_entries: u64,
}
