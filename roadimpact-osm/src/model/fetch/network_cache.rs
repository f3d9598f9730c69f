use std::sync::Arc;

use lru::LruCache;
use roadimpact_core::model::{Coordinate, RoadNetwork};

/// a disruption center quantized to a fixed number of decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    lat: i64,
    lng: i64,
}

impl CacheKey {
    pub fn new(center: &Coordinate, precision_decimals: i32) -> CacheKey {
        let scale = 10f64.powi(precision_decimals);
        CacheKey {
            lat: (center.lat * scale).round() as i64,
            lng: (center.lng * scale).round() as i64,
        }
    }
}

/// bounded cache of classified networks. once over capacity, the oldest
/// insertion is evicted regardless of how recently it was read: reads go through
/// `peek`, which leaves the recency order untouched.
pub struct NetworkCache {
    precision_decimals: i32,
    entries: LruCache<CacheKey, Arc<RoadNetwork>>,
}

impl NetworkCache {
    pub fn new(capacity: usize, precision_decimals: i32) -> NetworkCache {
        NetworkCache {
            precision_decimals,
            entries: LruCache::new(capacity),
        }
    }

    pub fn key(&self, center: &Coordinate) -> CacheKey {
        CacheKey::new(center, self.precision_decimals)
    }

    pub fn get(&self, center: &Coordinate) -> Option<Arc<RoadNetwork>> {
        self.entries.peek(&self.key(center)).cloned()
    }

    /// replacing an existing entry keeps its original insertion position.
    pub fn insert(&mut self, center: &Coordinate, network: Arc<RoadNetwork>) {
        let key = self.key(center);
        if let Some(existing) = self.entries.peek_mut(&key) {
            *existing = network;
            return;
        }
        if let Some((evicted, _)) = self.entries.push(key, network) {
            log::debug!("evicted cached network {evicted:?}");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
