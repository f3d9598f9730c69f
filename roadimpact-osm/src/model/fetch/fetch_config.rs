use serde::{Deserialize, Serialize};

use crate::model::overpass::FilterQuery;

/// parameters of the road graph query and its retry, timeout and caching policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Overpass interpreter endpoint.
    pub endpoint: String,
    pub user_agent: String,
    pub search_radius_meters: f64,
    /// server-side `[timeout:N]` of the query, in seconds.
    pub query_timeout_secs: u64,
    pub max_attempts: usize,
    /// client-side limit on a single attempt.
    pub attempt_timeout_ms: u64,
    /// backoff after failed attempt `n` (0-based) is `backoff_base_ms * 2^n`.
    pub backoff_base_ms: u64,
    pub cache_capacity: usize,
    /// decimal places of the lat/lng cache key. 4 is roughly 11 meters.
    pub cache_precision_decimals: i32,
    pub highway_types: Vec<String>,
    /// plain regular expressions sent to the server for the name filter.
    pub critical_name_patterns: Vec<String>,
    /// additional tag filters applied to the highway-type statement.
    pub extra_filters: Vec<FilterQuery>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from("https://overpass-api.de/api/interpreter"),
            user_agent: format!("roadimpact/{}", env!("CARGO_PKG_VERSION")),
            search_radius_meters: 900.0,
            query_timeout_secs: 25,
            max_attempts: 3,
            attempt_timeout_ms: 25_000,
            backoff_base_ms: 1_000,
            cache_capacity: 10,
            cache_precision_decimals: 4,
            highway_types: [
                "trunk",
                "trunk_link",
                "primary",
                "primary_link",
                "secondary",
                "secondary_link",
                "tertiary",
                "tertiary_link",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            critical_name_patterns: [
                "national",
                "maharlika",
                "highway",
                "manila south road",
                "slex",
                "south luzon expressway",
                "ipil",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            extra_filters: vec![],
        }
    }
}

impl FetchConfig {
    /// exponential backoff before the attempt following failed attempt `attempt`.
    pub fn backoff_ms(&self, attempt: usize) -> u64 {
        let exp = u32::try_from(attempt).unwrap_or(u32::MAX).min(16);
        self.backoff_base_ms.saturating_mul(2u64.pow(exp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let conf = FetchConfig::default();
        assert_eq!(conf.backoff_ms(0), 1_000);
        assert_eq!(conf.backoff_ms(1), 2_000);
        assert_eq!(conf.backoff_ms(2), 4_000);
    }

    #[test]
    fn test_partial_toml() {
        let toml_str = r#"
            max_attempts = 5
            extra_filters = ['["access"!="private"]']
        "#;
        match toml::from_str::<FetchConfig>(toml_str) {
            Ok(conf) => {
                assert_eq!(conf.max_attempts, 5);
                assert_eq!(conf.cache_capacity, 10);
                assert_eq!(conf.extra_filters.len(), 1);
            }
            Err(e) => panic!("{e}"),
        }
    }
}
