mod fetch_config;
mod fetch_error;
mod fetch_token;
mod fetcher;
mod geodata_service;
mod network_cache;
mod overpass_client;
#[cfg(test)]
pub(crate) mod scripted_service;

pub use fetch_config::FetchConfig;
pub use fetch_error::FetchError;
pub use fetch_token::{FetchToken, InFlightTracker};
pub use fetcher::{FetchOutcome, RoadGraphFetcher};
pub use geodata_service::GeodataService;
pub use network_cache::{CacheKey, NetworkCache};
pub use overpass_client::OverpassClient;
