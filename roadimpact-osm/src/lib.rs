//! retrieval and presentation side of the road-network impact engine: Overpass query
//! and response models, a retrying and caching road graph fetcher, and the
//! coordinator that turns a classified network into per-hour render frames.
pub mod config;
pub mod model;
