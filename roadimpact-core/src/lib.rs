//! road-network impact engine for modeled traffic disruptions.
//!
//! given a disruption center and a raw OSM node/way graph, the [`algorithm::classification`]
//! module builds a [`model::RoadNetwork`] of the main road and its affected neighbors.
//! per simulated hour, [`algorithm::color`] and [`algorithm::extent`] derive the
//! congestion color and the visible reach of each road. all of it is synchronous
//! and free of I/O; retrieval lives in the `roadimpact-osm` crate.
pub mod algorithm;
mod error;
pub mod model;

pub use error::ImpactError;
