pub mod fetch;
mod osm_cli_error;
pub mod overpass;
pub mod render;

pub use osm_cli_error::OsmCliError;
