use roadimpact_core::ImpactError;
use thiserror::Error;

use super::fetch::FetchError;

#[derive(Error, Debug)]
pub enum OsmCliError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("failure retrieving road network: {source}")]
    FetchError {
        #[from]
        source: FetchError,
    },
    #[error("failure rendering road network: {source}")]
    ImpactError {
        #[from]
        source: ImpactError,
    },
    #[error("failure reading input: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure encoding or decoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
}
