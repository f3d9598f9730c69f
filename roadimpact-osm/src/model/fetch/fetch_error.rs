use roadimpact_core::model::Coordinate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("transient failure querying geodata service: {0}")]
    TransientFetchError(String),
    #[error("geodata service rejected the request: {0}")]
    RequestRejected(String),
    #[error("no road data found around {0}")]
    EmptyGraphError(Coordinate),
    #[error("limited road network data after {attempts} attempt(s): {reason}")]
    DegradedDataError { attempts: usize, reason: String },
    #[error("unable to build geodata client: {0}")]
    ClientBuildError(String),
    #[error("fetch around {0} was superseded by a newer request")]
    Cancelled(Coordinate),
}

impl FetchError {
    /// failures worth another attempt. everything else ends the retry loop.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::TransientFetchError(_))
    }
}
