use crate::model::{OsmNodeId, OsmWayId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImpactError {
    #[error("malformed way '{0}': {1}")]
    ClassificationInputError(OsmWayId, String),
    #[error("node '{1}' referenced by way '{0}' not found in graph")]
    MissingNode(OsmWayId, OsmNodeId),
    #[error("invalid hourly severity: {0}")]
    InvalidSeverity(String),
    #[error("hour index {0} out of range for timeline of {1} hours")]
    HourOutOfRange(usize, usize),
    #[error("invalid road pattern '{0}': {1}")]
    InvalidPattern(String, String),
    #[error("invalid encoded polyline: {0}")]
    InvalidPolyline(String),
}
