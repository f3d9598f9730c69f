use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// identifier of an OSM node. ways sharing a node id meet at an intersection.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
#[serde(transparent)]
pub struct OsmNodeId(pub i64);

/// identifier of an OSM way. synthesized roads (fallback geometry) use negative ids.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
#[serde(transparent)]
pub struct OsmWayId(pub i64);

impl OsmWayId {
    /// id given to a road built from caller-supplied geometry instead of the graph.
    pub const SYNTHETIC: OsmWayId = OsmWayId(-1);

    pub fn is_synthetic(&self) -> bool {
        self.0 < 0
    }
}

impl Display for OsmNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for OsmWayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
