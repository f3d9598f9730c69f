use roadimpact_core::model::{ConnectionType, Coordinate, ImpactLevel, OsmWayId, Rgb};
use serde::{Deserialize, Serialize};

use super::ImpactStatus;

/// one road as drawn for one hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedSegment {
    pub road_id: OsmWayId,
    pub name: Option<String>,
    pub impact_level: ImpactLevel,
    pub connection_type: ConnectionType,
    pub is_main_road: bool,
    pub color: Rgb,
    pub extent_meters: f64,
    pub coordinates: Vec<Coordinate>,
    pub is_untrimmed: bool,
}

/// everything needed to draw the disruption at one hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub hour: u8,
    pub hour_index: usize,
    pub status: ImpactStatus,
    pub area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub segments: Vec<RenderedSegment>,
}
