use crate::algorithm::geometry_ops;
use crate::model::{Coordinate, Highway, OsmNodeId, OsmWayId};
use serde::{Deserialize, Serialize};

/// one drivable way from the road graph, with tags resolved into typed attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegmentRaw {
    pub id: OsmWayId,
    /// `name` tag, or the `ref` tag when the way has no name.
    pub name: Option<String>,
    pub highway: Highway,
    pub lanes: u32,
    pub max_speed_kph: u32,
    pub width_meters: f64,
    /// ordered polyline, at least two points.
    pub coordinates: Vec<Coordinate>,
    /// graph nodes of the polyline, used to detect shared intersections.
    /// empty for roads synthesized from caller geometry.
    #[serde(default)]
    pub node_ids: Vec<OsmNodeId>,
}

impl RoadSegmentRaw {
    pub fn length_meters(&self) -> f64 {
        geometry_ops::polyline_length_meters(&self.coordinates)
    }

    /// minimum distance from `p` to any point on this road's polyline.
    pub fn distance_to(&self, p: &Coordinate) -> f64 {
        geometry_ops::distance_to_polyline_meters(p, &self.coordinates)
    }

    /// minimum distance from `p` to any vertex of this road.
    pub fn vertex_distance_to(&self, p: &Coordinate) -> f64 {
        geometry_ops::min_vertex_distance_meters(p, &self.coordinates)
    }

    pub fn shares_node_with(&self, other: &RoadSegmentRaw) -> bool {
        self.node_ids.iter().any(|n| other.node_ids.contains(n))
    }

    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn is_named(&self) -> bool {
        self.name.as_ref().is_some_and(|n| !n.trim().is_empty())
    }
}
