use crate::model::{Coordinate, OsmWayId, RoadInfoHint, RoadSegmentRaw};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// how strongly a road is affected by the disruption, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImpactLevel {
    Direct,
    High,
    MediumHigh,
    Medium,
    Low,
}

impl ImpactLevel {
    /// multiplier a road of this tier receives from the default rule table.
    pub fn base_multiplier(&self) -> f64 {
        match self {
            ImpactLevel::Direct => 0.95,
            ImpactLevel::High => 0.85,
            ImpactLevel::MediumHigh => 0.7,
            ImpactLevel::Medium => 0.5,
            ImpactLevel::Low => 0.35,
        }
    }
}

impl Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ImpactLevel::Direct => "direct",
            ImpactLevel::High => "high",
            ImpactLevel::MediumHigh => "medium-high",
            ImpactLevel::Medium => "medium",
            ImpactLevel::Low => "low",
        };
        write!(f, "{s}")
    }
}

/// why a road was included in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    Intersection,
    Proximity,
    CriticalCorridor,
    GoogleDirections,
    Fallback,
}

impl Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConnectionType::Intersection => "intersection",
            ConnectionType::Proximity => "proximity",
            ConnectionType::CriticalCorridor => "critical_corridor",
            ConnectionType::GoogleDirections => "google_directions",
            ConnectionType::Fallback => "fallback",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRoad {
    #[serde(flatten)]
    pub road: RoadSegmentRaw,
    pub impact_level: ImpactLevel,
    /// in (0, 1].
    pub impact_multiplier: f64,
    /// measured against the polyline, not only its vertices.
    pub distance_to_disruption_meters: f64,
    pub connection_type: ConnectionType,
    pub is_main_road: bool,
}

impl ClassifiedRoad {
    pub fn id(&self) -> OsmWayId {
        self.road.id
    }

    /// connected directly to the disruption, either through an intersection
    /// with the main road or by passing close to the center.
    pub fn is_directly_connected(&self) -> bool {
        matches!(
            self.impact_level,
            ImpactLevel::Direct | ImpactLevel::High
        ) && self.connection_type != ConnectionType::CriticalCorridor
    }

    /// replaces the geometry with the hint's polyline when it has a usable one,
    /// re-measuring the distance to `center`. returns whether the road changed.
    pub fn apply_hint_geometry(&mut self, hint: &RoadInfoHint, center: &Coordinate) -> bool {
        let Some(polyline) = hint.polyline_or_none() else {
            return false;
        };
        self.road.coordinates = polyline;
        self.distance_to_disruption_meters = self.road.distance_to(center);
        if hint.is_from_directions() {
            self.connection_type = ConnectionType::GoogleDirections;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Highway;

    #[test]
    fn test_serde_names() {
        let level = serde_json::to_string(&ImpactLevel::MediumHigh).unwrap();
        assert_eq!(level, "\"medium-high\"");
        let connection = serde_json::to_string(&ConnectionType::CriticalCorridor).unwrap();
        assert_eq!(connection, "\"critical_corridor\"");
        assert_eq!(ImpactLevel::MediumHigh.to_string(), "medium-high");
    }

    fn main_road() -> ClassifiedRoad {
        ClassifiedRoad {
            road: RoadSegmentRaw {
                id: OsmWayId(1),
                name: Some(String::from("Real Road")),
                highway: Highway::Primary,
                lanes: 2,
                max_speed_kph: 60,
                width_meters: 7.0,
                coordinates: vec![Coordinate::new(14.19, 121.16), Coordinate::new(14.21, 121.16)],
                node_ids: vec![],
            },
            impact_level: ImpactLevel::Direct,
            impact_multiplier: 1.0,
            distance_to_disruption_meters: 1000.0,
            connection_type: ConnectionType::Intersection,
            is_main_road: true,
        }
    }

    #[test]
    fn test_apply_hint_geometry() {
        let center = Coordinate::new(14.2, 121.15);
        let line = vec![Coordinate::new(14.1995, 121.1501), Coordinate::new(14.2005, 121.1501)];
        let hint = RoadInfoHint {
            coordinates: Some(line.clone()),
            ..Default::default()
        };
        let mut road = main_road();
        assert!(road.apply_hint_geometry(&hint, &center));
        assert_eq!(road.road.coordinates, line);
        assert!(road.distance_to_disruption_meters < 15.0);
        assert_eq!(road.connection_type, ConnectionType::Intersection);

        let mut untouched = main_road();
        assert!(!untouched.apply_hint_geometry(&RoadInfoHint::named("Real Road"), &center));
        assert_eq!(untouched, main_road());
    }

    #[test]
    fn test_levels_ordered_strongest_first() {
        assert!(ImpactLevel::Direct < ImpactLevel::High);
        assert!(ImpactLevel::Medium < ImpactLevel::Low);
        assert!(ImpactLevel::High.base_multiplier() > ImpactLevel::MediumHigh.base_multiplier());
    }
}
