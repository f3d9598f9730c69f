use crate::model::{
    ClassifiedRoad, ConnectionType, Coordinate, Highway, ImpactLevel, OsmWayId, PatternTable,
    RoadInfoHint, RoadSegmentRaw,
};
use serde::{Deserialize, Serialize};

/// the classified roads around one disruption. the main road never appears in
/// `connected_roads` or `nearby_roads`; both lists are sorted closest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadNetwork {
    pub main_road: Option<ClassifiedRoad>,
    pub connected_roads: Vec<ClassifiedRoad>,
    pub nearby_roads: Vec<ClassifiedRoad>,
    pub is_fallback: bool,
}

impl RoadNetwork {
    pub fn empty() -> RoadNetwork {
        RoadNetwork {
            main_road: None,
            connected_roads: vec![],
            nearby_roads: vec![],
            is_fallback: false,
        }
    }

    /// single-road network built from the hint's geometry alone. `None` when the
    /// hint carries no usable polyline. without a highway type in the hint, a name
    /// with an arterial keyword is taken as a trunk road.
    pub fn fallback(hint: &RoadInfoHint, center: &Coordinate) -> Option<RoadNetwork> {
        let coordinates = hint.polyline_or_none()?;
        let highway = match (&hint.highway, hint.name()) {
            (Some(highway), _) => highway.clone(),
            (None, Some(name)) if PatternTable::default().has_arterial_keyword(name) => {
                Highway::Trunk
            }
            (None, _) => Highway::Other(String::from("road")),
        };
        let lanes = highway.estimate_lanes();
        let road = RoadSegmentRaw {
            id: OsmWayId::SYNTHETIC,
            name: hint.name().map(String::from),
            max_speed_kph: highway.estimate_max_speed_kph(),
            width_meters: highway.estimate_width_meters(lanes),
            lanes,
            highway,
            coordinates,
            node_ids: vec![],
        };
        let distance = road.distance_to(center);
        let main_road = ClassifiedRoad {
            road,
            impact_level: ImpactLevel::Direct,
            impact_multiplier: 1.0,
            distance_to_disruption_meters: distance,
            connection_type: ConnectionType::Fallback,
            is_main_road: true,
        };
        Some(RoadNetwork {
            main_road: Some(main_road),
            connected_roads: vec![],
            nearby_roads: vec![],
            is_fallback: true,
        })
    }

    /// a copy with the main road's geometry replaced by the hint polyline. `None`
    /// when there is no main road or the hint has no usable polyline.
    pub fn with_hint_geometry(
        &self,
        hint: &RoadInfoHint,
        center: &Coordinate,
    ) -> Option<RoadNetwork> {
        let mut main_road = self.main_road.clone()?;
        if !main_road.apply_hint_geometry(hint, center) {
            return None;
        }
        Some(RoadNetwork {
            main_road: Some(main_road),
            ..self.clone()
        })
    }

    /// main road first, then connected, then nearby roads.
    pub fn iter_roads(&self) -> impl Iterator<Item = &ClassifiedRoad> {
        self.main_road
            .iter()
            .chain(self.connected_roads.iter())
            .chain(self.nearby_roads.iter())
    }

    pub fn len(&self) -> usize {
        self.iter_roads().count()
    }

    pub fn is_empty(&self) -> bool {
        self.main_road.is_none() && self.connected_roads.is_empty() && self.nearby_roads.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_requires_geometry() {
        let center = Coordinate::new(14.2, 121.15);
        assert!(RoadNetwork::fallback(&RoadInfoHint::named("Real Road"), &center).is_none());

        let hint = RoadInfoHint {
            road_name: Some(String::from("Real Road")),
            coordinates: Some(vec![
                Coordinate::new(14.2, 121.15),
                Coordinate::new(14.201, 121.151),
            ]),
            ..Default::default()
        };
        match RoadNetwork::fallback(&hint, &center) {
            Some(network) => {
                assert!(network.is_fallback);
                assert_eq!(network.len(), 1);
                match &network.main_road {
                    Some(main) => {
                        assert!(main.is_main_road);
                        assert_eq!(main.connection_type, ConnectionType::Fallback);
                        assert!(main.road.id.is_synthetic());
                    }
                    None => panic!("fallback should carry a main road"),
                }
            }
            None => panic!("hint with geometry should produce a fallback"),
        }
    }

    #[test]
    fn test_fallback_highway_from_name() {
        let center = Coordinate::new(14.2, 121.15);
        let coordinates = Some(vec![
            Coordinate::new(14.199, 121.15),
            Coordinate::new(14.201, 121.15),
        ]);
        let arterial = RoadInfoHint {
            road_name: Some(String::from("Maharlika Highway")),
            coordinates: coordinates.clone(),
            ..Default::default()
        };
        let plain = RoadInfoHint {
            road_name: Some(String::from("Real Road")),
            coordinates: coordinates.clone(),
            ..Default::default()
        };
        let tagged = RoadInfoHint {
            road_name: Some(String::from("Maharlika Highway")),
            coordinates,
            highway: Some(Highway::Secondary),
            ..Default::default()
        };
        let highway_of = |hint: &RoadInfoHint| match RoadNetwork::fallback(hint, &center) {
            Some(RoadNetwork {
                main_road: Some(main),
                ..
            }) => main.road.highway,
            other => panic!("expected a fallback main road, found {other:?}"),
        };
        assert_eq!(highway_of(&arterial), Highway::Trunk);
        assert_eq!(highway_of(&plain), Highway::Other(String::from("road")));
        assert_eq!(highway_of(&tagged), Highway::Secondary);
    }

    #[test]
    fn test_with_hint_geometry_leaves_other_roads() {
        let center = Coordinate::new(14.2, 121.15);
        let original = RoadInfoHint {
            road_name: Some(String::from("Real Road")),
            coordinates: Some(vec![Coordinate::new(14.19, 121.16), Coordinate::new(14.21, 121.16)]),
            ..Default::default()
        };
        let network = match RoadNetwork::fallback(&original, &center) {
            Some(network) => network,
            None => panic!("hint with geometry should produce a fallback"),
        };
        let line = vec![Coordinate::new(14.1995, 121.1501), Coordinate::new(14.2005, 121.1501)];
        let hint = RoadInfoHint {
            coordinates: Some(line.clone()),
            ..Default::default()
        };
        match network.with_hint_geometry(&hint, &center) {
            Some(updated) => {
                assert_eq!(updated.len(), network.len());
                assert_eq!(updated.is_fallback, network.is_fallback);
                match updated.main_road {
                    Some(main) => assert_eq!(main.road.coordinates, line),
                    None => panic!("main road should survive"),
                }
            }
            None => panic!("hint geometry should apply"),
        }
        assert!(network.with_hint_geometry(&RoadInfoHint::named("Real Road"), &center).is_none());
        assert!(RoadNetwork::empty().with_hint_geometry(&hint, &center).is_none());
    }

    #[test]
    fn test_empty() {
        let network = RoadNetwork::empty();
        assert!(network.is_empty());
        assert_eq!(network.len(), 0);
    }
}
