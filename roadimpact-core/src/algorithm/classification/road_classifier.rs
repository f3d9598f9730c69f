use std::cmp::Ordering;

use super::{ClassifierConfig, Placement, RoadContext};
use crate::model::{
    ClassifiedRoad, ConnectionType, Coordinate, CorridorRule, CorridorRuleSet, ImpactLevel,
    RawNodes, RawWay, RoadFamily, RoadInfoHint, RoadNetwork, RoadSegmentRaw,
};

/// classifies the roads of a raw graph relative to a disruption center.
///
/// the pass runs in a fixed order:
///   1. ways with no vertex within the connectivity radius are discarded
///   2. unnamed, non-vehicular, short and minor ways are excluded, as are ways
///      matched by an active corridor's exclusion rules. critical roads are
///      never excluded for being short, minor or by a corridor
///   3. the main road is picked by hint name, falling back to the closest road
///   4. roads matching an active corridor's critical roads are force-included
///   5. every other road takes the tier of the first matching rule, or is dropped
///   6. both lists are sorted closest first and truncated
///
/// results depend only on the inputs: ties are broken by way id.
#[derive(Debug, Clone, Default)]
pub struct RoadClassifier {
    config: ClassifierConfig,
}

impl From<ClassifierConfig> for RoadClassifier {
    fn from(config: ClassifierConfig) -> Self {
        RoadClassifier { config }
    }
}

impl RoadClassifier {
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(
        &self,
        ways: &[RawWay],
        nodes: &RawNodes,
        center: &Coordinate,
        hint: Option<&RoadInfoHint>,
        corridors: &CorridorRuleSet,
    ) -> RoadNetwork {
        if ways.is_empty() {
            return RoadNetwork::empty();
        }
        let active = corridors.active(center).collect::<Vec<_>>();
        for corridor in active.iter() {
            log::debug!("corridor '{}' active at {center}", corridor.name);
        }

        let candidates = ways
            .iter()
            .filter_map(|way| match way.to_segment(nodes) {
                Ok(segment) => Some(segment),
                Err(e) => {
                    log::warn!("skipping way: {e}");
                    None
                }
            })
            .filter(|segment| {
                segment.vertex_distance_to(center) <= self.config.connectivity_radius_meters
            })
            .filter(|segment| match self.exclusion_reason(segment, &active) {
                Some(reason) => {
                    log::debug!("excluding way {} ({reason})", segment.id);
                    false
                }
                None => true,
            })
            .map(|segment| {
                let distance = segment.distance_to(center);
                (segment, distance)
            })
            .collect::<Vec<_>>();

        let main_idx = select_main_road(&candidates, hint);
        let main_road = main_idx.map(|idx| {
            let (segment, distance) = &candidates[idx];
            self.classify_main(segment.clone(), *distance, center, hint)
        });

        let mut connected_roads = vec![];
        let mut nearby_roads = vec![];
        for (idx, (segment, distance)) in candidates.iter().enumerate() {
            if Some(idx) == main_idx {
                continue;
            }
            if let Some((road, placement)) =
                self.classify_other(segment, *distance, main_road.as_ref(), &active)
            {
                match placement {
                    Placement::Connected => connected_roads.push(road),
                    Placement::Nearby => nearby_roads.push(road),
                }
            }
        }

        connected_roads.sort_by(closest_first);
        connected_roads.truncate(self.config.max_connected_roads);
        nearby_roads.sort_by(closest_first);
        nearby_roads.truncate(self.config.max_nearby_roads);

        log::info!(
            "classified {} ways at {center}: main road {}, {} connected, {} nearby",
            ways.len(),
            main_road
                .as_ref()
                .map(|m| m.road.name_or_empty().to_string())
                .unwrap_or_else(|| String::from("<none>")),
            connected_roads.len(),
            nearby_roads.len()
        );

        RoadNetwork {
            main_road,
            connected_roads,
            nearby_roads,
            is_fallback: false,
        }
    }

    fn is_critical(&self, segment: &RoadSegmentRaw, active: &[&CorridorRule]) -> bool {
        self.config.patterns.is_critical(segment.name_or_empty())
            || active.iter().any(|c| c.critical_match(segment).is_some())
    }

    fn exclusion_reason(
        &self,
        segment: &RoadSegmentRaw,
        active: &[&CorridorRule],
    ) -> Option<String> {
        if !segment.is_named() {
            return Some(String::from("unnamed"));
        }
        if segment.highway.is_non_vehicular() {
            return Some(format!("non-vehicular type {}", segment.highway));
        }
        if self.is_critical(segment, active) {
            return None;
        }
        if segment.highway.is_minor() {
            return Some(format!("minor type {}", segment.highway));
        }
        let length = segment.length_meters();
        if length < self.config.min_length_meters {
            return Some(format!("length {length:.1}m"));
        }
        active.iter().find_map(|corridor| {
            corridor.exclusion_match(segment).map(|rule| {
                format!(
                    "corridor '{}': {}",
                    corridor.name,
                    rule.reason.as_deref().unwrap_or("excluded")
                )
            })
        })
    }

    fn classify_main(
        &self,
        segment: RoadSegmentRaw,
        distance: f64,
        center: &Coordinate,
        hint: Option<&RoadInfoHint>,
    ) -> ClassifiedRoad {
        let mut road = ClassifiedRoad {
            road: segment,
            impact_level: ImpactLevel::Direct,
            impact_multiplier: 1.0,
            distance_to_disruption_meters: distance,
            connection_type: ConnectionType::Intersection,
            is_main_road: true,
        };
        if let Some(hint) = hint {
            road.apply_hint_geometry(hint, center);
        }
        road
    }

    fn classify_other(
        &self,
        segment: &RoadSegmentRaw,
        distance: f64,
        main_road: Option<&ClassifiedRoad>,
        active: &[&CorridorRule],
    ) -> Option<(ClassifiedRoad, Placement)> {
        let forced = active.iter().find_map(|corridor| {
            corridor
                .critical_match(segment)
                .map(|rule| (corridor.name.as_str(), rule.level()))
        });
        if let Some((corridor_name, level)) = forced {
            log::debug!(
                "way {} force-included by corridor '{corridor_name}'",
                segment.id
            );
            let road = ClassifiedRoad {
                road: segment.clone(),
                impact_level: level,
                impact_multiplier: self.config.critical_multiplier,
                distance_to_disruption_meters: distance,
                connection_type: ConnectionType::CriticalCorridor,
                is_main_road: false,
            };
            return Some((road, Placement::Connected));
        }

        let name = segment.name_or_empty();
        let keyword = self.config.patterns.has_arterial_keyword(name);
        let ctx = RoadContext {
            road: segment,
            distance_meters: distance,
            shares_node_with_main: main_road.is_some_and(|m| segment.shares_node_with(&m.road)),
            is_arterial: segment.highway.is_arterial() || keyword,
            is_trunk_like: segment.highway.family() == RoadFamily::Trunk || keyword,
            is_exit_route: self.config.patterns.is_exit_route(name),
        };
        let rule = self
            .config
            .rules
            .iter()
            .find(|rule| rule.predicate.matches(&ctx))?;
        log::debug!("way {} matched rule '{}'", segment.id, rule.name);
        let road = ClassifiedRoad {
            road: segment.clone(),
            impact_level: rule.impact_level,
            impact_multiplier: rule.multiplier,
            distance_to_disruption_meters: distance,
            connection_type: rule.connection_type,
            is_main_road: false,
        };
        Some((road, rule.placement))
    }
}

/// index of the main road: the closest road whose name contains the hint name (or is
/// contained by it), else the closest road.
fn select_main_road(
    candidates: &[(RoadSegmentRaw, f64)],
    hint: Option<&RoadInfoHint>,
) -> Option<usize> {
    let by_name = hint
        .and_then(|h| h.name())
        .map(str::to_lowercase)
        .and_then(|hint_name| {
            closest_matching(candidates, |segment| {
                let name = segment.name_or_empty().to_lowercase();
                !name.is_empty() && (name.contains(&hint_name) || hint_name.contains(&name))
            })
        });
    by_name.or_else(|| closest_matching(candidates, |_| true))
}

fn closest_matching(
    candidates: &[(RoadSegmentRaw, f64)],
    predicate: impl Fn(&RoadSegmentRaw) -> bool,
) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, (segment, _))| predicate(segment))
        .min_by(|(_, (a, da)), (_, (b, db))| da.total_cmp(db).then(a.id.cmp(&b.id)))
        .map(|(idx, _)| idx)
}

fn closest_first(a: &ClassifiedRoad, b: &ClassifiedRoad) -> Ordering {
    a.distance_to_disruption_meters
        .total_cmp(&b.distance_to_disruption_meters)
        .then(a.id().cmp(&b.id()))
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;
    use crate::model::{
        CriticalRoadRule, Highway, OsmNodeId, OsmWayId, RoadPattern,
    };

    const CENTER: Coordinate = Coordinate::new(14.2, 121.15);
    /// ~0.000009 degrees of latitude per meter
    const DEG_PER_M: f64 = 1.0 / 111_195.0;

    /// graph builder placing north-south ways at a given eastward offset from the center.
    struct Graph {
        nodes: RawNodes,
        ways: Vec<RawWay>,
        next_node: i64,
    }

    impl Graph {
        fn new() -> Graph {
            Graph {
                nodes: HashMap::new(),
                ways: vec![],
                next_node: 1000,
            }
        }

        fn node(&mut self, lat: f64, lng: f64) -> OsmNodeId {
            let id = OsmNodeId(self.next_node);
            self.next_node += 1;
            self.nodes.insert(id, Coordinate::new(lat, lng));
            id
        }

        /// a 400m north-south way offset `east_m` meters east of the center.
        fn way(&mut self, id: i64, name: &str, highway: &str, east_m: f64) -> Vec<OsmNodeId> {
            let lng = CENTER.lng + east_m * DEG_PER_M / CENTER.lat.to_radians().cos();
            let a = self.node(CENTER.lat - 200.0 * DEG_PER_M, lng);
            let b = self.node(CENTER.lat, lng);
            let c = self.node(CENTER.lat + 200.0 * DEG_PER_M, lng);
            self.push(id, name, highway, vec![a, b, c])
        }

        fn push(&mut self, id: i64, name: &str, highway: &str, nodes: Vec<OsmNodeId>) -> Vec<OsmNodeId> {
            let mut tags = HashMap::from([(String::from("highway"), String::from(highway))]);
            if !name.is_empty() {
                tags.insert(String::from("name"), String::from(name));
            }
            self.ways.push(RawWay {
                id: OsmWayId(id),
                node_ids: nodes.clone(),
                tags,
            });
            nodes
        }
    }

    fn classify(graph: &Graph, hint: Option<&RoadInfoHint>, corridors: &CorridorRuleSet) -> RoadNetwork {
        RoadClassifier::default().classify(&graph.ways, &graph.nodes, &CENTER, hint, corridors)
    }

    fn find(network: &RoadNetwork, id: i64) -> Option<&ClassifiedRoad> {
        network.iter_roads().find(|r| r.id() == OsmWayId(id))
    }

    #[test]
    fn test_empty_graph() {
        let network = classify(&Graph::new(), None, &CorridorRuleSet::default());
        assert_eq!(network, RoadNetwork::empty());
    }

    #[test]
    fn test_main_road_by_hint_and_exclusions() {
        let mut g = Graph::new();
        g.way(1, "Real Road", "secondary", 0.0);
        g.way(2, "Chipeco Avenue", "secondary", 50.0);
        g.way(3, "", "primary", 20.0);
        g.way(4, "Purok 2 Footpath", "footway", 10.0);
        g.way(5, "Mabini Street", "residential", 30.0);
        g.way(6, "Far Road", "primary", 5000.0);
        let network = classify(
            &g,
            Some(&RoadInfoHint::named("chipeco")),
            &CorridorRuleSet::default(),
        );
        match &network.main_road {
            Some(main) => {
                assert_eq!(main.id(), OsmWayId(2));
                assert!(main.is_main_road);
                assert_eq!(main.impact_level, ImpactLevel::Direct);
                assert_eq!(main.impact_multiplier, 1.0);
            }
            None => panic!("expected a main road"),
        }
        // not duplicated in the lists
        assert_eq!(network.iter_roads().filter(|r| r.id() == OsmWayId(2)).count(), 1);
        for excluded in [3, 4, 5, 6] {
            assert!(find(&network, excluded).is_none(), "way {excluded} should be excluded");
        }
        match find(&network, 1) {
            Some(road) => {
                assert_eq!(road.impact_level, ImpactLevel::Direct);
                assert_eq!(road.connection_type, ConnectionType::Proximity);
            }
            None => panic!("Real Road passes the center"),
        }
    }

    #[test]
    fn test_shared_node_is_high_and_connected() {
        let mut g = Graph::new();
        let main_nodes = g.way(1, "Real Road", "secondary", 0.0);
        // a primary road leaving the main road's north end eastward, starting ~200m from center
        let east = g.node(
            CENTER.lat + 200.0 * DEG_PER_M,
            CENTER.lng + 300.0 * DEG_PER_M,
        );
        g.push(2, "Halang Road", "primary", vec![main_nodes[2], east]);
        let network = classify(&g, None, &CorridorRuleSet::default());
        match network.connected_roads.iter().find(|r| r.id() == OsmWayId(2)) {
            Some(road) => {
                assert_eq!(road.impact_level, ImpactLevel::High);
                assert_eq!(road.impact_multiplier, 0.85);
                assert_eq!(road.connection_type, ConnectionType::Intersection);
            }
            None => panic!("Halang Road should be connected through the shared node"),
        }
    }

    #[test]
    fn test_force_include_from_corridor() {
        let mut g = Graph::new();
        g.way(1, "Real Road", "secondary", 0.0);
        // far enough that no distance tier applies to a primary road without access
        g.way(2, "National Highway", "primary", 550.0);
        let corridors = CorridorRuleSet::new(vec![CorridorRule {
            name: String::from("Crossing"),
            trigger_points: vec![CENTER],
            trigger_radius_meters: 300.0,
            critical_roads: vec![CriticalRoadRule {
                patterns: vec![RoadPattern::new("national highway").unwrap()],
                highway_types: HashSet::new(),
                impact_level: None,
                reason: None,
            }],
            exclude_roads: vec![],
        }]);
        let network = classify(&g, Some(&RoadInfoHint::named("Real Road")), &corridors);
        match find(&network, 2) {
            Some(road) => {
                assert_eq!(road.impact_level, ImpactLevel::High);
                assert_eq!(road.connection_type, ConnectionType::CriticalCorridor);
                assert_eq!(road.impact_multiplier, 0.95);
            }
            None => panic!("National Highway should be force-included"),
        }
    }

    #[test]
    fn test_tier_monotonicity_for_trunks() {
        let mut g = Graph::new();
        g.way(1, "Real Road", "secondary", 0.0);
        let offsets = [100.0, 200.0, 250.0, 350.0, 450.0, 550.0, 590.0];
        for (i, east_m) in offsets.iter().enumerate() {
            g.way(10 + i as i64, &format!("Trunk {i}"), "trunk", *east_m);
        }
        let network = classify(&g, Some(&RoadInfoHint::named("Real Road")), &CorridorRuleSet::default());
        let trunks = network
            .iter_roads()
            .filter(|r| r.road.highway == Highway::Trunk)
            .collect::<Vec<_>>();
        assert_eq!(trunks.len(), offsets.len());
        for a in trunks.iter() {
            for b in trunks.iter() {
                if a.distance_to_disruption_meters < b.distance_to_disruption_meters {
                    assert!(
                        a.impact_multiplier >= b.impact_multiplier,
                        "road at {:.0}m has {} < road at {:.0}m with {}",
                        a.distance_to_disruption_meters,
                        a.impact_multiplier,
                        b.distance_to_disruption_meters,
                        b.impact_multiplier
                    );
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let mut g = Graph::new();
        g.way(1, "Real Road", "secondary", 0.0);
        g.way(2, "Trunk A", "trunk", 250.0);
        g.way(3, "Trunk B", "trunk", 250.0);
        g.way(4, "Calamba Bypass", "tertiary", 400.0);
        let first = classify(&g, None, &CorridorRuleSet::default());
        let mut reversed = Graph::new();
        reversed.nodes = g.nodes.clone();
        reversed.ways = g.ways.iter().rev().cloned().collect();
        let second = classify(&reversed, None, &CorridorRuleSet::default());
        assert_eq!(first, second);
        let nearby_ids = first.nearby_roads.iter().map(|r| r.id()).collect::<Vec<_>>();
        assert_eq!(nearby_ids, vec![OsmWayId(2), OsmWayId(3)]);
        match find(&first, 4) {
            Some(road) => assert_eq!(road.connection_type, ConnectionType::Intersection),
            None => panic!("exit route should be connected"),
        }
    }

    #[test]
    fn test_malformed_way_skipped() {
        let mut g = Graph::new();
        g.way(1, "Real Road", "secondary", 0.0);
        g.push(2, "Broken Road", "primary", vec![OsmNodeId(1), OsmNodeId(2)]);
        let network = classify(&g, None, &CorridorRuleSet::default());
        assert_eq!(network.len(), 1);
    }

    #[test]
    fn test_hint_polyline_overrides_geometry() {
        let mut g = Graph::new();
        g.way(1, "Real Road", "secondary", 100.0);
        let hint = RoadInfoHint {
            road_name: Some(String::from("Real Road")),
            coordinates: Some(vec![
                Coordinate::new(CENTER.lat - 0.001, CENTER.lng),
                Coordinate::new(CENTER.lat + 0.001, CENTER.lng),
            ]),
            ..Default::default()
        };
        let network = classify(&g, Some(&hint), &CorridorRuleSet::default());
        match &network.main_road {
            Some(main) => {
                assert!(main.distance_to_disruption_meters < 1.0);
                assert_eq!(main.road.coordinates.len(), 2);
                assert_eq!(main.connection_type, ConnectionType::Intersection);
            }
            None => panic!("expected a main road"),
        }
    }
}
