use std::collections::HashSet;

use crate::algorithm::geometry_ops;
use crate::model::road_pattern::any_match;
use crate::model::{Coordinate, Highway, ImpactLevel, RoadPattern, RoadSegmentRaw};
use serde::{Deserialize, Serialize};

/// a named stretch of road network with local knowledge about which roads a
/// disruption near it always or never affects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorridorRule {
    pub name: String,
    pub trigger_points: Vec<Coordinate>,
    pub trigger_radius_meters: f64,
    #[serde(default)]
    pub critical_roads: Vec<CriticalRoadRule>,
    #[serde(default)]
    pub exclude_roads: Vec<ExcludedRoadRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalRoadRule {
    #[serde(default)]
    pub patterns: Vec<RoadPattern>,
    #[serde(default)]
    pub highway_types: HashSet<Highway>,
    #[serde(default)]
    pub impact_level: Option<ImpactLevel>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedRoadRule {
    #[serde(default)]
    pub patterns: Vec<RoadPattern>,
    #[serde(default)]
    pub highway_types: HashSet<Highway>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// the corridors known for a city.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorridorRuleSet {
    #[serde(default)]
    pub corridors: Vec<CorridorRule>,
}

impl CorridorRule {
    /// `center` lies within the trigger radius of any trigger point.
    pub fn is_active(&self, center: &Coordinate) -> bool {
        self.trigger_points
            .iter()
            .any(|p| geometry_ops::haversine_meters(p, center) <= self.trigger_radius_meters)
    }

    /// the first critical-road rule matching this road.
    pub fn critical_match(&self, road: &RoadSegmentRaw) -> Option<&CriticalRoadRule> {
        self.critical_roads
            .iter()
            .find(|r| road_matches(&r.patterns, &r.highway_types, road))
    }

    pub fn exclusion_match(&self, road: &RoadSegmentRaw) -> Option<&ExcludedRoadRule> {
        self.exclude_roads
            .iter()
            .find(|r| road_matches(&r.patterns, &r.highway_types, road))
    }
}

impl CriticalRoadRule {
    pub fn level(&self) -> ImpactLevel {
        self.impact_level.unwrap_or(ImpactLevel::High)
    }
}

impl CorridorRuleSet {
    pub fn new(corridors: Vec<CorridorRule>) -> CorridorRuleSet {
        CorridorRuleSet { corridors }
    }

    pub fn active<'a>(&'a self, center: &'a Coordinate) -> impl Iterator<Item = &'a CorridorRule> {
        self.corridors.iter().filter(move |c| c.is_active(center))
    }
}

/// a rule with patterns requires the name to match; a rule with highway types
/// requires the type to match. a rule with neither matches nothing.
fn road_matches(
    patterns: &[RoadPattern],
    highway_types: &HashSet<Highway>,
    road: &RoadSegmentRaw,
) -> bool {
    if patterns.is_empty() && highway_types.is_empty() {
        return false;
    }
    let name_ok = patterns.is_empty() || any_match(patterns, road.name_or_empty());
    let type_ok = highway_types.is_empty() || highway_types.contains(&road.highway);
    name_ok && type_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OsmWayId;

    fn road(name: &str, highway: Highway) -> RoadSegmentRaw {
        RoadSegmentRaw {
            id: OsmWayId(1),
            name: Some(String::from(name)),
            highway,
            lanes: 4,
            max_speed_kph: 80,
            width_meters: 15.5,
            coordinates: vec![Coordinate::new(14.2, 121.15), Coordinate::new(14.21, 121.15)],
            node_ids: vec![],
        }
    }

    fn corridor() -> CorridorRule {
        CorridorRule {
            name: String::from("Crossing"),
            trigger_points: vec![Coordinate::new(14.2, 121.15)],
            trigger_radius_meters: 500.0,
            critical_roads: vec![CriticalRoadRule {
                patterns: vec![RoadPattern::new("national highway").unwrap()],
                highway_types: HashSet::new(),
                impact_level: None,
                reason: Some(String::from("main north-south artery")),
            }],
            exclude_roads: vec![ExcludedRoadRule {
                patterns: vec![],
                highway_types: HashSet::from([Highway::Tertiary]),
                reason: None,
            }],
        }
    }

    #[test]
    fn test_trigger_radius() {
        let c = corridor();
        assert!(c.is_active(&Coordinate::new(14.203, 121.15)));
        assert!(!c.is_active(&Coordinate::new(14.21, 121.15)));
    }

    #[test]
    fn test_critical_match_defaults_to_high() {
        let c = corridor();
        match c.critical_match(&road("National Highway", Highway::Trunk)) {
            Some(rule) => assert_eq!(rule.level(), ImpactLevel::High),
            None => panic!("National Highway should match"),
        }
        assert!(c.critical_match(&road("Real Road", Highway::Trunk)).is_none());
    }

    #[test]
    fn test_exclusion_by_type_only() {
        let c = corridor();
        assert!(c.exclusion_match(&road("Purok 3", Highway::Tertiary)).is_some());
        assert!(c.exclusion_match(&road("Purok 3", Highway::Secondary)).is_none());
    }
}
