use super::trim_ops::{self, DirectionMode, TrimParams, TrimmedPath};
use super::ExtentConfig;
use crate::model::{ClassifiedRoad, Coordinate, HourlySeverity, PatternTable};
use serde::{Deserialize, Serialize};

/// road class deciding the base reach and trimming direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtentClass {
    /// trunk/primary type or an arterial keyword in the name.
    Arterial,
    /// residential/unclassified type or a local-street name.
    Local,
    /// intersects the main road or passes near the center.
    Intersecting,
    Other,
}

/// decides how far along each road the impact of an hour reaches.
#[derive(Debug, Clone, Default)]
pub struct SegmentExtentCalculator {
    config: ExtentConfig,
    patterns: PatternTable,
}

impl SegmentExtentCalculator {
    pub fn new(config: ExtentConfig, patterns: PatternTable) -> SegmentExtentCalculator {
        SegmentExtentCalculator { config, patterns }
    }

    pub fn extent_class(&self, road: &ClassifiedRoad) -> ExtentClass {
        let name = road.road.name_or_empty();
        if road.road.highway.is_arterial() || self.patterns.has_arterial_keyword(name) {
            ExtentClass::Arterial
        } else if road.road.highway.is_minor() || self.patterns.is_local_road(name) {
            ExtentClass::Local
        } else if road.is_directly_connected() {
            ExtentClass::Intersecting
        } else {
            ExtentClass::Other
        }
    }

    pub fn direction_mode(&self, road: &ClassifiedRoad) -> DirectionMode {
        match self.extent_class(road) {
            ExtentClass::Arterial => DirectionMode::Bidirectional,
            ExtentClass::Local => DirectionMode::Minimal,
            ExtentClass::Intersecting | ExtentClass::Other => DirectionMode::FeederBiased,
        }
    }

    pub fn base_distance_meters(&self, road: &ClassifiedRoad) -> f64 {
        let base = &self.config.base_distances;
        match (self.extent_class(road), road.is_main_road) {
            (ExtentClass::Local, true) => base.local_main,
            (ExtentClass::Local, false) => base.local_other,
            (ExtentClass::Arterial, true) => base.arterial_main,
            (ExtentClass::Arterial, false) => base.arterial_other,
            (ExtentClass::Intersecting, _) => base.intersecting,
            (ExtentClass::Other, _) => base.other,
        }
    }

    pub fn severity_factor(&self, severity: f64, is_main_road: bool) -> f64 {
        self.config
            .severity_bands
            .iter()
            .find(|band| severity >= band.min_severity)
            .map(|band| {
                if is_main_road {
                    band.main_factor
                } else {
                    band.connected_factor
                }
            })
            .unwrap_or(1.0)
    }

    /// peak-hour and rush-band multipliers, which stack.
    pub fn peak_multiplier(&self, hour: u8, severity: f64) -> f64 {
        let c = &self.config;
        let peak = if severity >= c.peak_min_severity && c.peak_hours.contains(&hour) {
            c.peak_multiplier
        } else {
            1.0
        };
        let rush = if severity >= c.rush_min_severity
            && c.rush_hours.iter().any(|r| r.contains(hour))
        {
            c.rush_multiplier
        } else {
            1.0
        };
        peak * rush
    }

    pub fn delay_multiplier(&self, delay_minutes: f64, is_main_road: bool) -> f64 {
        let c = &self.config;
        let delay = delay_minutes.max(0.0);
        if is_main_road {
            (1.0 + delay / c.main_delay_divisor).min(c.main_delay_cap)
        } else {
            (1.0 + delay / c.connected_delay_divisor).min(c.connected_delay_cap)
        }
    }

    /// base distance x severity factor x peak multiplier x delay multiplier.
    pub fn extent_meters(&self, road: &ClassifiedRoad, hour: &HourlySeverity) -> f64 {
        self.base_distance_meters(road)
            * self.severity_factor(hour.severity, road.is_main_road)
            * self.peak_multiplier(hour.hour, hour.severity)
            * self.delay_multiplier(hour.delay_minutes, road.is_main_road)
    }

    /// the road's geometry trimmed to this hour's extent.
    pub fn trimmed_path(
        &self,
        road: &ClassifiedRoad,
        center: &Coordinate,
        hour: &HourlySeverity,
    ) -> (f64, TrimmedPath) {
        let extent_meters = self.extent_meters(road, hour);
        let params = TrimParams {
            extent_meters,
            mode: self.direction_mode(road),
            near_side_fraction: self.config.feeder_near_side_fraction,
            fade_tail_points: self.config.fade_tail_points,
            fade_step_meters: self.config.fade_step_meters,
        };
        (
            extent_meters,
            trim_ops::trim(&road.road.coordinates, center, &params),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ConnectionType, Highway, ImpactLevel, OsmWayId, RoadInfoHint, RoadNetwork, RoadSegmentRaw,
    };

    fn road(name: &str, highway: Highway, level: ImpactLevel, is_main_road: bool) -> ClassifiedRoad {
        ClassifiedRoad {
            road: RoadSegmentRaw {
                id: OsmWayId(1),
                name: Some(String::from(name)),
                highway,
                lanes: 2,
                max_speed_kph: 50,
                width_meters: 7.5,
                coordinates: vec![Coordinate::new(14.2, 121.15), Coordinate::new(14.21, 121.15)],
                node_ids: vec![],
            },
            impact_level: level,
            impact_multiplier: level.base_multiplier(),
            distance_to_disruption_meters: 0.0,
            connection_type: ConnectionType::Proximity,
            is_main_road,
        }
    }

    fn hour(hour: u8, severity: f64, delay_minutes: f64) -> HourlySeverity {
        HourlySeverity::new(hour, severity, delay_minutes, None).unwrap()
    }

    #[test]
    fn test_base_distances() {
        let calc = SegmentExtentCalculator::default();
        let main = road("Maharlika Highway", Highway::Secondary, ImpactLevel::Direct, true);
        assert_eq!(calc.base_distance_meters(&main), 900.0);
        let local = road("Mabini", Highway::Residential, ImpactLevel::High, false);
        assert_eq!(calc.base_distance_meters(&local), 10.0);
        let intersecting = road("Real Road", Highway::Secondary, ImpactLevel::High, false);
        assert_eq!(calc.base_distance_meters(&intersecting), 350.0);
        let other = road("Real Road", Highway::Tertiary, ImpactLevel::Low, false);
        assert_eq!(calc.base_distance_meters(&other), 250.0);
        assert_eq!(calc.direction_mode(&main), DirectionMode::Bidirectional);
        assert_eq!(calc.direction_mode(&local), DirectionMode::Minimal);
        assert_eq!(calc.direction_mode(&other), DirectionMode::FeederBiased);
    }

    #[test]
    fn test_peak_and_rush_stack() {
        let calc = SegmentExtentCalculator::default();
        assert!((calc.peak_multiplier(8, 1.6) - 1.32).abs() < 1e-12);
        assert!((calc.peak_multiplier(6, 1.6) - 1.1).abs() < 1e-12);
        assert!((calc.peak_multiplier(8, 1.2) - 1.1).abs() < 1e-12);
        assert_eq!(calc.peak_multiplier(12, 3.0), 1.0);
        assert_eq!(calc.peak_multiplier(8, 0.9), 1.0);
    }

    #[test]
    fn test_extent_example() {
        let calc = SegmentExtentCalculator::default();
        let main = road("National Highway", Highway::Trunk, ImpactLevel::Direct, true);
        // 900 * 3.2 * 1.2 * 1.1 * min(1 + 35/35, 1.4)
        let expected = 900.0 * 3.2 * 1.2 * 1.1 * 1.4;
        let found = calc.extent_meters(&main, &hour(18, 1.7, 35.0));
        assert!((found - expected).abs() < 1e-9, "expected {expected}, found {found}");
    }

    #[test]
    fn test_connected_extent_grows_with_severity() {
        let calc = SegmentExtentCalculator::default();
        let mut connected = road("Real Road", Highway::Secondary, ImpactLevel::MediumHigh, false);
        connected.distance_to_disruption_meters = 150.0;
        connected.impact_multiplier = 0.7;
        let extents: Vec<f64> = [0.2, 1.0, 2.0]
            .iter()
            .map(|severity| calc.extent_meters(&connected, &hour(12, *severity, 0.0)))
            .collect();
        assert!(
            extents.windows(2).all(|w| w[0] < w[1]),
            "extents should strictly increase, found {extents:?}"
        );
        // 250 m base with the 0.8, 1.8 and 3.5 connected factors
        for (found, expected) in extents.iter().zip([200.0, 450.0, 875.0]) {
            assert!((found - expected).abs() < 1e-9, "expected {expected}, found {found}");
        }
    }

    #[test]
    fn test_fallback_named_highway_is_arterial() {
        let hint = RoadInfoHint {
            road_name: Some(String::from("Maharlika Highway")),
            coordinates: Some(vec![Coordinate::new(14.199, 121.15), Coordinate::new(14.201, 121.15)]),
            ..Default::default()
        };
        let main = match RoadNetwork::fallback(&hint, &Coordinate::new(14.2, 121.15)) {
            Some(RoadNetwork {
                main_road: Some(main),
                ..
            }) => main,
            other => panic!("expected a fallback main road, found {other:?}"),
        };
        // holds even when the configured patterns carry no arterial keywords
        let patterns = PatternTable {
            arterial_keywords: vec![],
            ..Default::default()
        };
        let calc = SegmentExtentCalculator::new(ExtentConfig::default(), patterns);
        assert_eq!(calc.extent_class(&main), ExtentClass::Arterial);
        assert_eq!(calc.base_distance_meters(&main), 900.0);
    }

    #[test]
    fn test_extent_monotonic() {
        let calc = SegmentExtentCalculator::default();
        let roads = [
            road("National Highway", Highway::Trunk, ImpactLevel::Direct, true),
            road("Real Road", Highway::Secondary, ImpactLevel::High, false),
            road("Mabini", Highway::Residential, ImpactLevel::Low, false),
        ];
        for r in roads.iter() {
            for h in 0..24u8 {
                let mut previous = 0.0;
                for step in 0..=60 {
                    let severity = step as f64 * 0.05;
                    let extent = calc.extent_meters(r, &hour(h, severity, 20.0));
                    assert!(extent >= previous, "extent fell at hour {h}, severity {severity}");
                    previous = extent;
                }
                let mut previous = 0.0;
                for delay in 0..=60 {
                    let extent = calc.extent_meters(r, &hour(h, 1.0, delay as f64));
                    assert!(extent >= previous, "extent fell at hour {h}, delay {delay}");
                    previous = extent;
                }
            }
        }
    }
}
