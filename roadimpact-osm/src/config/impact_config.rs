use roadimpact_core::{
    algorithm::{
        classification::{ClassifierConfig, RoadClassifier},
        color::{ColorConfig, ImpactColorModel},
        extent::{ExtentConfig, SegmentExtentCalculator},
    },
    model::AreaTable,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::model::{fetch::FetchConfig, OsmCliError};

/// all parameters of a roadimpact run. every section is optional and falls back
/// to its defaults.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct ImpactConfiguration {
    pub fetch: FetchConfig,
    pub classifier: ClassifierConfig,
    pub extent: ExtentConfig,
    pub color: ColorConfig,
    pub areas: AreaTable,
}

impl ImpactConfiguration {
    pub fn road_classifier(&self) -> RoadClassifier {
        RoadClassifier::from(self.classifier.clone())
    }

    /// the extent calculator shares the classifier's road-name patterns.
    pub fn extent_calculator(&self) -> SegmentExtentCalculator {
        SegmentExtentCalculator::new(self.extent.clone(), self.classifier.patterns.clone())
    }

    pub fn color_model(&self) -> ImpactColorModel {
        ImpactColorModel::from(self.color.clone())
    }
}

impl TryFrom<&String> for ImpactConfiguration {
    type Error = OsmCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        read_config_file(f)
    }
}

/// reads a `.toml` or `.json` file into `T`.
pub fn read_config_file<T: DeserializeOwned>(f: &str) -> Result<T, OsmCliError> {
    if f.ends_with(".toml") {
        let s = std::fs::read_to_string(f)
            .map_err(|e| OsmCliError::ConfigurationError(format!("failure reading {f}: {e}")))?;
        toml::from_str(&s)
            .map_err(|e| OsmCliError::ConfigurationError(format!("failure decoding {f}: {e}")))
    } else if f.ends_with(".json") {
        let s = std::fs::read_to_string(f)
            .map_err(|e| OsmCliError::ConfigurationError(format!("failure reading {f}: {e}")))?;
        serde_json::from_str(&s)
            .map_err(|e| OsmCliError::ConfigurationError(format!("failure decoding {f}: {e}")))
    } else {
        Err(OsmCliError::ConfigurationError(format!(
            "unsupported file type: {f}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadimpact_core::model::{Coordinate, CorridorRuleSet};

    #[test]
    fn test_partial_toml() {
        let toml_str = r#"
            [fetch]
            search_radius_meters = 1200.0

            [classifier]
            max_connected_roads = 5

            [classifier.patterns]
            exit_routes = ["\\bbypass\\b"]

            [areas]
            default_area = "Los Banos"
            areas = []
        "#;
        match toml::from_str::<ImpactConfiguration>(toml_str) {
            Ok(conf) => {
                assert_eq!(conf.fetch.search_radius_meters, 1200.0);
                assert_eq!(conf.fetch.max_attempts, 3);
                assert_eq!(conf.classifier.max_connected_roads, 5);
                assert_eq!(conf.classifier.max_nearby_roads, 8);
                assert!(conf.classifier.patterns.is_exit_route("Calamba Bypass"));
                assert_eq!(conf.extent, ExtentConfig::default());
                assert_eq!(
                    conf.areas.area_name(&Coordinate::new(14.2, 121.15)),
                    "Los Banos"
                );
            }
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn test_corridor_json() {
        let json = r#"{
            "corridors": [{
                "name": "Real-Crossing",
                "trigger_points": [{ "lat": 14.2, "lng": 121.15 }],
                "trigger_radius_meters": 500.0,
                "critical_roads": [{ "patterns": ["maharlika"], "impact_level": "medium-high" }],
                "exclude_roads": [{ "highway_types": ["tertiary"], "reason": "parallel street" }]
            }]
        }"#;
        match serde_json::from_str::<CorridorRuleSet>(json) {
            Ok(rules) => {
                assert_eq!(rules.corridors.len(), 1);
                let center = Coordinate::new(14.2, 121.15);
                assert_eq!(rules.active(&center).count(), 1);
            }
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let f = String::from("impact.yaml");
        match ImpactConfiguration::try_from(&f) {
            Err(OsmCliError::ConfigurationError(msg)) => assert!(msg.contains("unsupported")),
            other => panic!("expected configuration error, found {other:?}"),
        }
    }
}
