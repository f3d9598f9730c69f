use super::TierRule;
use crate::model::PatternTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// ways with no vertex within this distance of the center are discarded.
    #[serde(default = "ClassifierConfig::default_connectivity_radius")]
    pub connectivity_radius_meters: f64,
    /// shorter ways are discarded unless they are critical roads.
    #[serde(default = "ClassifierConfig::default_min_length")]
    pub min_length_meters: f64,
    #[serde(default = "ClassifierConfig::default_max_connected")]
    pub max_connected_roads: usize,
    #[serde(default = "ClassifierConfig::default_max_nearby")]
    pub max_nearby_roads: usize,
    /// multiplier given to roads force-included by a corridor rule.
    #[serde(default = "ClassifierConfig::default_critical_multiplier")]
    pub critical_multiplier: f64,
    #[serde(default = "TierRule::default_rules")]
    pub rules: Vec<TierRule>,
    #[serde(default)]
    pub patterns: PatternTable,
}

impl ClassifierConfig {
    fn default_connectivity_radius() -> f64 {
        600.0
    }
    fn default_min_length() -> f64 {
        50.0
    }
    fn default_max_connected() -> usize {
        15
    }
    fn default_max_nearby() -> usize {
        8
    }
    fn default_critical_multiplier() -> f64 {
        0.95
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            connectivity_radius_meters: Self::default_connectivity_radius(),
            min_length_meters: Self::default_min_length(),
            max_connected_roads: Self::default_max_connected(),
            max_nearby_roads: Self::default_max_nearby(),
            critical_multiplier: Self::default_critical_multiplier(),
            rules: TierRule::default_rules(),
            patterns: PatternTable::default(),
        }
    }
}
