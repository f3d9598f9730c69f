//! turns a raw node/way graph around a disruption into a [`crate::model::RoadNetwork`].
mod classifier_config;
mod road_classifier;
mod tier_rule;

pub use classifier_config::ClassifierConfig;
pub use road_classifier::RoadClassifier;
pub use tier_rule::{Placement, RoadContext, RulePredicate, TierRule};
