mod color_config;
mod impact_color_model;

pub use color_config::{ColorConfig, TierPalette};
pub use impact_color_model::ImpactColorModel;
