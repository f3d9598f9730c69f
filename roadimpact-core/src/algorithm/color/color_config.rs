use crate::model::Rgb;
use serde::{Deserialize, Serialize};

/// start, mid and end colors of one severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPalette {
    pub start: Rgb,
    pub mid: Rgb,
    pub end: Rgb,
}

impl TierPalette {
    pub const fn new(start: Rgb, mid: Rgb, end: Rgb) -> TierPalette {
        TierPalette { start, mid, end }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub light: TierPalette,
    pub moderate: TierPalette,
    pub heavy: TierPalette,
    /// severity where the moderate tier begins.
    pub moderate_threshold: f64,
    /// severity where the heavy tier begins.
    pub heavy_threshold: f64,
    /// severity span over which the heavy tier reaches its end color.
    pub heavy_span: f64,
    /// color that weakly affected roads are pulled toward.
    pub blend_reference: Rgb,
    /// multipliers at or above this value are not blended.
    pub blend_start_multiplier: f64,
    /// blend weight gained per unit of multiplier below `blend_start_multiplier`.
    pub blend_rate: f64,
}

impl Default for ColorConfig {
    fn default() -> Self {
        let yellow = Rgb::new(234, 179, 8);
        let orange = Rgb::new(249, 115, 22);
        ColorConfig {
            light: TierPalette::new(Rgb::new(34, 197, 94), Rgb::new(132, 204, 22), yellow),
            moderate: TierPalette::new(yellow, Rgb::new(245, 158, 11), orange),
            heavy: TierPalette::new(orange, Rgb::new(239, 68, 68), Rgb::new(153, 27, 27)),
            moderate_threshold: 0.5,
            heavy_threshold: 1.2,
            heavy_span: 1.3,
            blend_reference: orange,
            blend_start_multiplier: 0.85,
            blend_rate: 0.8,
        }
    }
}
