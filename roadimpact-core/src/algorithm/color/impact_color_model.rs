use super::{ColorConfig, TierPalette};
use crate::model::{ClassifiedRoad, HourlySeverity, ImpactLevel, Rgb};

/// maps a road's impact and the hour's severity to a congestion color.
///
/// severity picks a tier (light, moderate, heavy) and a position `p` within it,
/// and the color runs start -> mid -> end over `p`. tiers share endpoint colors, so
/// the mapping is continuous in severity. roads with a multiplier below the blend
/// start are pulled toward the reference color, with a weight that grows linearly
/// from zero.
#[derive(Debug, Clone, Default)]
pub struct ImpactColorModel {
    config: ColorConfig,
}

impl From<ColorConfig> for ImpactColorModel {
    fn from(config: ColorConfig) -> Self {
        ImpactColorModel { config }
    }
}

impl ImpactColorModel {
    pub fn color_for(&self, road: &ClassifiedRoad, hour: &HourlySeverity) -> Rgb {
        self.color_for_multiplier(road.impact_multiplier, hour.severity)
    }

    pub fn color_for_level(&self, level: ImpactLevel, severity: f64) -> Rgb {
        self.color_for_multiplier(level.base_multiplier(), severity)
    }

    pub fn color_for_multiplier(&self, multiplier: f64, severity: f64) -> Rgb {
        let c = &self.config;
        let severity = if severity.is_finite() {
            severity.max(0.0)
        } else {
            0.0
        };
        let (palette, p) = if severity < c.moderate_threshold {
            (&c.light, severity / c.moderate_threshold)
        } else if severity < c.heavy_threshold {
            (
                &c.moderate,
                (severity - c.moderate_threshold) / (c.heavy_threshold - c.moderate_threshold),
            )
        } else {
            (
                &c.heavy,
                ((severity - c.heavy_threshold) / c.heavy_span).min(1.0),
            )
        };
        let base = along_palette(palette, p);
        let weight = self.blend_weight(multiplier);
        let reference = channels(&c.blend_reference);
        to_rgb(lerp3(base, reference, weight))
    }

    /// zero at and above the blend start, linear below it, at most one.
    pub fn blend_weight(&self, multiplier: f64) -> f64 {
        ((self.config.blend_start_multiplier - multiplier).max(0.0) * self.config.blend_rate)
            .min(1.0)
    }
}

fn along_palette(palette: &TierPalette, p: f64) -> [f64; 3] {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        lerp3(channels(&palette.start), channels(&palette.mid), p * 2.0)
    } else {
        lerp3(channels(&palette.mid), channels(&palette.end), (p - 0.5) * 2.0)
    }
}

fn channels(rgb: &Rgb) -> [f64; 3] {
    [rgb.r as f64, rgb.g as f64, rgb.b as f64]
}

fn lerp3(a: [f64; 3], b: [f64; 3], t: f64) -> [f64; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

fn to_rgb(c: [f64; 3]) -> Rgb {
    let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(c[0]), channel(c[1]), channel(c[2]))
}
