use serde::{Deserialize, Serialize};

/// severity factor applied from `min_severity` upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityBand {
    pub min_severity: f64,
    pub main_factor: f64,
    pub connected_factor: f64,
}

/// inclusive range of hours of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourRange {
    pub start: u8,
    pub end: u8,
}

impl HourRange {
    pub fn contains(&self, hour: u8) -> bool {
        self.start <= hour && hour <= self.end
    }
}

/// base reach in meters per road class, before multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseDistances {
    pub local_main: f64,
    pub local_other: f64,
    pub arterial_main: f64,
    pub arterial_other: f64,
    pub intersecting: f64,
    pub other: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtentConfig {
    /// checked top to bottom, the first band with `min_severity <= severity` applies.
    pub severity_bands: Vec<SeverityBand>,
    pub peak_hours: Vec<u8>,
    pub peak_multiplier: f64,
    pub peak_min_severity: f64,
    pub rush_hours: Vec<HourRange>,
    pub rush_multiplier: f64,
    pub rush_min_severity: f64,
    pub main_delay_divisor: f64,
    pub main_delay_cap: f64,
    pub connected_delay_divisor: f64,
    pub connected_delay_cap: f64,
    pub base_distances: BaseDistances,
    /// share of the extent given to the side of a feeder road nearer the disruption.
    pub feeder_near_side_fraction: f64,
    pub fade_tail_points: usize,
    pub fade_step_meters: f64,
}

impl Default for ExtentConfig {
    fn default() -> Self {
        let band = |min_severity, main_factor, connected_factor| SeverityBand {
            min_severity,
            main_factor,
            connected_factor,
        };
        ExtentConfig {
            severity_bands: vec![
                band(2.0, 4.0, 3.5),
                band(1.5, 3.2, 2.8),
                band(1.0, 2.0, 1.8),
                band(0.5, 1.3, 1.2),
                band(0.0, 1.0, 0.8),
            ],
            peak_hours: vec![7, 8, 18],
            peak_multiplier: 1.2,
            peak_min_severity: 1.5,
            rush_hours: vec![HourRange { start: 6, end: 9 }, HourRange { start: 16, end: 19 }],
            rush_multiplier: 1.1,
            rush_min_severity: 1.0,
            main_delay_divisor: 35.0,
            main_delay_cap: 1.4,
            connected_delay_divisor: 40.0,
            connected_delay_cap: 1.3,
            base_distances: BaseDistances {
                local_main: 15.0,
                local_other: 10.0,
                arterial_main: 900.0,
                arterial_other: 550.0,
                intersecting: 350.0,
                other: 250.0,
            },
            feeder_near_side_fraction: 0.3,
            fade_tail_points: 3,
            fade_step_meters: 8.0,
        }
    }
}
