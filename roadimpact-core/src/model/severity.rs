use crate::ImpactError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityLabel {
    Light,
    Moderate,
    Heavy,
}

impl SeverityLabel {
    pub const MODERATE_THRESHOLD: f64 = 0.5;
    pub const HEAVY_THRESHOLD: f64 = 1.5;

    pub fn from_severity(severity: f64) -> SeverityLabel {
        if severity < Self::MODERATE_THRESHOLD {
            SeverityLabel::Light
        } else if severity < Self::HEAVY_THRESHOLD {
            SeverityLabel::Moderate
        } else {
            SeverityLabel::Heavy
        }
    }
}

/// one hour of the externally supplied severity signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeverity {
    pub hour: u8,
    pub severity: f64,
    pub delay_minutes: f64,
    pub label: SeverityLabel,
}

impl HourlySeverity {
    pub fn new(
        hour: u8,
        severity: f64,
        delay_minutes: f64,
        label: Option<SeverityLabel>,
    ) -> Result<HourlySeverity, ImpactError> {
        let value = HourlySeverity {
            hour,
            severity,
            delay_minutes,
            label: label.unwrap_or_else(|| SeverityLabel::from_severity(severity)),
        };
        value.validate()?;
        Ok(value)
    }

    pub fn validate(&self) -> Result<(), ImpactError> {
        if self.hour > 23 {
            return Err(ImpactError::InvalidSeverity(format!(
                "hour {} outside 0-23",
                self.hour
            )));
        }
        if !self.severity.is_finite() || self.severity < 0.0 {
            return Err(ImpactError::InvalidSeverity(format!(
                "severity {} at hour {} must be a finite value >= 0",
                self.severity, self.hour
            )));
        }
        if !self.delay_minutes.is_finite() || self.delay_minutes < 0.0 {
            return Err(ImpactError::InvalidSeverity(format!(
                "delay {} at hour {} must be a finite value >= 0",
                self.delay_minutes, self.hour
            )));
        }
        Ok(())
    }
}

/// ordered hourly severities of one simulation, with the engine's scalar summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityTimeline {
    pub hours: Vec<HourlySeverity>,
    #[serde(default)]
    pub avg_severity: Option<f64>,
    #[serde(default)]
    pub avg_delay_minutes: Option<f64>,
}

impl SeverityTimeline {
    pub fn new(hours: Vec<HourlySeverity>) -> Result<SeverityTimeline, ImpactError> {
        let timeline = SeverityTimeline {
            hours,
            avg_severity: None,
            avg_delay_minutes: None,
        };
        timeline.validate()?;
        Ok(timeline)
    }

    pub fn validate(&self) -> Result<(), ImpactError> {
        self.hours.iter().try_for_each(HourlySeverity::validate)
    }

    pub fn get(&self, hour_index: usize) -> Result<&HourlySeverity, ImpactError> {
        self.hours
            .get(hour_index)
            .ok_or(ImpactError::HourOutOfRange(hour_index, self.hours.len()))
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// the supplied average, or the mean of the hourly values.
    pub fn average_severity(&self) -> f64 {
        self.avg_severity.unwrap_or_else(|| {
            mean(self.hours.iter().map(|h| h.severity))
        })
    }

    pub fn average_delay_minutes(&self) -> f64 {
        self.avg_delay_minutes.unwrap_or_else(|| {
            mean(self.hours.iter().map(|h| h.delay_minutes))
        })
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_thresholds() {
        assert_eq!(SeverityLabel::from_severity(0.49), SeverityLabel::Light);
        assert_eq!(SeverityLabel::from_severity(0.5), SeverityLabel::Moderate);
        assert_eq!(SeverityLabel::from_severity(1.49), SeverityLabel::Moderate);
        assert_eq!(SeverityLabel::from_severity(1.5), SeverityLabel::Heavy);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(HourlySeverity::new(24, 1.0, 0.0, None).is_err());
        assert!(HourlySeverity::new(8, -0.1, 0.0, None).is_err());
        assert!(HourlySeverity::new(8, f64::NAN, 0.0, None).is_err());
        assert!(HourlySeverity::new(8, 1.0, -3.0, None).is_err());
    }

    #[test]
    fn test_hour_out_of_range() {
        let hours = vec![HourlySeverity::new(8, 1.0, 10.0, None).unwrap()];
        let timeline = SeverityTimeline::new(hours).unwrap();
        match timeline.get(3) {
            Err(ImpactError::HourOutOfRange(3, 1)) => {}
            other => panic!("expected hour out of range, found {other:?}"),
        }
        assert!((timeline.average_severity() - 1.0).abs() < 1e-12);
    }
}
