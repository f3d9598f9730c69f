use std::cmp::Ordering;

use itertools::Itertools;
use uom::si::f64::{Length, Velocity};
use uom::si::{length, velocity};

pub const DEFAULT_WALK_SPEED_KPH: f64 = 5.0;

/// separator used by mappers when a tag holds more than one value, e.g. `maxspeed=45; 80`.
pub const MULTI_VALUE_SEPARATOR: &str = ";";

/// deals with the various ways that speed keys can appear. handles
/// valid cases such as:
///   - 45        (45 kph)
///   - 45 mph    (72.4203 kph)
///   - walk      (5 kph)
///
/// and invalid cases that are documented, such as:
///   - 45; 80    (takes the smaller of the two, so, 45 kph)
///
/// see https://wiki.openstreetmap.org/wiki/Key:maxspeed
pub fn deserialize_speed(
    s: &str,
    separator: Option<&str>,
    ignore_invalid_entries: bool,
) -> Result<Option<Velocity>, String> {
    let separated_entries = match separator {
        Some(sep) => s.split(sep).map(str::trim).collect_vec(),
        None => vec![s.trim()],
    };
    match separated_entries[..] {
        [] => Err(format!(
            "internal error: attempting to unpack empty maxspeed value '{s}'"
        )),
        [entry] => match entry.split_whitespace().collect_vec()[..] {
            // see https://wiki.openstreetmap.org/wiki/Key:maxspeed#Possible_tagging_mistakes
            ["unposted"] | ["unknown"] | ["default"] | ["variable"] | ["national"]
            | ["none"] | ["signals"] => Ok(None),
            ["walk"] => Ok(Some(Velocity::new::<velocity::kilometer_per_hour>(
                DEFAULT_WALK_SPEED_KPH,
            ))),
            [speed_str] => {
                if let Some(mph) = speed_str.strip_suffix("mph") {
                    return with_unit(mph, "mph", ignore_invalid_entries);
                }
                let speed = match parse_number(speed_str) {
                    Ok(speed) => speed,
                    Err(e) if !ignore_invalid_entries => return Err(e),
                    Err(_) => return Ok(None),
                };
                if speed == 0.0 || speed.is_nan() {
                    Ok(None)
                } else {
                    Ok(Some(Velocity::new::<velocity::kilometer_per_hour>(speed)))
                }
            }
            [speed_str, unit_str] => with_unit(speed_str, unit_str, ignore_invalid_entries),
            _ if ignore_invalid_entries => Ok(None),
            _ => Err(format!("unexpected maxspeed entry '{s}'")),
        },
        _ => {
            let maxspeeds = separated_entries
                .iter()
                .map(|e| deserialize_speed(e, None, ignore_invalid_entries))
                .collect::<Result<Vec<_>, _>>()?;
            let min = maxspeeds
                .into_iter()
                .min_by(|a, b| match (a, b) {
                    (None, None) => Ordering::Equal,
                    (None, Some(_)) => Ordering::Greater,
                    (Some(_), None) => Ordering::Less,
                    (Some(a), Some(b)) => a.partial_cmp(b).unwrap_or(Ordering::Greater),
                })
                .flatten();
            Ok(min)
        }
    }
}

fn with_unit(
    speed_str: &str,
    unit_str: &str,
    ignore_invalid_entries: bool,
) -> Result<Option<Velocity>, String> {
    let speed = match parse_number(speed_str) {
        Ok(speed) => speed,
        Err(e) if !ignore_invalid_entries => return Err(e),
        Err(_) => return Ok(None),
    };
    if speed == 0.0 || speed.is_nan() {
        return Ok(None);
    }
    match unit_str {
        "kph" | "km/h" | "kmh" => Ok(Some(Velocity::new::<velocity::kilometer_per_hour>(speed))),
        "mph" => Ok(Some(Velocity::new::<velocity::mile_per_hour>(speed))),
        "knots" => Ok(Some(Velocity::new::<velocity::knot>(speed))),
        _ if !ignore_invalid_entries => Err(format!(
            "unknown speed unit {unit_str} with value {speed}"
        )),
        // uncommon unit type like feet per minute, we can skip this entry.
        _ => Ok(None),
    }
}

fn parse_number(value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("value '{value}' not a valid number: {e}"))
}

/// maxspeed tag as kph, rounded to the nearest whole kph. invalid entries are treated as missing.
pub fn parse_maxspeed_kph(s: &str) -> Option<u32> {
    match deserialize_speed(s, Some(MULTI_VALUE_SEPARATOR), true) {
        Ok(Some(speed)) => {
            let kph = speed.get::<velocity::kilometer_per_hour>();
            if kph.is_finite() && kph > 0.0 {
                Some(kph.round() as u32)
            } else {
                None
            }
        }
        Ok(None) => None,
        Err(e) => {
            log::debug!("ignoring maxspeed '{s}': {e}");
            None
        }
    }
}

/// lanes tag. for `2;3` style values the smaller count is used.
pub fn parse_lanes(s: &str) -> Option<u32> {
    s.split(MULTI_VALUE_SEPARATOR)
        .filter_map(|entry| entry.trim().parse::<u32>().ok())
        .filter(|lanes| *lanes > 0)
        .min()
}

/// width tag in meters. understands `7`, `7.5 m`, `7.5m` and `24 ft`/`24'`.
pub fn parse_width_meters(s: &str) -> Option<f64> {
    let entry = s.split(MULTI_VALUE_SEPARATOR).next()?.trim();
    let (value, unit) = if let Some(v) = entry.strip_suffix("ft") {
        (v, "ft")
    } else if let Some(v) = entry.strip_suffix('\'') {
        (v, "ft")
    } else if let Some(v) = entry.strip_suffix('m') {
        (v, "m")
    } else {
        (entry, "m")
    };
    let value = parse_number(value).ok().filter(|w| w.is_finite() && *w > 0.0)?;
    let width = match unit {
        "ft" => Length::new::<length::foot>(value),
        _ => Length::new::<length::meter>(value),
    };
    Some(width.get::<length::meter>())
}
