use crate::model::{Coordinate, Highway};
use crate::ImpactError;
use serde::{Deserialize, Serialize};

/// caller-supplied knowledge of the disrupted road, typically from a directions
/// service. a polyline here is authoritative and replaces the graph's geometry
/// for the main road.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadInfoHint {
    #[serde(default)]
    pub road_name: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Vec<Coordinate>>,
    /// Google encoded polyline, used when `coordinates` is absent.
    #[serde(default)]
    pub encoded_polyline: Option<String>,
    #[serde(default)]
    pub highway: Option<Highway>,
}

impl RoadInfoHint {
    pub fn named(road_name: &str) -> RoadInfoHint {
        RoadInfoHint {
            road_name: Some(String::from(road_name)),
            ..Default::default()
        }
    }

    /// the hint's polyline, if it has one with at least two finite points.
    pub fn polyline(&self) -> Result<Option<Vec<Coordinate>>, ImpactError> {
        let coordinates = match (&self.coordinates, &self.encoded_polyline) {
            (Some(coordinates), _) => coordinates.clone(),
            (None, Some(encoded)) => decode_polyline(encoded)?,
            (None, None) => return Ok(None),
        };
        if coordinates.len() >= 2 && coordinates.iter().all(Coordinate::is_finite) {
            Ok(Some(coordinates))
        } else {
            Ok(None)
        }
    }

    /// the hint polyline, with decoding failures logged and treated as no geometry.
    pub fn polyline_or_none(&self) -> Option<Vec<Coordinate>> {
        match self.polyline() {
            Ok(polyline) => polyline,
            Err(e) => {
                log::warn!("ignoring road hint geometry: {e}");
                None
            }
        }
    }

    /// geometry came from a directions service rather than a plain coordinate list.
    pub fn is_from_directions(&self) -> bool {
        self.coordinates.is_none() && self.encoded_polyline.is_some()
    }

    pub fn name(&self) -> Option<&str> {
        self.road_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// decodes a Google encoded polyline at precision 5. the decoded x/y are lng/lat.
fn decode_polyline(encoded: &str) -> Result<Vec<Coordinate>, ImpactError> {
    let linestring = polyline::decode_polyline(encoded, 5)
        .map_err(|msg| ImpactError::InvalidPolyline(format!("'{encoded}': {msg}")))?;
    Ok(linestring
        .into_points()
        .into_iter()
        .map(|p| Coordinate::new(p.y(), p.x()))
        .collect())
}
