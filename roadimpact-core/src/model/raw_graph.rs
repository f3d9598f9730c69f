use std::collections::HashMap;
use std::str::FromStr;

use crate::model::{way_ops, Coordinate, Highway, OsmNodeId, OsmWayId, RoadSegmentRaw};
use crate::ImpactError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// node positions of the raw graph, keyed by node id.
pub type RawNodes = HashMap<OsmNodeId, Coordinate>;

/// a way as the geodata service returns it: an ordered node list plus free-form tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWay {
    pub id: OsmWayId,
    pub node_ids: Vec<OsmNodeId>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl RawWay {
    pub const KEY_HIGHWAY: &'static str = "highway";
    pub const KEY_NAME: &'static str = "name";
    pub const KEY_REF: &'static str = "ref";
    pub const KEY_LANES: &'static str = "lanes";
    pub const KEY_MAXSPEED: &'static str = "maxspeed";
    pub const KEY_WIDTH: &'static str = "width";

    pub fn get_string_at_field(&self, field: &str) -> Option<&str> {
        self.tags
            .get(field)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn get_highway(&self) -> Option<Highway> {
        self.get_string_at_field(Self::KEY_HIGHWAY)
            .and_then(|h| Highway::from_str(h).ok())
    }

    /// `name`, falling back to `ref`.
    pub fn get_name(&self) -> Option<String> {
        self.get_string_at_field(Self::KEY_NAME)
            .or_else(|| self.get_string_at_field(Self::KEY_REF))
            .map(String::from)
    }

    /// resolves this way against the graph's nodes. nodes missing from the graph
    /// are dropped, as are repeated consecutive nodes. fails when fewer than two
    /// usable positions remain or when any resolved position is not finite.
    pub fn to_segment(&self, nodes: &RawNodes) -> Result<RoadSegmentRaw, ImpactError> {
        let highway = self.get_highway().ok_or_else(|| {
            ImpactError::ClassificationInputError(self.id, String::from("missing highway tag"))
        })?;

        let (node_ids, coordinates): (Vec<OsmNodeId>, Vec<Coordinate>) = self
            .node_ids
            .iter()
            .dedup()
            .filter_map(|node_id| match nodes.get(node_id) {
                Some(c) => Some((*node_id, *c)),
                None => {
                    log::debug!("{}", ImpactError::MissingNode(self.id, *node_id));
                    None
                }
            })
            .unzip();

        if let Some(bad) = coordinates.iter().find(|c| !c.is_finite()) {
            return Err(ImpactError::ClassificationInputError(
                self.id,
                format!("non-finite coordinate {bad}"),
            ));
        }
        if coordinates.len() < 2 {
            return Err(ImpactError::ClassificationInputError(
                self.id,
                format!(
                    "{} of {} nodes resolvable, need at least 2",
                    coordinates.len(),
                    self.node_ids.len()
                ),
            ));
        }

        let lanes = self
            .get_string_at_field(Self::KEY_LANES)
            .and_then(way_ops::parse_lanes)
            .unwrap_or_else(|| highway.estimate_lanes());
        let max_speed_kph = self
            .get_string_at_field(Self::KEY_MAXSPEED)
            .and_then(way_ops::parse_maxspeed_kph)
            .unwrap_or_else(|| highway.estimate_max_speed_kph());
        let width_meters = self
            .get_string_at_field(Self::KEY_WIDTH)
            .and_then(way_ops::parse_width_meters)
            .unwrap_or_else(|| highway.estimate_width_meters(lanes));

        Ok(RoadSegmentRaw {
            id: self.id,
            name: self.get_name(),
            highway,
            lanes,
            max_speed_kph,
            width_meters,
            coordinates,
            node_ids,
        })
    }
}
