use std::collections::HashMap;

use roadimpact_core::model::{Coordinate, OsmNodeId, OsmWayId, RawNodes, RawWay};
use serde::{Deserialize, Serialize};

/// body of an `[out:json]` Overpass response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
    /// set by the server when the query failed at runtime, e.g. on a server-side timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OverpassElement {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
    },
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    #[serde(other)]
    Other,
}

impl OverpassResponse {
    /// a runtime error remark from the server, which arrives with an HTTP 200.
    pub fn runtime_error(&self) -> Option<&str> {
        self.remark
            .as_deref()
            .filter(|remark| remark.to_lowercase().contains("error"))
    }

    pub fn way_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, OverpassElement::Way { .. }))
            .count()
    }

    pub fn into_raw_graph(self) -> (Vec<RawWay>, RawNodes) {
        let mut ways = vec![];
        let mut nodes: RawNodes = HashMap::new();
        for element in self.elements.into_iter() {
            match element {
                OverpassElement::Node { id, lat, lon } => {
                    nodes.insert(OsmNodeId(id), Coordinate::new(lat, lon));
                }
                OverpassElement::Way { id, nodes, tags } => ways.push(RawWay {
                    id: OsmWayId(id),
                    node_ids: nodes.into_iter().map(OsmNodeId).collect(),
                    tags,
                }),
                OverpassElement::Other => {}
            }
        }
        (ways, nodes)
    }
}
