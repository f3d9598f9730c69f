mod area;
mod classified_road;
mod coordinate;
mod corridor;
mod highway;
mod osm_ids;
mod raw_graph;
mod rgb;
mod road_hint;
mod road_network;
mod road_pattern;
mod road_segment;
mod severity;
pub mod way_ops;

pub use area::{AreaBounds, AreaTable};
pub use classified_road::{ClassifiedRoad, ConnectionType, ImpactLevel};
pub use coordinate::Coordinate;
pub use corridor::{CorridorRule, CorridorRuleSet, CriticalRoadRule, ExcludedRoadRule};
pub use highway::{Highway, RoadFamily};
pub use osm_ids::{OsmNodeId, OsmWayId};
pub use raw_graph::{RawNodes, RawWay};
pub use rgb::Rgb;
pub use road_hint::RoadInfoHint;
pub use road_network::RoadNetwork;
pub use road_pattern::{PatternTable, RoadPattern};
pub use road_segment::RoadSegmentRaw;
pub use severity::{HourlySeverity, SeverityLabel, SeverityTimeline};
