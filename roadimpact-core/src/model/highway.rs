use serde::{de::Visitor, Deserialize, Deserializer, Serialize};
use std::{fmt::Display, str::FromStr};

/// the OSM `highway` tag of a way.
/// see <https://wiki.openstreetmap.org/wiki/Key:highway>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Highway {
    Motorway,
    MotorwayLink,
    Trunk,
    TrunkLink,
    Primary,
    PrimaryLink,
    Secondary,
    SecondaryLink,
    Tertiary,
    TertiaryLink,
    Unclassified,
    Residential,
    Service,
    Footway,
    Path,
    Cycleway,
    LivingStreet,
    Pedestrian,
    Other(String),
}

/// coarse grouping of [`Highway`] values used by the classification and extent rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadFamily {
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Local,
    NonVehicular,
    Other,
}

impl Highway {
    /// standard lane width in meters used when a way has no `width` tag.
    pub const LANE_WIDTH_METERS: f64 = 3.5;

    pub fn family(&self) -> RoadFamily {
        use Highway as H;
        match self {
            H::Motorway | H::MotorwayLink | H::Trunk | H::TrunkLink => RoadFamily::Trunk,
            H::Primary | H::PrimaryLink => RoadFamily::Primary,
            H::Secondary | H::SecondaryLink => RoadFamily::Secondary,
            H::Tertiary | H::TertiaryLink => RoadFamily::Tertiary,
            H::Unclassified | H::Residential => RoadFamily::Local,
            H::Service
            | H::Footway
            | H::Path
            | H::Cycleway
            | H::LivingStreet
            | H::Pedestrian => RoadFamily::NonVehicular,
            H::Other(_) => RoadFamily::Other,
        }
    }

    /// trunk or primary, including motorways and link roads.
    pub fn is_arterial(&self) -> bool {
        matches!(self.family(), RoadFamily::Trunk | RoadFamily::Primary)
    }

    /// footways, paths, cycleways, service roads, living streets and pedestrian zones
    /// never carry disruption traffic.
    pub fn is_non_vehicular(&self) -> bool {
        self.family() == RoadFamily::NonVehicular
    }

    /// unclassified and residential streets.
    pub fn is_minor(&self) -> bool {
        self.family() == RoadFamily::Local
    }

    pub fn estimate_lanes(&self) -> u32 {
        use Highway as H;
        match self {
            H::Motorway | H::Trunk | H::Primary => 4,
            H::Service => 1,
            _ => 2,
        }
    }

    pub fn estimate_max_speed_kph(&self) -> u32 {
        use Highway as H;
        match self {
            H::Motorway => 100,
            H::Trunk => 80,
            H::Primary => 60,
            H::Secondary => 50,
            H::Tertiary => 40,
            H::Residential => 30,
            H::Service => 20,
            _ => 40,
        }
    }

    /// carriageway width for the given lane count, with a shoulder allowance
    /// on the higher road classes.
    pub fn estimate_width_meters(&self, lanes: u32) -> f64 {
        use Highway as H;
        let carriageway = lanes as f64 * Self::LANE_WIDTH_METERS;
        let shoulder = match self {
            H::Motorway => 2.0,
            H::Trunk => 1.5,
            H::Primary => 1.0,
            H::Secondary => 0.5,
            _ => 0.0,
        };
        carriageway + shoulder
    }
}

impl FromStr for Highway {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Highway as H;
        let highway = match s.trim() {
            "motorway" => H::Motorway,
            "motorway_link" => H::MotorwayLink,
            "trunk" => H::Trunk,
            "trunk_link" => H::TrunkLink,
            "primary" => H::Primary,
            "primary_link" => H::PrimaryLink,
            "secondary" => H::Secondary,
            "secondary_link" => H::SecondaryLink,
            "tertiary" => H::Tertiary,
            "tertiary_link" => H::TertiaryLink,
            "unclassified" => H::Unclassified,
            "residential" => H::Residential,
            "service" => H::Service,
            "footway" => H::Footway,
            "path" => H::Path,
            "cycleway" => H::Cycleway,
            "living_street" => H::LivingStreet,
            "pedestrian" => H::Pedestrian,
            other => H::Other(String::from(other)),
        };
        Ok(highway)
    }
}

impl Display for Highway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Highway as H;
        let s = match self {
            H::Motorway => "motorway",
            H::MotorwayLink => "motorway_link",
            H::Trunk => "trunk",
            H::TrunkLink => "trunk_link",
            H::Primary => "primary",
            H::PrimaryLink => "primary_link",
            H::Secondary => "secondary",
            H::SecondaryLink => "secondary_link",
            H::Tertiary => "tertiary",
            H::TertiaryLink => "tertiary_link",
            H::Unclassified => "unclassified",
            H::Residential => "residential",
            H::Service => "service",
            H::Footway => "footway",
            H::Path => "path",
            H::Cycleway => "cycleway",
            H::LivingStreet => "living_street",
            H::Pedestrian => "pedestrian",
            H::Other(other) => other.as_str(),
        };
        write!(f, "{s}")
    }
}

struct HighwayVisitor;

impl Visitor<'_> for HighwayVisitor {
    type Value = Highway;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("an OSM highway tag value such as 'primary' or 'trunk_link'")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Highway::from_str(v).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Highway {
    fn deserialize<D>(deserializer: D) -> Result<Highway, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(HighwayVisitor)
    }
}

impl Serialize for Highway {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
