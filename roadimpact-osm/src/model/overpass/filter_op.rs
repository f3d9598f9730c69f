use std::{fmt::Display, str::FromStr};

/// comparison used by an Overpass tag filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// `["k"]`, the tag is set to any value.
    Exists,
    /// `["k"="v"]`, or a one-of match when there are several values.
    Equals,
    /// `["k"!="v"]`
    NotEquals,
    /// `["k"~"regex"]`
    Matches,
    /// `["k"!~"regex"]`
    NotMatches,
}

impl FromStr for FilterOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::Exists),
            "=" => Ok(Self::Equals),
            "!=" => Ok(Self::NotEquals),
            "~" => Ok(Self::Matches),
            "!~" => Ok(Self::NotMatches),
            _ => Err(format!("unknown overpass query operation '{s}'")),
        }
    }
}

impl Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterOp::Exists => write!(f, ""),
            FilterOp::Equals => write!(f, "="),
            FilterOp::NotEquals => write!(f, "!="),
            FilterOp::Matches => write!(f, "~"),
            FilterOp::NotMatches => write!(f, "!~"),
        }
    }
}
