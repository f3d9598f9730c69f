use crate::ImpactError;
use regex::{Regex, RegexBuilder};
use serde::{de::Visitor, Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// a case-insensitive regular expression matched against road names.
/// serialized as its source string.
#[derive(Debug, Clone)]
pub struct RoadPattern {
    source: String,
    regex: Regex,
}

impl RoadPattern {
    pub fn new(source: &str) -> Result<RoadPattern, ImpactError> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map_err(|e| ImpactError::InvalidPattern(String::from(source), e.to_string()))?;
        Ok(RoadPattern {
            source: String::from(source),
            regex,
        })
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// builds patterns from literal sources known to be valid.
    fn defaults(sources: &[&str]) -> Vec<RoadPattern> {
        sources
            .iter()
            .filter_map(|s| match RoadPattern::new(s) {
                Ok(p) => Some(p),
                Err(e) => {
                    log::error!("{e}");
                    None
                }
            })
            .collect()
    }
}

impl PartialEq for RoadPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Display for RoadPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

struct RoadPatternVisitor;

impl Visitor<'_> for RoadPatternVisitor {
    type Value = RoadPattern;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a regular expression matched against road names")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        RoadPattern::new(v).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for RoadPattern {
    fn deserialize<D>(deserializer: D) -> Result<RoadPattern, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(RoadPatternVisitor)
    }
}

impl Serialize for RoadPattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.source)
    }
}

/// name heuristics used by classification and extent, loaded from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternTable {
    /// roads that are never dropped for being short, minor or excluded by a corridor.
    #[serde(default = "PatternTable::default_critical_roads")]
    pub critical_roads: Vec<RoadPattern>,
    /// names that mark a road as a trunk-like arterial regardless of its highway tag.
    #[serde(default = "PatternTable::default_arterial_keywords")]
    pub arterial_keywords: Vec<RoadPattern>,
    /// named routes out of the disruption area that count as a physical connection.
    #[serde(default = "PatternTable::default_exit_routes")]
    pub exit_routes: Vec<RoadPattern>,
    /// short local streets that get a minimal extent.
    #[serde(default = "PatternTable::default_local_roads")]
    pub local_roads: Vec<RoadPattern>,
}

impl PatternTable {
    fn default_critical_roads() -> Vec<RoadPattern> {
        RoadPattern::defaults(&[
            r"\bnational\b",
            r"\bmaharlika\b",
            r"\bhighway\b",
            r"manila south road",
            r"\bslex\b|south luzon expressway",
            r"\bipil\b",
        ])
    }

    fn default_arterial_keywords() -> Vec<RoadPattern> {
        RoadPattern::defaults(&[r"\bnational\b", r"\bmaharlika\b", r"\bhighway\b"])
    }

    fn default_exit_routes() -> Vec<RoadPattern> {
        RoadPattern::defaults(&[r"\bbypass\b", r"\bexit\b", r"\bdiversion\b", r"\bdetour\b"])
    }

    fn default_local_roads() -> Vec<RoadPattern> {
        RoadPattern::defaults(&[
            r"\bpurok\b",
            r"\bsubdivision\b",
            r"\bvillage\b",
            r"\bcompound\b",
            r"\balley\b",
        ])
    }

    pub fn is_critical(&self, name: &str) -> bool {
        any_match(&self.critical_roads, name)
    }

    pub fn has_arterial_keyword(&self, name: &str) -> bool {
        any_match(&self.arterial_keywords, name)
    }

    pub fn is_exit_route(&self, name: &str) -> bool {
        any_match(&self.exit_routes, name)
    }

    pub fn is_local_road(&self, name: &str) -> bool {
        any_match(&self.local_roads, name)
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        PatternTable {
            critical_roads: Self::default_critical_roads(),
            arterial_keywords: Self::default_arterial_keywords(),
            exit_routes: Self::default_exit_routes(),
            local_roads: Self::default_local_roads(),
        }
    }
}

pub(crate) fn any_match(patterns: &[RoadPattern], name: &str) -> bool {
    patterns.iter().any(|p| p.is_match(name))
}
