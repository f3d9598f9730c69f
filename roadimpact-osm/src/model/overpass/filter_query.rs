use itertools::Itertools;
use regex::Regex;
use serde::{de::Visitor, Deserialize, Deserializer, Serialize};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

use super::FilterOp;

#[derive(Debug, Clone, PartialEq)]
/// represents a single fragment of an overpass API filter query
/// see <https://wiki.openstreetmap.org/wiki/Overpass_API/Language_Guide#Tag_request_clauses_(or_%22tag_filters%22)>
pub struct FilterQuery {
    /// the key in the tag's key/value pair to match against
    tag: String,
    /// operation/predicate used on this query
    op: FilterOp,
    /// exact values for (not) equals, regex alternatives for (not) matches,
    /// empty for existential queries such as `["name"]`.
    values: Vec<String>,
    /// appends the `,i` flag to regex matches.
    case_insensitive: bool,
}

impl FilterQuery {
    const QUERY_REGEX: &'static str = r#"^\["([\w:]+)"(?:(=|!=|~|!~)"((?:[^"\\]|\\.)*)"(,i)?)?\]$"#;
    const ONE_OF_REGEX: &'static str = r"^\^\((.*)\)\$$";

    pub fn exists(tag: &str) -> FilterQuery {
        FilterQuery {
            tag: String::from(tag),
            op: FilterOp::Exists,
            values: vec![],
            case_insensitive: false,
        }
    }

    /// tag value is exactly one of `values`.
    pub fn one_of<S: AsRef<str>>(tag: &str, values: &[S]) -> FilterQuery {
        FilterQuery {
            tag: String::from(tag),
            op: FilterOp::Equals,
            values: values.iter().map(|v| String::from(v.as_ref())).collect(),
            case_insensitive: false,
        }
    }

    /// tag value matches any of the regex alternatives in `patterns`.
    pub fn matches_any<S: AsRef<str>>(
        tag: &str,
        patterns: &[S],
        case_insensitive: bool,
    ) -> FilterQuery {
        FilterQuery {
            tag: String::from(tag),
            op: FilterOp::Matches,
            values: patterns.iter().map(|v| String::from(v.as_ref())).collect(),
            case_insensitive,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn op(&self) -> FilterOp {
        self.op
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unescape(value: &str) -> String {
    value.replace("\\\"", "\"").replace("\\\\", "\\")
}

impl Display for FilterQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = escape(&self.values.iter().join("|"));
        let flag = if self.case_insensitive { ",i" } else { "" };
        match (self.op, self.values.len()) {
            (FilterOp::Exists, _) => write!(f, "[\"{}\"]", self.tag),
            (FilterOp::Equals, 1) | (FilterOp::NotEquals, 1) => {
                write!(f, "[\"{}\"{}\"{}\"]", self.tag, self.op, joined)
            }
            (FilterOp::Equals, _) => write!(f, "[\"{}\"~\"^({})$\"]", self.tag, joined),
            (FilterOp::NotEquals, _) => write!(f, "[\"{}\"!~\"^({})$\"]", self.tag, joined),
            (FilterOp::Matches, _) | (FilterOp::NotMatches, _) => {
                write!(f, "[\"{}\"{}\"{}\"{}]", self.tag, self.op, joined, flag)
            }
        }
    }
}

impl FromStr for FilterQuery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = Regex::new(Self::QUERY_REGEX)
            .map_err(|e| format!("internal error building overpass query regex: {e}"))?;
        let one_of = Regex::new(Self::ONE_OF_REGEX)
            .map_err(|e| format!("internal error building overpass query regex: {e}"))?;
        let groups = re
            .captures(s.trim())
            .ok_or_else(|| format!("unable to parse overpass query: '{s}'"))?;
        let tag = String::from(&groups[1]);
        let op = match groups.get(2) {
            None => return Ok(FilterQuery::exists(&tag)),
            Some(op) => FilterOp::from_str(op.as_str())?,
        };
        let value = unescape(groups.get(3).map(|m| m.as_str()).unwrap_or_default());
        let case_insensitive = groups.get(4).is_some();
        let split = |v: &str| v.split('|').map(String::from).collect::<Vec<_>>();

        let (op, values) = match op {
            FilterOp::Matches | FilterOp::NotMatches if !case_insensitive => {
                match one_of.captures(&value) {
                    Some(inner) => {
                        let exact = if op == FilterOp::Matches {
                            FilterOp::Equals
                        } else {
                            FilterOp::NotEquals
                        };
                        (exact, split(&inner[1]))
                    }
                    None => (op, split(&value)),
                }
            }
            FilterOp::Matches | FilterOp::NotMatches => (op, split(&value)),
            _ => (op, vec![value]),
        };
        Ok(FilterQuery {
            tag,
            op,
            values,
            case_insensitive,
        })
    }
}

struct OverpassFilterQueryVisitor;

impl Visitor<'_> for OverpassFilterQueryVisitor {
    type Value = FilterQuery;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a valid overpass filter query. see https://wiki.openstreetmap.org/wiki/Overpass_API/Language_Guide#Tag_request_clauses_(or_%22tag_filters%22).")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        FilterQuery::from_str(v).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for FilterQuery {
    fn deserialize<D>(deserializer: D) -> Result<FilterQuery, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(OverpassFilterQueryVisitor)
    }
}

impl Serialize for FilterQuery {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let highway = FilterQuery::one_of("highway", &["trunk", "primary"]);
        assert_eq!(highway.to_string(), r#"["highway"~"^(trunk|primary)$"]"#);
        let name = FilterQuery::matches_any("name", &["national", "ipil"], true);
        assert_eq!(name.to_string(), r#"["name"~"national|ipil",i]"#);
        assert_eq!(FilterQuery::exists("name").to_string(), r#"["name"]"#);
        let single = FilterQuery::one_of("highway", &["trunk"]);
        assert_eq!(single.to_string(), r#"["highway"="trunk"]"#);
    }

    #[test]
    fn test_parse() {
        match FilterQuery::from_str(r#"["highway"~"^(trunk|primary)$"]"#) {
            Ok(q) => {
                assert_eq!(q.op(), FilterOp::Equals);
                assert_eq!(q.values(), &["trunk", "primary"]);
            }
            Err(e) => panic!("{e}"),
        }
        match FilterQuery::from_str(r#"["name"~"maharlika",i]"#) {
            Ok(q) => {
                assert_eq!(q.op(), FilterOp::Matches);
                assert_eq!(q.to_string(), r#"["name"~"maharlika",i]"#);
            }
            Err(e) => panic!("{e}"),
        }
        match FilterQuery::from_str(r#"["access"!="private"]"#) {
            Ok(q) => assert_eq!(q.op(), FilterOp::NotEquals),
            Err(e) => panic!("{e}"),
        }
        match FilterQuery::from_str(r#"["name"]"#) {
            Ok(q) => assert_eq!(q.op(), FilterOp::Exists),
            Err(e) => panic!("{e}"),
        }
        assert!(FilterQuery::from_str("highway=trunk").is_err());
    }

    #[test]
    fn test_deserialize_list() {
        let json = r#"["[\"access\"!=\"private\"]", "[\"oneway\"]"]"#;
        match serde_json::from_str::<Vec<FilterQuery>>(json) {
            Ok(filters) => {
                assert_eq!(filters.len(), 2);
                assert_eq!(filters[0].tag(), "access");
            }
            Err(e) => panic!("{e}"),
        }
    }
}
