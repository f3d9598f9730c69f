use itertools::Itertools;
use roadimpact_core::model::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::FilterQuery;

/// one `way[...](around:r,lat,lng);` statement. filters are conjunctive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AroundStatement {
    pub filters: Vec<FilterQuery>,
}

/// a union of way statements around a single point, asking for the ways with
/// their tags followed by the nodes they reference.
/// see <https://wiki.openstreetmap.org/wiki/Overpass_API/Language_Guide>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpassQuery {
    pub timeout_secs: u64,
    pub center: Coordinate,
    pub radius_meters: f64,
    pub statements: Vec<AroundStatement>,
}

impl OverpassQuery {
    /// named ways of the given highway types, narrowed by `extra_filters`, unioned with
    /// any highway whose name matches one of the critical-road patterns.
    pub fn road_graph<S: AsRef<str>>(
        center: &Coordinate,
        radius_meters: f64,
        timeout_secs: u64,
        highway_types: &[S],
        critical_name_patterns: &[S],
        extra_filters: &[FilterQuery],
    ) -> OverpassQuery {
        let mut statements = vec![];
        if !highway_types.is_empty() {
            let mut filters = vec![
                FilterQuery::one_of("highway", highway_types),
                FilterQuery::exists("name"),
            ];
            filters.extend(extra_filters.iter().cloned());
            statements.push(AroundStatement { filters });
        }
        if !critical_name_patterns.is_empty() {
            statements.push(AroundStatement {
                filters: vec![
                    FilterQuery::exists("highway"),
                    FilterQuery::matches_any("name", critical_name_patterns, true),
                ],
            });
        }
        OverpassQuery {
            timeout_secs,
            center: *center,
            radius_meters,
            statements,
        }
    }
}

impl Display for OverpassQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let around = format!(
            "(around:{:.0},{:.6},{:.6})",
            self.radius_meters, self.center.lat, self.center.lng
        );
        writeln!(f, "[out:json][timeout:{}];", self.timeout_secs)?;
        writeln!(f, "(")?;
        for statement in self.statements.iter() {
            writeln!(
                f,
                "  way{}{};",
                statement.filters.iter().map(|q| q.to_string()).join(""),
                around
            )?;
        }
        writeln!(f, ");")?;
        writeln!(f, "out body;")?;
        writeln!(f, ">;")?;
        write!(f, "out skel qt;")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_road_graph_query() {
        let query = OverpassQuery::road_graph(
            &Coordinate::new(14.2, 121.15),
            900.0,
            25,
            &["trunk", "primary"],
            &["national", "ipil"],
            &[],
        );
        let expected = [
            "[out:json][timeout:25];",
            "(",
            r#"  way["highway"~"^(trunk|primary)$"]["name"](around:900,14.200000,121.150000);"#,
            r#"  way["highway"]["name"~"national|ipil",i](around:900,14.200000,121.150000);"#,
            ");",
            "out body;",
            ">;",
            "out skel qt;",
        ]
        .join("\n");
        assert_eq!(query.to_string(), expected);
    }
}
