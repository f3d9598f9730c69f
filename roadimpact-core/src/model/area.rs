use crate::model::Coordinate;
use serde::{Deserialize, Serialize};

/// a named lat/lng rectangle, bounds inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaBounds {
    pub name: String,
    pub lat_range: [f64; 2],
    pub lng_range: [f64; 2],
}

/// labels a disruption location with the first area containing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaTable {
    pub areas: Vec<AreaBounds>,
    pub default_area: String,
}

impl AreaBounds {
    pub fn new(name: &str, lat_range: [f64; 2], lng_range: [f64; 2]) -> AreaBounds {
        AreaBounds {
            name: String::from(name),
            lat_range,
            lng_range,
        }
    }

    pub fn contains(&self, c: &Coordinate) -> bool {
        let [lat_min, lat_max] = self.lat_range;
        let [lng_min, lng_max] = self.lng_range;
        c.lat >= lat_min && c.lat <= lat_max && c.lng >= lng_min && c.lng <= lng_max
    }
}

impl AreaTable {
    pub fn area_name(&self, c: &Coordinate) -> &str {
        self.areas
            .iter()
            .find(|a| a.contains(c))
            .map(|a| a.name.as_str())
            .unwrap_or(&self.default_area)
    }
}

impl Default for AreaTable {
    /// simplified barangay bounds for Calamba, Laguna.
    fn default() -> Self {
        AreaTable {
            areas: vec![
                AreaBounds::new("Bucal", [14.18, 14.2], [121.16, 121.18]),
                AreaBounds::new("Parian", [14.21, 14.22], [121.14, 121.16]),
                AreaBounds::new("Turbina", [14.18, 14.19], [121.13, 121.15]),
                AreaBounds::new("Real", [14.19, 14.21], [121.15, 121.17]),
                AreaBounds::new("Crossing", [14.2, 14.21], [121.16, 121.17]),
                AreaBounds::new("Halang", [14.17, 14.19], [121.17, 121.19]),
                AreaBounds::new("Pansol", [14.16, 14.18], [121.18, 121.2]),
                AreaBounds::new("Bagong Kalsada", [14.15, 14.17], [121.19, 121.21]),
            ],
            default_area: String::from("Calamba City"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let table = AreaTable::default();
        // inside both Bucal and Real, Bucal is listed first
        assert_eq!(table.area_name(&Coordinate::new(14.195, 121.165)), "Bucal");
        assert_eq!(table.area_name(&Coordinate::new(14.215, 121.15)), "Parian");
        assert_eq!(table.area_name(&Coordinate::new(14.5, 121.0)), "Calamba City");
    }
}
