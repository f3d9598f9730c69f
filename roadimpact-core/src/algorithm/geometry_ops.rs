//! distance and interpolation math over WGS84 coordinates. distances are
//! great-circle (Haversine) meters via `geo`; projections onto a segment use a
//! local equirectangular frame, which is accurate at the scale of a road network
//! around a single disruption.
use crate::model::Coordinate;
use geo::{Distance, Haversine, Length, LineString, Point};

const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// great-circle distance in meters between two coordinates.
pub fn haversine_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    Haversine.distance(a.to_point(), b.to_point())
}

/// Haversine length of a polyline in meters. empty and single-point lines have length zero.
pub fn polyline_length_meters(coordinates: &[Coordinate]) -> f64 {
    if coordinates.len() < 2 {
        return 0.0;
    }
    let linestring: LineString<f64> = coordinates
        .iter()
        .map(|c| Point::from(c).0)
        .collect::<Vec<_>>()
        .into();
    Haversine.length(&linestring)
}

/// closest point to `p` on the segment `a`-`b`.
pub fn closest_point_on_segment(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> Coordinate {
    let cos_lat = p.lat.to_radians().cos();
    let (ax, ay) = local_xy(p, a, cos_lat);
    let (bx, by) = local_xy(p, b, cos_lat);
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return *a;
    }
    // p sits at the origin of the local frame
    let t = (-(ax * dx + ay * dy) / len_sq).clamp(0.0, 1.0);
    interpolate(a, b, t)
}

/// distance in meters from `p` to the segment `a`-`b`.
pub fn distance_to_segment_meters(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
    haversine_meters(p, &closest_point_on_segment(p, a, b))
}

/// minimum distance in meters from `p` to any point on the polyline (not just its vertices).
/// returns `f64::INFINITY` for an empty polyline.
pub fn distance_to_polyline_meters(p: &Coordinate, coordinates: &[Coordinate]) -> f64 {
    match coordinates {
        [] => f64::INFINITY,
        [only] => haversine_meters(p, only),
        _ => coordinates
            .windows(2)
            .map(|w| distance_to_segment_meters(p, &w[0], &w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// minimum distance in meters from `p` to any vertex of the polyline.
pub fn min_vertex_distance_meters(p: &Coordinate, coordinates: &[Coordinate]) -> f64 {
    coordinates
        .iter()
        .map(|c| haversine_meters(p, c))
        .fold(f64::INFINITY, f64::min)
}

/// the point of the polyline closest to `p`, with the index of the segment it lies on.
/// a single-point polyline yields that point on segment 0. the first segment wins a tie.
pub fn closest_point_on_polyline(
    p: &Coordinate,
    coordinates: &[Coordinate],
) -> Option<(usize, Coordinate)> {
    match coordinates {
        [] => None,
        [only] => Some((0, *only)),
        _ => coordinates
            .windows(2)
            .enumerate()
            .map(|(idx, w)| {
                let point = closest_point_on_segment(p, &w[0], &w[1]);
                (idx, point, haversine_meters(p, &point))
            })
            .fold(None, |best: Option<(usize, Coordinate, f64)>, (idx, point, d)| {
                match best {
                    Some((_, _, best_d)) if best_d <= d => best,
                    _ => Some((idx, point, d)),
                }
            })
            .map(|(idx, point, _)| (idx, point)),
    }
}

/// linear interpolation between two coordinates, `t` in [0, 1].
pub fn interpolate(a: &Coordinate, b: &Coordinate, t: f64) -> Coordinate {
    Coordinate::new(a.lat + (b.lat - a.lat) * t, a.lng + (b.lng - a.lng) * t)
}

/// coordinate `meters` along the segment `from`-`to`, clamped to the segment.
pub fn point_along(from: &Coordinate, to: &Coordinate, meters: f64) -> Coordinate {
    let length = haversine_meters(from, to);
    if length <= 0.0 {
        return *from;
    }
    interpolate(from, to, (meters / length).clamp(0.0, 1.0))
}

fn local_xy(origin: &Coordinate, c: &Coordinate, cos_lat: f64) -> (f64, f64) {
    (
        (c.lng - origin.lng) * METERS_PER_DEGREE_LAT * cos_lat,
        (c.lat - origin.lat) * METERS_PER_DEGREE_LAT,
    )
}
