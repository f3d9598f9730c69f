use crate::algorithm::geometry_ops;
use crate::model::Coordinate;
use serde::{Deserialize, Serialize};

/// how the extent is spent along a road on either side of the point closest to
/// the disruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionMode {
    /// full extent toward both ends.
    Bidirectional,
    /// full extent toward the end farther from the disruption, a fraction toward the nearer end.
    FeederBiased,
    /// full extent toward both ends, without a fade tail.
    Minimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimmedPath {
    pub coordinates: Vec<Coordinate>,
    /// trimming produced fewer than two points and the full road is used.
    pub is_untrimmed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimParams {
    pub extent_meters: f64,
    pub mode: DirectionMode,
    pub near_side_fraction: f64,
    pub fade_tail_points: usize,
    pub fade_step_meters: f64,
}

/// trims `coordinates` outward from the point of the road closest to `center`. the
/// segment holding that point is split there, so the result always passes through it.
pub fn trim(coordinates: &[Coordinate], center: &Coordinate, params: &TrimParams) -> TrimmedPath {
    let untrimmed = || TrimmedPath {
        coordinates: coordinates.to_vec(),
        is_untrimmed: true,
    };
    let Some((segment, split)) = geometry_ops::closest_point_on_polyline(center, coordinates)
    else {
        return untrimmed();
    };
    let backward_path = std::iter::once(split)
        .chain(
            coordinates[..=segment]
                .iter()
                .rev()
                .copied()
                .skip_while(|c| *c == split),
        )
        .collect::<Vec<_>>();
    let forward_path = std::iter::once(split)
        .chain(
            coordinates[segment + 1..]
                .iter()
                .copied()
                .skip_while(|c| *c == split),
        )
        .collect::<Vec<_>>();

    let extent = params.extent_meters.max(0.0);
    let (backward_budget, forward_budget) = match params.mode {
        DirectionMode::Bidirectional | DirectionMode::Minimal => (extent, extent),
        DirectionMode::FeederBiased => {
            let near = extent * params.near_side_fraction;
            let backward_length = geometry_ops::polyline_length_meters(&backward_path);
            let forward_length = geometry_ops::polyline_length_meters(&forward_path);
            if forward_length >= backward_length {
                (near, extent)
            } else {
                (extent, near)
            }
        }
    };
    let fade = match params.mode {
        DirectionMode::Minimal => 0,
        _ => params.fade_tail_points,
    };

    let backward = walk(&backward_path, backward_budget, fade, params.fade_step_meters);
    let forward = walk(&forward_path, forward_budget, fade, params.fade_step_meters);

    let mut result = Vec::with_capacity(backward.len() + forward.len() + 1);
    result.extend(backward.into_iter().rev());
    result.push(split);
    result.extend(forward);

    if result.len() < 2 {
        untrimmed()
    } else {
        TrimmedPath {
            coordinates: result,
            is_untrimmed: false,
        }
    }
}

/// points reached walking `budget` meters along `path` from `path[0]` (excluded),
/// ending at an interpolated cut point followed by up to `fade_points` points spaced
/// `fade_step` meters apart while the path continues.
fn walk(path: &[Coordinate], budget: f64, fade_points: usize, fade_step: f64) -> Vec<Coordinate> {
    let mut out = vec![];
    let mut remaining = budget;
    let mut cut: Option<(usize, Coordinate)> = None;
    for (i, w) in path.windows(2).enumerate() {
        let length = geometry_ops::haversine_meters(&w[0], &w[1]);
        if length <= remaining {
            out.push(w[1]);
            remaining -= length;
        } else {
            let cut_point = geometry_ops::point_along(&w[0], &w[1], remaining);
            if remaining > 0.0 {
                out.push(cut_point);
            }
            cut = Some((i, cut_point));
            break;
        }
    }
    if let Some((segment, mut position)) = cut {
        let mut segment = segment;
        for _ in 0..fade_points {
            match advance(path, segment, position, fade_step) {
                Some((next_segment, next_position)) => {
                    out.push(next_position);
                    segment = next_segment;
                    position = next_position;
                }
                None => break,
            }
        }
    }
    out
}

/// moves `meters` forward from `position`, which lies on segment `segment` of `path`.
/// `None` once the path ends.
fn advance(
    path: &[Coordinate],
    segment: usize,
    position: Coordinate,
    meters: f64,
) -> Option<(usize, Coordinate)> {
    let mut segment = segment;
    let mut position = position;
    let mut remaining = meters;
    loop {
        let end = path.get(segment + 1)?;
        let to_end = geometry_ops::haversine_meters(&position, end);
        if remaining < to_end {
            return Some((segment, geometry_ops::point_along(&position, end, remaining)));
        }
        remaining -= to_end;
        position = *end;
        segment += 1;
    }
}
