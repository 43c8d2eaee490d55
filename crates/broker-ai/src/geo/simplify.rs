use geo::{Coord, LineString};

/// Upper bound on ring length before Douglas–Peucker runs.
pub const DEFAULT_MAX_POINTS: usize = 400;

/// Distance from `point` to the infinite line through `start` and `end`.
/// A zero-length chord falls back to the distance to `start`.
pub fn perpendicular_distance(point: Coord<f64>, start: Coord<f64>, end: Coord<f64>) -> f64 {
    let chord = end - start;
    let length = chord.x.hypot(chord.y);

    if length == 0.0 {
        let offset = point - start;
        return offset.x.hypot(offset.y);
    }

    ((chord.y * point.x - chord.x * point.y + end.x * start.y - end.y * start.x) / length).abs()
}

/// Thins `ring` to at most `max_points` by taking every n-th coordinate. The
/// first and last coordinates always survive. Lossy; meant for display
/// outlines only.
pub fn sample_ring(ring: &LineString<f64>, max_points: usize) -> LineString<f64> {
    let coords = &ring.0;
    if coords.len() <= max_points || coords.len() <= 2 {
        return ring.clone();
    }

    let last = coords.len() - 1;
    if max_points < 2 {
        return LineString::new(vec![coords[0], coords[last]]);
    }

    let stride = last.div_ceil(max_points - 1);
    let mut sampled: Vec<Coord<f64>> = coords.iter().step_by(stride).copied().collect();
    if last % stride != 0 {
        sampled.push(coords[last]);
    }
    LineString::new(sampled)
}

/// Douglas–Peucker simplification. A coordinate is kept only when its
/// distance to the current chord is strictly greater than `epsilon`.
pub fn simplify(ring: &LineString<f64>, epsilon: f64) -> LineString<f64> {
    LineString::new(douglas_peucker(&ring.0, epsilon))
}

fn douglas_peucker(coords: &[Coord<f64>], epsilon: f64) -> Vec<Coord<f64>> {
    if coords.len() <= 2 {
        return coords.to_vec();
    }

    let first = coords[0];
    let last = coords[coords.len() - 1];

    let mut split = 0;
    let mut max_distance = 0.0;
    for (index, coord) in coords.iter().enumerate().take(coords.len() - 1).skip(1) {
        let distance = perpendicular_distance(*coord, first, last);
        if distance > max_distance {
            split = index;
            max_distance = distance;
        }
    }

    if split == 0 || max_distance <= epsilon {
        return vec![first, last];
    }

    let mut left = douglas_peucker(&coords[..=split], epsilon);
    let right = douglas_peucker(&coords[split..], epsilon);
    left.pop();
    left.extend(right);
    left
}
