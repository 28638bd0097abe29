//! Open polylines: length, stations (arc-length positions), sides, crossings.
//!
//! A station is the arc length in pixels from the first vertex to a point's
//! projection on the nearest segment. Stations order attachments along a pipe.

use super::segment::{closest_point_on_segment, distance_between_points, segment_intersection};
use super::types::{px_to_m, Point, Projection, Side};

/// Intersection of two polylines, located on the first one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolylineHit {
    pub point: Point,
    /// Segment index on the first polyline.
    pub segment: usize,
    /// Station of `point` along the first polyline (px).
    pub station: f64,
}

/// Total length in pixels.
pub fn polyline_length(polyline: &[Point]) -> f64 {
    polyline
        .windows(2)
        .map(|w| distance_between_points(w[0], w[1]))
        .sum()
}

#[inline]
pub fn polyline_length_m(polyline: &[Point]) -> f64 {
    px_to_m(polyline_length(polyline))
}

/// Nearest segment (first minimum wins) and the projection onto it.
fn nearest_segment(polyline: &[Point], p: Point) -> Option<(usize, Projection)> {
    let mut best: Option<(usize, Projection)> = None;
    for (k, w) in polyline.windows(2).enumerate() {
        let proj = closest_point_on_segment(p, w[0], w[1]);
        if best.as_ref().is_none_or(|(_, b)| proj.distance < b.distance) {
            best = Some((k, proj));
        }
    }
    best
}

/// Projection of `p` onto the nearest segment of the polyline.
pub fn closest_point_on_polyline(polyline: &[Point], p: Point) -> Option<Projection> {
    nearest_segment(polyline, p).map(|(_, proj)| proj)
}

/// Distance from `p` to the polyline. A single vertex acts as a point; an
/// empty polyline is infinitely far away.
pub fn distance_point_to_polyline(p: Point, polyline: &[Point]) -> f64 {
    match polyline {
        [] => f64::INFINITY,
        [only] => distance_between_points(p, *only),
        _ => nearest_segment(polyline, p).map_or(f64::INFINITY, |(_, proj)| proj.distance),
    }
}

/// Arc length (px) from the polyline start to the projection of `p` on the
/// nearest segment. Zero for polylines with fewer than two vertices.
pub fn station_along_polyline(polyline: &[Point], p: Point) -> f64 {
    let Some((seg, proj)) = nearest_segment(polyline, p) else {
        return 0.0;
    };
    let before = polyline_length(&polyline[..=seg]);
    let seg_len = distance_between_points(polyline[seg], polyline[seg + 1]);
    before + proj.t * seg_len
}

/// Side of `p` relative to the direction of the nearest segment.
pub fn side_of_polyline(polyline: &[Point], p: Point) -> Side {
    let Some((seg, _)) = nearest_segment(polyline, p) else {
        return Side::On;
    };
    let a = polyline[seg];
    let dir = polyline[seg + 1] - a;
    let rel = p - a;
    Side::from_cross(dir.x * rel.y - dir.y * rel.x)
}

/// All intersections between polylines `a` and `b`, sorted by station on `a`.
/// Hits at a shared vertex of `a` are reported once.
pub fn polyline_intersections(a: &[Point], b: &[Point]) -> Vec<PolylineHit> {
    let mut hits: Vec<PolylineHit> = Vec::new();
    let mut station0 = 0.0;
    for (k, wa) in a.windows(2).enumerate() {
        let seg_len = distance_between_points(wa[0], wa[1]);
        for wb in b.windows(2) {
            if let Some(point) = segment_intersection(wa[0], wa[1], wb[0], wb[1]) {
                let station = station0 + distance_between_points(wa[0], point);
                if hits
                    .iter()
                    .any(|h| distance_between_points(h.point, point) < 1e-9)
                {
                    continue;
                }
                hits.push(PolylineHit {
                    point,
                    segment: k,
                    station,
                });
            }
        }
        station0 += seg_len;
    }
    hits.sort_by(|x, y| x.station.total_cmp(&y.station));
    hits
}

/// Deviation (degrees) of the corner `prev → vertex → next` from a straight
/// line: 0 for collinear continuation, 90 for a right angle. Degenerate legs
/// count as straight.
pub fn turn_deviation_deg(prev: Point, vertex: Point, next: Point) -> f64 {
    let u = prev - vertex;
    let v = next - vertex;
    let denom = u.norm() * v.norm();
    if denom == 0.0 {
        return 0.0;
    }
    let cos = (u.dot(&v) / denom).clamp(-1.0, 1.0);
    180.0 - cos.acos().to_degrees()
}
