//! Point/segment measures and segment-segment intersection.

use super::types::{Point, Projection};

/// Euclidean distance between two points.
#[inline]
pub fn distance_between_points(a: Point, b: Point) -> f64 {
    (a - b).norm()
}

/// Project `p` onto segment `[a, b]`, clamping to the endpoints.
///
/// A zero-length segment projects everything onto `a` with `t = 0`.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Projection {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return Projection {
            point: a,
            distance: distance_between_points(p, a),
            t: 0.0,
        };
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let point = a + ab * t;
    Projection {
        point,
        distance: distance_between_points(p, point),
        t,
    }
}

#[inline]
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> f64 {
    closest_point_on_segment(p, a, b).distance
}

/// Intersection point of segments `[a1, a2]` and `[b1, b2]`.
///
/// Parallel (including collinear) segments return `None`, as do line
/// intersections whose parameters fall outside `[0, 1]` on either segment.
pub fn segment_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let r = a2 - a1;
    let s = b2 - b1;
    let denom = r.x * s.y - r.y * s.x;
    if denom == 0.0 {
        return None;
    }
    let qp = b1 - a1;
    let ua = (qp.x * s.y - qp.y * s.x) / denom;
    let ub = (qp.x * r.y - qp.y * r.x) / denom;
    if !(0.0..=1.0).contains(&ua) || !(0.0..=1.0).contains(&ub) {
        return None;
    }
    Some(a1 + r * ua)
}
