//! Polygon predicates and measures (implicitly closed vertex lists).

use super::segment::distance_point_to_segment;
use super::types::{Point, PX_PER_METER};

/// Even-odd ray casting. Works for concave simple polygons; points exactly on
/// an edge may go either way.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Minimum distance from `p` to any polygon edge, closing edge included.
/// Degenerate polygons (< 3 vertices) are infinitely far away.
pub fn distance_point_to_polygon(p: Point, polygon: &[Point]) -> f64 {
    if polygon.len() < 3 {
        return f64::INFINITY;
    }
    let n = polygon.len();
    (0..n)
        .map(|i| distance_point_to_segment(p, polygon[i], polygon[(i + 1) % n]))
        .fold(f64::INFINITY, f64::min)
}

#[inline]
fn signed_area_px(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    let mut acc = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        acc += a.x * b.y - b.x * a.y;
    }
    acc / 2.0
}

/// Shoelace area in square meters. Zero for fewer than 3 vertices.
///
/// Self-intersecting input yields the algebraic (lobe-cancelling) area.
pub fn polygon_area(polygon: &[Point]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    signed_area_px(polygon).abs() / (PX_PER_METER * PX_PER_METER)
}

/// Area centroid in pixels; falls back to the vertex mean when the area
/// vanishes (collinear or < 3 vertices). `None` for an empty list.
pub fn polygon_centroid(polygon: &[Point]) -> Option<Point> {
    if polygon.is_empty() {
        return None;
    }
    let vertex_mean = || {
        let sum = polygon.iter().fold(Point::zeros(), |acc, p| acc + p);
        sum / polygon.len() as f64
    };
    if polygon.len() < 3 {
        return Some(vertex_mean());
    }
    let area = signed_area_px(polygon);
    if area.abs() < 1e-12 {
        return Some(vertex_mean());
    }
    let n = polygon.len();
    let mut c = Point::zeros();
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let w = a.x * b.y - b.x * a.y;
        c.x += (a.x + b.x) * w;
        c.y += (a.y + b.y) * w;
    }
    Some(c / (6.0 * area))
}
