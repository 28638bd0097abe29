//! Drip emitter counts from line length and spacing.
//!
//! A drip-line carries `floor(length / spacing) + 1` emitters (one at each
//! end of every spacing interval). No usable spacing means no emitters.

use crate::geom2::{
    distance_between_points, point_in_polygon, polyline_length_m, px_to_m, Point,
};
use crate::model::IrrigationElement;

#[inline]
fn usable_spacing(line: &IrrigationElement) -> Option<f64> {
    line.spacing.filter(|s| s.is_finite() && *s > 0.0)
}

#[inline]
fn emitters_for_length(length_m: f64, spacing: f64) -> usize {
    if length_m <= 0.0 {
        return 0;
    }
    (length_m / spacing).floor() as usize + 1
}

/// Emitters along the whole drip-line.
pub fn drip_emitters_on_line(line: &IrrigationElement) -> usize {
    match usable_spacing(line) {
        Some(spacing) => emitters_for_length(polyline_length_m(&line.points), spacing),
        None => 0,
    }
}

/// Length (m) of the drip-line segments that lie in the plot: a segment
/// counts whole when either endpoint or its midpoint is inside.
pub fn drip_length_in_plot_m(line: &IrrigationElement, plot: &[Point]) -> f64 {
    line.points
        .windows(2)
        .filter(|w| {
            let mid = (w[0] + w[1]) / 2.0;
            point_in_polygon(w[0], plot)
                || point_in_polygon(w[1], plot)
                || point_in_polygon(mid, plot)
        })
        .map(|w| px_to_m(distance_between_points(w[0], w[1])))
        .sum()
}

/// Emitters of this drip-line that water the plot.
pub fn drip_emitters_in_plot(line: &IrrigationElement, plot: &[Point]) -> usize {
    match usable_spacing(line) {
        Some(spacing) => emitters_for_length(drip_length_in_plot_m(line, plot), spacing),
        None => 0,
    }
}
