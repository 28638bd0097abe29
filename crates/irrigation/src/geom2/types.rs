//! Basic 2D types and the pixel/meter scale.
//!
//! - `Point`: canvas position in pixels (y grows downwards, as on the canvas).
//! - `Projection`: result of projecting a point onto a segment.
//! - `Side`: which side of a directed line a point lies on.

use nalgebra::Vector2;

/// Canvas pixels per real-world meter.
pub const PX_PER_METER: f64 = 25.0;

/// Canvas point in pixels.
pub type Point = Vector2<f64>;

/// Convert a pixel length to meters.
#[inline]
pub fn px_to_m(px: f64) -> f64 {
    px / PX_PER_METER
}

/// Closest point on a segment together with its distance and the clamped
/// segment parameter `t ∈ [0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub point: Point,
    pub distance: f64,
    pub t: f64,
}

/// Sign of the cross product `dir × (p − origin)`.
///
/// With canvas coordinates (y down) `Left` is the visually clockwise side; only
/// the comparison between two points matters to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    On,
}

impl Side {
    #[inline]
    pub fn from_cross(cross: f64) -> Self {
        if cross > 0.0 {
            Side::Left
        } else if cross < 0.0 {
            Side::Right
        } else {
            Side::On
        }
    }

    /// True when `self` and `other` are strictly on opposite sides.
    #[inline]
    pub fn opposes(self, other: Side) -> bool {
        matches!(
            (self, other),
            (Side::Left, Side::Right) | (Side::Right, Side::Left)
        )
    }
}
