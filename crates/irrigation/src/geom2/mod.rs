//! Planar geometry kernel for canvas coordinates.
//!
//! Purpose
//! - Provide the small set of stateless predicates and measures every other
//!   module builds on: point-in-polygon, segment projection, intersections,
//!   polyline stations, polygon area.
//! - Work directly in canvas pixels; convert to meters only at the edges via
//!   `px_to_m` (`PX_PER_METER = 25`).
//!
//! Degenerate input never panics
//! - Polygons with fewer than 3 vertices have zero area and contain nothing.
//! - `distance_point_to_polygon` on such a polygon is `INFINITY` ("never near").
//!
//! Code cross-refs: `association` (membership), `flow` (lengths), `fittings`
//! (stations and sides).

mod polygon;
mod polyline;
mod segment;
mod types;

pub use polygon::{distance_point_to_polygon, point_in_polygon, polygon_area, polygon_centroid};
pub use polyline::{
    closest_point_on_polyline, distance_point_to_polyline, polyline_intersections,
    polyline_length, polyline_length_m, side_of_polyline, station_along_polyline,
    turn_deviation_deg, PolylineHit,
};
pub use segment::{
    closest_point_on_segment, distance_between_points, distance_point_to_segment,
    segment_intersection,
};
pub use types::{px_to_m, Point, Projection, Side, PX_PER_METER};
