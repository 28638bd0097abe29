//! Spatial association: which plot, pipe or emitter belongs to which.
//!
//! Purpose
//! - Infer membership from raw geometry. Nothing in the input says "this
//!   sprinkler hangs off that sub-pipe"; it is decided by proximity.
//! - Keep the decision rules behind `ProximityResolver` so an explicit
//!   topology can replace the pixel heuristics without touching `geom2`,
//!   `flow` or `fittings`.
//!
//! Layout
//! - `view.rs`: typed split of a `Snapshot` into plots, pipes and devices.
//! - `heuristic.rs`: the tolerance-based default resolver.
//! - `emitters.rs`: drip emitter counts derived from spacing.

mod emitters;
mod heuristic;
mod view;

pub use emitters::{drip_emitters_in_plot, drip_emitters_on_line, drip_length_in_plot_m};
pub use heuristic::HeuristicResolver;
pub use view::NetworkView;

use crate::geom2::{px_to_m, Point};

/// Where a sub-pipe taps into a main pipe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MainConnection {
    /// Index into the main-pipe list the resolver was given.
    pub main: usize,
    /// Closest point on the main pipe.
    pub point: Point,
    /// Gap between the sub-pipe start and `point` (px).
    pub distance: f64,
    /// Arc length along the main pipe from its start to `point` (px).
    pub station: f64,
}

impl MainConnection {
    /// Distance from the pump along the main line, in meters.
    #[inline]
    pub fn station_m(&self) -> f64 {
        px_to_m(self.station)
    }
}

/// Membership rules used by the flow aggregator and reporter.
pub trait ProximityResolver {
    /// Does this sub-pipe feed the plot?
    fn sub_pipe_serves_plot(&self, sub_pipe: &[Point], plot: &[Point]) -> bool;

    /// Does this sprinkler water the plot, given the sub-pipes that serve it?
    fn sprinkler_serves_plot(
        &self,
        sprinkler: Point,
        plot: &[Point],
        serving_sub_pipes: &[&[Point]],
    ) -> bool;

    /// Is the sprinkler fed by this sub-pipe?
    fn sprinkler_attached(&self, sprinkler: Point, sub_pipe: &[Point]) -> bool;

    /// Is the drip-line fed by this sub-pipe?
    fn drip_line_attached(&self, drip_line: &[Point], sub_pipe: &[Point]) -> bool;

    /// Connection of the sub-pipe onto the nearest main pipe, if close enough.
    fn connect_to_main(&self, sub_pipe: &[Point], main_pipes: &[&[Point]])
        -> Option<MainConnection>;
}

#[cfg(test)]
mod tests;
