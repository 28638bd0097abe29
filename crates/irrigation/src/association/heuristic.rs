//! Tolerance-based `ProximityResolver`.
//!
//! Rules (tolerances from `ProximityCfg`)
//! - Sub-pipe serves plot: an endpoint inside, else a segment midpoint
//!   inside, else any vertex within `plot_edge_px` of the boundary (pipes
//!   drawn right on the plot edge).
//! - Sprinkler serves plot: inside, or within `sprinkler_to_sub_pipe_px` of a
//!   serving sub-pipe.
//! - Attachment to a sub-pipe: within `emitter_attach_px`; a drip-line also
//!   attaches by crossing the sub-pipe.
//! - Main connection: sub-pipe start within `main_connection_px` of the
//!   globally closest main-pipe point.

use super::{MainConnection, ProximityResolver};
use crate::cfg::ProximityCfg;
use crate::geom2::{
    closest_point_on_segment, distance_between_points, distance_point_to_polygon,
    distance_point_to_polyline, point_in_polygon, polyline_intersections, Point,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicResolver {
    pub cfg: ProximityCfg,
}

impl HeuristicResolver {
    pub fn new(cfg: ProximityCfg) -> Self {
        Self { cfg }
    }
}

impl ProximityResolver for HeuristicResolver {
    fn sub_pipe_serves_plot(&self, sub_pipe: &[Point], plot: &[Point]) -> bool {
        if plot.len() < 3 || sub_pipe.is_empty() {
            return false;
        }
        let ends = [sub_pipe[0], sub_pipe[sub_pipe.len() - 1]];
        if ends.iter().any(|p| point_in_polygon(*p, plot)) {
            return true;
        }
        if sub_pipe
            .windows(2)
            .any(|w| point_in_polygon((w[0] + w[1]) / 2.0, plot))
        {
            return true;
        }
        sub_pipe
            .iter()
            .any(|p| distance_point_to_polygon(*p, plot) < self.cfg.plot_edge_px)
    }

    fn sprinkler_serves_plot(
        &self,
        sprinkler: Point,
        plot: &[Point],
        serving_sub_pipes: &[&[Point]],
    ) -> bool {
        point_in_polygon(sprinkler, plot)
            || serving_sub_pipes.iter().any(|sub| {
                distance_point_to_polyline(sprinkler, sub) < self.cfg.sprinkler_to_sub_pipe_px
            })
    }

    fn sprinkler_attached(&self, sprinkler: Point, sub_pipe: &[Point]) -> bool {
        distance_point_to_polyline(sprinkler, sub_pipe) < self.cfg.emitter_attach_px
    }

    fn drip_line_attached(&self, drip_line: &[Point], sub_pipe: &[Point]) -> bool {
        let (Some(first), Some(last)) = (drip_line.first(), drip_line.last()) else {
            return false;
        };
        let tol = self.cfg.emitter_attach_px;
        distance_point_to_polyline(*first, sub_pipe) < tol
            || distance_point_to_polyline(*last, sub_pipe) < tol
            || !polyline_intersections(sub_pipe, drip_line).is_empty()
    }

    fn connect_to_main(
        &self,
        sub_pipe: &[Point],
        main_pipes: &[&[Point]],
    ) -> Option<MainConnection> {
        let start = *sub_pipe.first()?;
        let mut best: Option<MainConnection> = None;
        for (m, main) in main_pipes.iter().enumerate() {
            let mut station0 = 0.0;
            for w in main.windows(2) {
                let proj = closest_point_on_segment(start, w[0], w[1]);
                let seg_len = distance_between_points(w[0], w[1]);
                if best.as_ref().is_none_or(|b| proj.distance < b.distance) {
                    best = Some(MainConnection {
                        main: m,
                        point: proj.point,
                        distance: proj.distance,
                        station: station0 + proj.t * seg_len,
                    });
                }
                station0 += seg_len;
            }
        }
        best.filter(|c| c.distance < self.cfg.main_connection_px)
    }
}
