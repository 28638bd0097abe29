//! Main-line fittings: elbows at bends and sub-pipe take-offs.

use super::FittingKind;
use crate::cfg::ProximityCfg;
use crate::geom2::{
    closest_point_on_polyline, distance_between_points, distance_point_to_polyline,
    polyline_intersections, side_of_polyline, turn_deviation_deg, Point,
};
use crate::model::IrrigationElement;

/// Elbows needed along one main pipe.
///
/// Every interior vertex bending more than `elbow_threshold_deg` away from
/// straight needs one, except the vertex next to the pump end (the pump
/// fitting covers it). The pump end is the endpoint nearest a pump within
/// `main_connection_px`; without such a pump nothing is skipped.
pub fn main_elbows(main: &[Point], pumps: &[Point], prox: &ProximityCfg) -> usize {
    let n = main.len();
    if n < 3 {
        return 0;
    }
    let nearest_pump = |p: Point| {
        pumps
            .iter()
            .map(|q| distance_between_points(p, *q))
            .fold(f64::INFINITY, f64::min)
    };
    let (d_start, d_end) = (nearest_pump(main[0]), nearest_pump(main[n - 1]));
    let skipped = if d_start.min(d_end) < prox.main_connection_px {
        Some(if d_start <= d_end { 1 } else { n - 2 })
    } else {
        None
    };
    (1..n - 1)
        .filter(|&i| Some(i) != skipped)
        .filter(|&i| {
            turn_deviation_deg(main[i - 1], main[i], main[i + 1]) > prox.elbow_threshold_deg
        })
        .count()
}

/// How a main↔sub junction was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JunctionSource {
    /// The pipes cross or touch.
    Intersection,
    /// A sub-pipe end lies within `pipe_end_px` of the main pipe.
    EndpointProximity,
    /// The sub-pipe ends straddle the main pipe without an exact hit.
    SideMismatch,
}

/// Where a sub-pipe meets the main line.
#[derive(Clone, Debug, PartialEq)]
pub struct MainJunction {
    pub sub_pipe_id: String,
    pub main_pipe_id: String,
    pub point: Point,
    pub source: JunctionSource,
    /// Junction sits at a main-pipe end (coupling) rather than mid-run (tee).
    pub end_connection: bool,
}

impl MainJunction {
    pub fn kind(&self) -> FittingKind {
        if self.end_connection {
            FittingKind::TwoWay
        } else {
            FittingKind::ThreeWay
        }
    }
}

struct Candidate {
    main: usize,
    point: Point,
    /// Ordering key inside one detection pass (lower wins).
    rank: f64,
}

fn keep_best(best: &mut Option<Candidate>, c: Candidate) {
    if best.as_ref().is_none_or(|b| c.rank < b.rank) {
        *best = Some(c);
    }
}

/// Locate the junction between a sub-pipe and the main line.
///
/// Passes, first success wins: explicit intersection (nearest the sub-pipe
/// start), sub-pipe end within `pipe_end_px`, ends on opposite sides of a
/// main pipe with the nearer end within `main_connection_px`.
pub fn find_main_junction(
    sub_id: &str,
    sub: &[Point],
    mains: &[&IrrigationElement],
    prox: &ProximityCfg,
) -> Option<MainJunction> {
    let (first, last) = (*sub.first()?, *sub.last()?);
    if sub.len() < 2 {
        return None;
    }

    let mut best = None;
    for (m, main) in mains.iter().enumerate() {
        if let Some(hit) = polyline_intersections(sub, &main.points).first() {
            keep_best(
                &mut best,
                Candidate {
                    main: m,
                    point: hit.point,
                    rank: hit.station,
                },
            );
        }
    }
    let mut found = best.map(|c| (c, JunctionSource::Intersection));

    if found.is_none() {
        let mut best = None;
        for (m, main) in mains.iter().enumerate() {
            for end in [first, last] {
                let Some(proj) = closest_point_on_polyline(&main.points, end) else {
                    continue;
                };
                if proj.distance < prox.pipe_end_px {
                    keep_best(
                        &mut best,
                        Candidate {
                            main: m,
                            point: proj.point,
                            rank: proj.distance,
                        },
                    );
                }
            }
        }
        found = best.map(|c| (c, JunctionSource::EndpointProximity));
    }

    if found.is_none() {
        let mut best = None;
        for (m, main) in mains.iter().enumerate() {
            let path = main.points.as_slice();
            if !side_of_polyline(path, first).opposes(side_of_polyline(path, last)) {
                continue;
            }
            let near = if distance_point_to_polyline(first, path)
                <= distance_point_to_polyline(last, path)
            {
                first
            } else {
                last
            };
            let Some(proj) = closest_point_on_polyline(path, near) else {
                continue;
            };
            if proj.distance < prox.main_connection_px {
                keep_best(
                    &mut best,
                    Candidate {
                        main: m,
                        point: proj.point,
                        rank: proj.distance,
                    },
                );
            }
        }
        found = best.map(|c| (c, JunctionSource::SideMismatch));
    }

    let (c, source) = found?;
    let main = &mains[c.main].points;
    let end_connection = [main[0], main[main.len() - 1]]
        .iter()
        .any(|e| distance_between_points(*e, c.point) < prox.pipe_end_px);
    Some(MainJunction {
        sub_pipe_id: sub_id.to_string(),
        main_pipe_id: mains[c.main].id.clone(),
        point: c.point,
        source,
        end_connection,
    })
}
