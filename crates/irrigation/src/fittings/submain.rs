//! Submain fittings: what attaches along each sub-pipe, and where.
//!
//! Model
//! - Attachments are stations (px along the sub-pipe). A drip-line passing
//!   through the sub-pipe is a crossing; a drip-line ending on it or a
//!   sprinkler next to it is a tee (branch).
//! - Sorted stations are scanned once. A new cluster starts only between two
//!   tees more than `fitting_cluster_px` apart; every other neighbour pair
//!   stays in one cluster, which is a crossing cluster if any member crosses.
//! - Cluster → fitting: crossing at a sub-pipe end 3-way, crossing mid-run
//!   4-way; tee at the far end (away from the main line) 2-way, any other tee
//!   3-way.

use serde::{Deserialize, Serialize};

use super::{FittingCounts, FittingKind};
use crate::cfg::ProximityCfg;
use crate::geom2::{
    distance_point_to_polyline, polyline_intersections, polyline_length, side_of_polyline,
    station_along_polyline, Point,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub station: f64,
    pub crossing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentCluster {
    /// First and last member station (px).
    pub start: f64,
    pub end: f64,
    pub members: usize,
    pub crossing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedCluster {
    pub cluster: AttachmentCluster,
    pub kind: FittingKind,
}

/// Fittings found on one sub-pipe.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmainFittings {
    pub sub_pipe_id: String,
    pub clusters: Vec<ClassifiedCluster>,
    pub counts: FittingCounts,
}

/// Attachment stations along `sub`, sorted ascending.
pub fn collect_attachments(
    sub: &[Point],
    drip_lines: &[&[Point]],
    sprinklers: &[Point],
    prox: &ProximityCfg,
) -> Vec<Attachment> {
    let mut out = Vec::new();
    if sub.len() < 2 {
        return out;
    }
    for drip in drip_lines {
        let (Some(&a), Some(&b)) = (drip.first(), drip.last()) else {
            continue;
        };
        let hits = polyline_intersections(sub, drip);
        if !hits.is_empty() {
            let through = side_of_polyline(sub, a).opposes(side_of_polyline(sub, b));
            let crossing = through || hits.len() >= 2;
            out.extend(hits.iter().map(|h| Attachment {
                station: h.station,
                crossing,
            }));
            continue;
        }
        let (da, db) = (
            distance_point_to_polyline(a, sub),
            distance_point_to_polyline(b, sub),
        );
        let (end, d) = if da <= db { (a, da) } else { (b, db) };
        if d < prox.emitter_attach_px {
            out.push(Attachment {
                station: station_along_polyline(sub, end),
                crossing: false,
            });
        }
    }
    for &s in sprinklers {
        if distance_point_to_polyline(s, sub) < prox.emitter_attach_px {
            out.push(Attachment {
                station: station_along_polyline(sub, s),
                crossing: false,
            });
        }
    }
    out.sort_by(|x, y| x.station.total_cmp(&y.station));
    out
}

/// Merge sorted attachments into fitting clusters.
///
/// A gap splits only when both neighbours are tees; a crossing pulls its
/// neighbours on either side into its cluster.
pub fn cluster_attachments(sorted: &[Attachment], gap_px: f64) -> Vec<AttachmentCluster> {
    let mut clusters: Vec<AttachmentCluster> = Vec::new();
    let mut prev: Option<&Attachment> = None;
    for a in sorted {
        let joins = prev.is_some_and(|p| {
            a.station - p.station <= gap_px || p.crossing || a.crossing
        });
        prev = Some(a);
        if let Some(last) = clusters.last_mut().filter(|_| joins) {
            last.end = a.station;
            last.members += 1;
            last.crossing |= a.crossing;
            continue;
        }
        clusters.push(AttachmentCluster {
            start: a.station,
            end: a.station,
            members: 1,
            crossing: a.crossing,
        });
    }
    clusters
}

/// Classify clusters on a sub-pipe of `length_px`. `far_end_at_start` says
/// the start of the sub-pipe (station 0) is the end away from the main line.
fn classify(
    c: AttachmentCluster,
    length_px: f64,
    far_end_at_start: bool,
    prox: &ProximityCfg,
) -> FittingKind {
    let at_start = c.start < prox.pipe_end_px;
    let at_end = length_px - c.end < prox.pipe_end_px;
    if c.crossing {
        return if at_start || at_end {
            FittingKind::ThreeWay
        } else {
            FittingKind::FourWay
        };
    }
    let at_far_end = if far_end_at_start { at_start } else { at_end };
    if at_far_end {
        FittingKind::TwoWay
    } else {
        FittingKind::ThreeWay
    }
}

/// Collect, cluster and classify the fittings on one sub-pipe.
pub fn submain_fittings(
    sub_id: &str,
    sub: &[Point],
    mains: &[&[Point]],
    drip_lines: &[&[Point]],
    sprinklers: &[Point],
    prox: &ProximityCfg,
) -> SubmainFittings {
    let mut out = SubmainFittings {
        sub_pipe_id: sub_id.to_string(),
        ..Default::default()
    };
    let (Some(&first), Some(&last)) = (sub.first(), sub.last()) else {
        return out;
    };
    // Without a main line the start is taken as the feed end.
    let far_end_at_start = if mains.is_empty() {
        false
    } else {
        let to_main = |p: Point| {
            mains
                .iter()
                .map(|m| distance_point_to_polyline(p, m))
                .fold(f64::INFINITY, f64::min)
        };
        to_main(first) > to_main(last)
    };
    let length_px = polyline_length(sub);
    let attachments = collect_attachments(sub, drip_lines, sprinklers, prox);
    for cluster in cluster_attachments(&attachments, prox.fitting_cluster_px) {
        let kind = classify(cluster, length_px, far_end_at_start, prox);
        out.counts.add(kind);
        out.clusters.push(ClassifiedCluster { cluster, kind });
    }
    out
}
