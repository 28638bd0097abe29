//! Pipe-fitting counts (2-/3-/4-way) inferred from geometry alone.
//!
//! Purpose
//! - Count the connectors a build needs: elbows on bent main pipes, tees or
//!   end couplings where sub-pipes tap the main line, and tees/crosses where
//!   drip-lines and sprinklers attach to sub-pipes.
//!
//! Layout
//! - `main_line.rs`: elbows and main↔sub junctions.
//! - `submain.rs`: attachment stations along each sub-pipe, clustering and
//!   per-cluster classification.
//!
//! Invariant: on every sub-pipe, `two_way + three_way + four_way` equals the
//! number of attachment clusters found on it.

mod main_line;
mod submain;

pub use main_line::{find_main_junction, main_elbows, JunctionSource, MainJunction};
pub use submain::{
    cluster_attachments, collect_attachments, submain_fittings, Attachment, AttachmentCluster,
    ClassifiedCluster, SubmainFittings,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::association::NetworkView;
use crate::cfg::ProximityCfg;
use crate::model::Snapshot;

/// Number of pipe ends a fitting joins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FittingKind {
    TwoWay,
    ThreeWay,
    FourWay,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FittingCounts {
    pub two_way: usize,
    pub three_way: usize,
    pub four_way: usize,
}

impl FittingCounts {
    pub fn add(&mut self, kind: FittingKind) {
        match kind {
            FittingKind::TwoWay => self.two_way += 1,
            FittingKind::ThreeWay => self.three_way += 1,
            FittingKind::FourWay => self.four_way += 1,
        }
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.two_way + self.three_way + self.four_way
    }
}

impl std::ops::Add for FittingCounts {
    type Output = FittingCounts;
    fn add(self, rhs: FittingCounts) -> Self::Output {
        FittingCounts {
            two_way: self.two_way + rhs.two_way,
            three_way: self.three_way + rhs.three_way,
            four_way: self.four_way + rhs.four_way,
        }
    }
}

/// Network totals, flattened and split by main line vs. submains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFittingCounts {
    pub two_way: usize,
    pub three_way: usize,
    pub four_way: usize,
    pub main: FittingCounts,
    pub submain: FittingCounts,
}

impl NetworkFittingCounts {
    pub fn from_parts(main: FittingCounts, submain: FittingCounts) -> Self {
        let all = main + submain;
        Self {
            two_way: all.two_way,
            three_way: all.three_way,
            four_way: all.four_way,
            main,
            submain,
        }
    }
}

/// Everything the classifier found, for reporting and inspection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FittingReport {
    pub counts: NetworkFittingCounts,
    pub junctions: Vec<MainJunction>,
    pub submains: Vec<SubmainFittings>,
}

/// Run every fitting pass over a typed view.
pub fn fitting_report(view: &NetworkView<'_>, prox: &ProximityCfg) -> FittingReport {
    let mains = view.main_paths();
    let pumps = view.pump_positions();
    let sprinklers = view.sprinkler_positions();
    let drips: Vec<_> = view.drip_lines.iter().map(|d| d.points.as_slice()).collect();

    let mut main = FittingCounts::default();
    for m in &mains {
        main.two_way += main_elbows(m, &pumps, prox);
    }

    let mut junctions = Vec::new();
    let mut submains = Vec::with_capacity(view.sub_pipes.len());
    for sub in &view.sub_pipes {
        if let Some(j) = find_main_junction(&sub.id, &sub.points, &view.main_pipes, prox) {
            main.add(j.kind());
            junctions.push(j);
        }
        submains.push(submain_fittings(
            &sub.id,
            &sub.points,
            &mains,
            &drips,
            &sprinklers,
            prox,
        ));
    }
    let submain = submains
        .iter()
        .fold(FittingCounts::default(), |acc, s| acc + s.counts);

    let counts = NetworkFittingCounts::from_parts(main, submain);
    debug!(
        two_way = counts.two_way,
        three_way = counts.three_way,
        four_way = counts.four_way,
        junctions = junctions.len(),
        "fitting_report"
    );
    FittingReport {
        counts,
        junctions,
        submains,
    }
}

/// Fitting totals for a snapshot.
pub fn count_fittings(snapshot: &Snapshot, prox: &ProximityCfg) -> NetworkFittingCounts {
    fitting_report(&NetworkView::new(snapshot), prox).counts
}
