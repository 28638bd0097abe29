//! Network flow aggregation (bottom-up) and pipe-sizing metrics.
//!
//! Purpose
//! - Push emitter discharge up the inferred tree: emitters → sub-pipes (by
//!   attachment) → main pipes (by connection). Nothing flows top-down.
//! - Summarize per plot (`PlotPipeProfile`) and for the whole network
//!   (`PipeFlowSummary`), including the worst-case "longest run" metrics used
//!   to size pipes.
//!
//! Layout
//! - `network.rs`: per-pipe flows (`NetworkFlows`) and the summary.
//! - `critical.rs`: longest main / longest sub selection.
//! - `plots.rs`: per-plot profiles and their reading order.
//!
//! All rates are L/min, all lengths meters unless a field says `_px`.

mod critical;
mod network;
mod plots;

pub use critical::{critical_runs, CriticalRunMetrics, LongestMain, LongestSub};
pub use network::{network_flows, pipe_flow_summary, MainPipeFlow, NetworkFlows, SubPipeFlow};
pub use plots::{order_plots, plot_profiles, PlotPipeProfile};

use serde::{Deserialize, Serialize};

use crate::association::{HeuristicResolver, NetworkView};
use crate::cfg::EngineCfg;
use crate::model::Snapshot;

/// Connection counts across the network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connections {
    pub main_to_sub: usize,
    pub sub_to_emitters: usize,
}

/// Aggregate flow figures for the whole network.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipeFlowSummary {
    pub main_pipe_count: usize,
    pub sub_pipe_count: usize,
    pub total_emitters: usize,
    pub total_flow_rate: f64,
    /// Largest flow carried by a single main pipe.
    pub main_pipe_flow_rate: f64,
    /// Largest flow carried by a single sub-pipe.
    pub sub_pipe_flow_rate: f64,
    pub connections: Connections,
    pub longest: CriticalRunMetrics,
}

/// Per-plot profiles plus the network summary, computed with the default
/// heuristic resolver.
pub fn analyze_flows(
    snapshot: &Snapshot,
    cfg: &EngineCfg,
) -> (Vec<PlotPipeProfile>, PipeFlowSummary) {
    let view = NetworkView::new(snapshot);
    let resolver = HeuristicResolver::new(cfg.proximity);
    let flows = network_flows(&view, &resolver, &cfg.flow);
    let profiles = plot_profiles(&view, &flows, &resolver, cfg);
    let summary = pipe_flow_summary(&flows, &cfg.proximity);
    (profiles, summary)
}

#[cfg(test)]
mod tests;
