//! Per-pipe flows: what each sub-pipe and main pipe carries.

use tracing::debug;

use super::critical::critical_runs;
use super::{Connections, PipeFlowSummary};
use crate::association::{drip_emitters_on_line, MainConnection, NetworkView, ProximityResolver};
use crate::cfg::{FlowCfg, ProximityCfg};
use crate::geom2::polyline_length;

/// Flow carried by one sub-pipe.
#[derive(Clone, Debug, PartialEq)]
pub struct SubPipeFlow {
    pub id: String,
    pub length_px: f64,
    /// Attached sprinklers.
    pub sprinklers: usize,
    /// Emitters of attached drip-lines.
    pub drip_emitters: usize,
    pub flow_rate: f64,
    pub connection: Option<MainConnection>,
}

impl SubPipeFlow {
    #[inline]
    pub fn emitters(&self) -> usize {
        self.sprinklers + self.drip_emitters
    }
}

/// Flow carried by one main pipe.
#[derive(Clone, Debug, PartialEq)]
pub struct MainPipeFlow {
    pub id: String,
    pub length_px: f64,
    /// Sub-pipes connected to this main pipe.
    pub connections: usize,
    pub flow_rate: f64,
}

/// Every pipe's flow plus network-wide emitter totals.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkFlows {
    pub main_pipes: Vec<MainPipeFlow>,
    pub sub_pipes: Vec<SubPipeFlow>,
    pub total_emitters: usize,
    pub total_flow_rate: f64,
}

impl NetworkFlows {
    /// Network flow shared evenly across sub-pipes; the whole flow when there
    /// are none.
    pub fn average_flow_per_sub_pipe(&self) -> f64 {
        if self.sub_pipes.is_empty() {
            self.total_flow_rate
        } else {
            self.total_flow_rate / self.sub_pipes.len() as f64
        }
    }
}

/// Compute flows bottom-up: emitters → sub-pipes → main pipes.
pub fn network_flows<R: ProximityResolver>(
    view: &NetworkView<'_>,
    resolver: &R,
    rates: &FlowCfg,
) -> NetworkFlows {
    let sprinklers = view.sprinkler_positions();
    let drip_counts: Vec<usize> = view
        .drip_lines
        .iter()
        .map(|d| drip_emitters_on_line(d))
        .collect();
    let total_drips: usize = drip_counts.iter().sum();
    let total_emitters = sprinklers.len() + total_drips;
    let total_flow_rate = sprinklers.len() as f64 * rates.sprinkler_flow_rate
        + total_drips as f64 * rates.drip_emitter_flow_rate;

    let mains = view.main_paths();
    let sub_pipes: Vec<SubPipeFlow> = view
        .sub_pipes
        .iter()
        .map(|sub| {
            let path = sub.points.as_slice();
            let attached_sprinklers = sprinklers
                .iter()
                .filter(|s| resolver.sprinkler_attached(**s, path))
                .count();
            let attached_drips: usize = view
                .drip_lines
                .iter()
                .zip(&drip_counts)
                .filter(|(d, _)| resolver.drip_line_attached(&d.points, path))
                .map(|(_, n)| *n)
                .sum();
            SubPipeFlow {
                id: sub.id.clone(),
                length_px: polyline_length(path),
                sprinklers: attached_sprinklers,
                drip_emitters: attached_drips,
                flow_rate: attached_sprinklers as f64 * rates.sprinkler_flow_rate
                    + attached_drips as f64 * rates.drip_emitter_flow_rate,
                connection: resolver.connect_to_main(path, &mains),
            }
        })
        .collect();

    let main_pipes = view
        .main_pipes
        .iter()
        .enumerate()
        .map(|(m, main)| {
            let fed: Vec<&SubPipeFlow> = sub_pipes
                .iter()
                .filter(|s| s.connection.is_some_and(|c| c.main == m))
                .collect();
            let flow_rate = if sub_pipes.is_empty() {
                total_flow_rate
            } else {
                fed.iter().map(|s| s.flow_rate).sum()
            };
            MainPipeFlow {
                id: main.id.clone(),
                length_px: polyline_length(&main.points),
                connections: fed.len(),
                flow_rate,
            }
        })
        .collect();

    let flows = NetworkFlows {
        main_pipes,
        sub_pipes,
        total_emitters,
        total_flow_rate,
    };
    debug!(
        mains = flows.main_pipes.len(),
        subs = flows.sub_pipes.len(),
        emitters = flows.total_emitters,
        flow = flows.total_flow_rate,
        "network_flows"
    );
    flows
}

#[inline]
fn max_or_zero(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}

/// Fold per-pipe flows into the network summary.
pub fn pipe_flow_summary(flows: &NetworkFlows, prox: &ProximityCfg) -> PipeFlowSummary {
    PipeFlowSummary {
        main_pipe_count: flows.main_pipes.len(),
        sub_pipe_count: flows.sub_pipes.len(),
        total_emitters: flows.total_emitters,
        total_flow_rate: flows.total_flow_rate,
        main_pipe_flow_rate: max_or_zero(flows.main_pipes.iter().map(|m| m.flow_rate)),
        sub_pipe_flow_rate: max_or_zero(flows.sub_pipes.iter().map(|s| s.flow_rate)),
        connections: Connections {
            main_to_sub: flows
                .sub_pipes
                .iter()
                .filter(|s| s.connection.is_some())
                .count(),
            sub_to_emitters: flows.sub_pipes.iter().map(|s| s.emitters()).sum(),
        },
        longest: critical_runs(flows, prox),
    }
}
