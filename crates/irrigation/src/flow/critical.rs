//! Longest-run ("critical") metrics used for pipe sizing.
//!
//! - Longest main: greatest polyline length; its flow is the average flow per
//!   sub-pipe times the sub-pipes it feeds.
//! - Longest sub: among sub-pipes within `longest_tie_px` of the maximum
//!   length, the one with the most attached emitters. Equal emitter counts
//!   keep the earliest candidate in input order.

use serde::{Deserialize, Serialize};

use super::network::NetworkFlows;
use crate::cfg::ProximityCfg;
use crate::geom2::px_to_m;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongestMain {
    pub length: f64,
    pub connections: usize,
    pub flow_rate: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongestSub {
    pub length: f64,
    pub emitters: usize,
    pub flow_rate: f64,
}

/// Worst-case runs of the network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalRunMetrics {
    pub main: LongestMain,
    pub sub: LongestSub,
}

pub fn critical_runs(flows: &NetworkFlows, prox: &ProximityCfg) -> CriticalRunMetrics {
    CriticalRunMetrics {
        main: longest_main(flows),
        sub: longest_sub(flows, prox),
    }
}

fn longest_main(flows: &NetworkFlows) -> LongestMain {
    let mut best: Option<&super::MainPipeFlow> = None;
    for m in &flows.main_pipes {
        if best.is_none_or(|b| m.length_px > b.length_px) {
            best = Some(m);
        }
    }
    let Some(main) = best else {
        return LongestMain::default();
    };
    let flow_rate = if flows.sub_pipes.is_empty() {
        flows.total_flow_rate
    } else {
        flows.average_flow_per_sub_pipe() * main.connections as f64
    };
    LongestMain {
        length: px_to_m(main.length_px),
        connections: main.connections,
        flow_rate,
    }
}

fn longest_sub(flows: &NetworkFlows, prox: &ProximityCfg) -> LongestSub {
    let max_len = flows
        .sub_pipes
        .iter()
        .map(|s| s.length_px)
        .fold(f64::NEG_INFINITY, f64::max);
    if !max_len.is_finite() {
        return LongestSub {
            length: 0.0,
            emitters: 0,
            flow_rate: flows.average_flow_per_sub_pipe(),
        };
    }
    let mut best: Option<&super::SubPipeFlow> = None;
    for s in flows
        .sub_pipes
        .iter()
        .filter(|s| max_len - s.length_px <= prox.longest_tie_px)
    {
        if best.is_none_or(|b| s.emitters() > b.emitters()) {
            best = Some(s);
        }
    }
    best.map_or_else(LongestSub::default, |s| LongestSub {
        length: px_to_m(s.length_px),
        emitters: s.emitters(),
        flow_rate: s.flow_rate,
    })
}
