//! Engine configuration: emitter flow rates and proximity tolerances.
//!
//! Policy
//! - Every pixel tolerance the heuristics use lives here under a name; call
//!   sites never carry literals.
//! - Defaults are the values the drawing tool was tuned with. Partial JSON
//!   configs are accepted (`#[serde(default)]`), missing fields keep defaults.

use serde::{Deserialize, Serialize};

pub(crate) const SPRINKLER_FLOW_LPM: f64 = 10.0;
pub(crate) const DRIP_EMITTER_FLOW_LPM: f64 = 0.24;

/// Emitter discharge rates (L/min). Configuration inputs, never inferred.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowCfg {
    pub sprinkler_flow_rate: f64,
    pub drip_emitter_flow_rate: f64,
}

impl Default for FlowCfg {
    fn default() -> Self {
        Self {
            sprinkler_flow_rate: SPRINKLER_FLOW_LPM,
            drip_emitter_flow_rate: DRIP_EMITTER_FLOW_LPM,
        }
    }
}

/// Pixel/degree tolerances for the proximity heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProximityCfg {
    /// Sub-pipe point this close to a plot edge serves the plot.
    pub plot_edge_px: f64,
    /// Sprinkler this close to a serving sub-pipe belongs to the plot.
    pub sprinkler_to_sub_pipe_px: f64,
    /// Sub-pipe start this close to a main pipe is connected to it.
    pub main_connection_px: f64,
    /// Emitter this close to a sub-pipe is attached to it.
    pub emitter_attach_px: f64,
    /// Junction this close to a pipe end counts as an end connection.
    pub pipe_end_px: f64,
    /// Sub-pipes this close to the maximum length are longest-run candidates.
    pub longest_tie_px: f64,
    /// Attachment stations this close merge into one fitting.
    pub fitting_cluster_px: f64,
    /// Main-pipe corners deviating more than this (degrees) need an elbow.
    pub elbow_threshold_deg: f64,
    /// Plot centroids closer than this vertically share a row.
    pub plot_row_px: f64,
}

impl Default for ProximityCfg {
    fn default() -> Self {
        Self {
            plot_edge_px: 20.0,
            sprinkler_to_sub_pipe_px: 30.0,
            main_connection_px: 50.0,
            emitter_attach_px: 12.0,
            pipe_end_px: 12.0,
            longest_tie_px: 20.0,
            fitting_cluster_px: 8.0,
            elbow_threshold_deg: 18.0,
            plot_row_px: 50.0,
        }
    }
}

/// Full engine configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineCfg {
    pub flow: FlowCfg,
    pub proximity: ProximityCfg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: EngineCfg =
            serde_json::from_str(r#"{"flow": {"sprinklerFlowRate": 12.5}}"#).unwrap();
        assert_eq!(cfg.flow.sprinkler_flow_rate, 12.5);
        assert_eq!(cfg.flow.drip_emitter_flow_rate, DRIP_EMITTER_FLOW_LPM);
        assert_eq!(cfg.proximity, ProximityCfg::default());
    }
}
