//! Network report: per-plot profiles, flow summary, fittings and totals in
//! one serializable object.
//!
//! Purpose
//! - `analyze` is the single entry point the CLI and other callers use.
//! - Water requirements are computed elsewhere (crop catalog arithmetic).
//!   This module only forwards plot geometry (`water_inputs`) and merges the
//!   returned figures back per plot (`NetworkReport::merge_water`).
//!
//! Policy
//! - Pure aggregation. Every number here is a sum or max of values computed
//!   by `flow` and `fittings`; nothing is re-derived from geometry except pipe
//!   lengths for the totals.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::association::{HeuristicResolver, NetworkView};
use crate::cfg::EngineCfg;
use crate::fittings::{fitting_report, NetworkFittingCounts};
use crate::flow::{
    network_flows, pipe_flow_summary, plot_profiles, PipeFlowSummary, PlotPipeProfile,
};
use crate::geom2::{polyline_length_m, Point};
use crate::model::{ElementKind, IrrigationElement, Shape, Snapshot};

/// Daily water demand band, by liters per m² per day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WaterIntensity {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl WaterIntensity {
    /// `low < 5 ≤ medium < 15 ≤ high < 30 ≤ very-high`
    pub fn classify(liters_per_m2_per_day: f64) -> Self {
        if liters_per_m2_per_day < 5.0 {
            WaterIntensity::Low
        } else if liters_per_m2_per_day < 15.0 {
            WaterIntensity::Medium
        } else if liters_per_m2_per_day < 30.0 {
            WaterIntensity::High
        } else {
            WaterIntensity::VeryHigh
        }
    }
}

/// Plot geometry handed to the water requirement engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotWaterInput {
    pub plot_id: String,
    pub plot_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,
    #[serde(with = "crate::model::xy_points")]
    pub points: Vec<Point>,
}

/// Figures returned by the water requirement engine for one plot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterRequirement {
    pub plot_id: String,
    #[serde(default)]
    pub plot_name: String,
    pub daily_liters: f64,
    pub weekly_liters: f64,
    pub monthly_liters: f64,
    pub liters_per_m2_per_day: f64,
    pub intensity: WaterIntensity,
}

/// External collaborator turning plot geometry and crop into water volumes.
pub trait WaterRequirementEngine {
    fn requirements(&self, inputs: &[PlotWaterInput]) -> Vec<WaterRequirement>;
}

/// Plots of `shapes`, in input order, as water engine inputs.
pub fn water_inputs(shapes: &[Shape]) -> Vec<PlotWaterInput> {
    shapes
        .iter()
        .filter(|s| s.is_plot())
        .map(|s| PlotWaterInput {
            plot_id: s.id.clone(),
            plot_name: s.name.clone(),
            crop_type: s.crop_type.clone(),
            points: s.points.clone(),
        })
        .collect()
}

/// Network-wide sums and device inventory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkTotals {
    pub plot_count: usize,
    pub total_area_m2: f64,
    pub total_main_pipe_length: f64,
    pub total_sub_pipe_length: f64,
    /// Farthest main-line distance to any plot (m).
    pub max_main_pipe_distance: f64,
    pub sprinkler_count: usize,
    pub drip_emitter_count: usize,
    pub total_plot_flow_rate: f64,
    pub pump_count: usize,
    pub solenoid_valve_count: usize,
    pub ball_valve_count: usize,
    pub water_tank_count: usize,
    pub water_tank_capacity_liters: f64,
    pub fertilizer_machine_count: usize,
}

impl NetworkTotals {
    fn collect(snapshot: &Snapshot, view: &NetworkView<'_>, profiles: &[PlotPipeProfile]) -> Self {
        let count = |kind| snapshot.elements_of(kind).count();
        let length = |pipes: &[&IrrigationElement]| -> f64 {
            pipes.iter().map(|p| polyline_length_m(&p.points)).sum()
        };
        let mut totals = NetworkTotals {
            plot_count: profiles.len(),
            total_main_pipe_length: length(&view.main_pipes),
            total_sub_pipe_length: length(&view.sub_pipes),
            pump_count: count(ElementKind::Pump),
            solenoid_valve_count: count(ElementKind::SolenoidValve),
            ball_valve_count: count(ElementKind::BallValve),
            water_tank_count: count(ElementKind::WaterTank),
            water_tank_capacity_liters: snapshot
                .elements_of(ElementKind::WaterTank)
                .filter_map(|t| t.capacity_liters)
                .sum(),
            fertilizer_machine_count: count(ElementKind::FertilizerMachine),
            ..Default::default()
        };
        for p in profiles {
            totals.total_area_m2 += p.area_m2;
            totals.max_main_pipe_distance =
                totals.max_main_pipe_distance.max(p.max_main_pipe_length);
            totals.sprinkler_count += p.sprinkler_count;
            totals.drip_emitter_count += p.drip_emitter_count;
            totals.total_plot_flow_rate += p.flow_rate;
        }
        totals
    }
}

/// One plot's profile with its water figures, once merged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotReport {
    #[serde(flatten)]
    pub profile: PlotPipeProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water: Option<WaterRequirement>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkReport {
    pub plots: Vec<PlotReport>,
    pub summary: PipeFlowSummary,
    pub fittings: NetworkFittingCounts,
    pub totals: NetworkTotals,
}

impl NetworkReport {
    /// Attach water figures to plots: match by plot id, then by plot name.
    /// Returns how many plots received figures. Unmatched requirements are
    /// ignored.
    pub fn merge_water(&mut self, requirements: &[WaterRequirement]) -> usize {
        let mut merged = 0;
        for plot in &mut self.plots {
            let by_id = requirements
                .iter()
                .find(|r| r.plot_id == plot.profile.plot_id);
            let found = by_id.or_else(|| {
                requirements.iter().find(|r| {
                    !r.plot_name.is_empty() && r.plot_name == plot.profile.plot_name
                })
            });
            if let Some(r) = found {
                plot.water = Some(r.clone());
                merged += 1;
            }
        }
        merged
    }

    /// Ask `engine` for the plots of `snapshot` and merge the answer.
    pub fn fill_water<E: WaterRequirementEngine>(
        &mut self,
        engine: &E,
        snapshot: &Snapshot,
    ) -> usize {
        let inputs = water_inputs(&snapshot.shapes);
        let requirements = engine.requirements(&inputs);
        self.merge_water(&requirements)
    }
}

/// Run the full pipeline with the heuristic resolver.
pub fn analyze(snapshot: &Snapshot, cfg: &EngineCfg) -> NetworkReport {
    let view = NetworkView::new(snapshot);
    let resolver = HeuristicResolver::new(cfg.proximity);
    let flows = network_flows(&view, &resolver, &cfg.flow);
    let profiles = plot_profiles(&view, &flows, &resolver, cfg);
    let summary = pipe_flow_summary(&flows, &cfg.proximity);
    let fittings = fitting_report(&view, &cfg.proximity).counts;
    let totals = NetworkTotals::collect(snapshot, &view, &profiles);
    debug!(
        plots = totals.plot_count,
        main_pipes = summary.main_pipe_count,
        sub_pipes = summary.sub_pipe_count,
        emitters = summary.total_emitters,
        total_flow = summary.total_flow_rate,
        "analyze"
    );
    NetworkReport {
        plots: profiles
            .into_iter()
            .map(|profile| PlotReport {
                profile,
                water: None,
            })
            .collect(),
        summary,
        fittings,
        totals,
    }
}
