//! Curated surface for tools built on the engine (CLI, benches, scripts).
//!
//! Not a stable API. Re-exports are grouped by pipeline stage and renamed
//! where a bare name would be ambiguous next to the others.

// Geometry kernel
pub use crate::geom2::{
    closest_point_on_polyline, closest_point_on_segment, distance_between_points,
    distance_point_to_polygon, distance_point_to_polyline, distance_point_to_segment,
    point_in_polygon, polygon_area, polygon_centroid, polyline_intersections, polyline_length,
    polyline_length_m, segment_intersection, side_of_polyline, station_along_polyline,
    turn_deviation_deg, Point, Projection, Side,
};
// Association
pub use crate::association::{
    drip_emitters_in_plot, drip_emitters_on_line, HeuristicResolver, MainConnection,
    NetworkView, ProximityResolver,
};
// Flow and critical runs
pub use crate::flow::{
    analyze_flows, critical_runs, network_flows, order_plots, pipe_flow_summary, plot_profiles,
    CriticalRunMetrics, NetworkFlows, PipeFlowSummary, PlotPipeProfile,
};
// Fittings
pub use crate::fittings::{
    count_fittings, fitting_report, FittingCounts, FittingKind, FittingReport,
    NetworkFittingCounts, SubmainFittings,
};
// Report and water boundary
pub use crate::report::{
    analyze, water_inputs, NetworkReport, NetworkTotals, PlotReport, PlotWaterInput,
    WaterIntensity, WaterRequirement, WaterRequirementEngine,
};
// Random layouts
pub use crate::layout::{
    draw_layout, draw_layouts, GridSize, LayoutCfg, ReplayToken as LayoutReplay,
};
