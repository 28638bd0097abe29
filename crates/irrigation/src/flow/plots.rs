//! Per-plot pipe profiles and their reading order.

use serde::{Deserialize, Serialize};

use super::network::NetworkFlows;
use crate::association::{drip_emitters_in_plot, NetworkView, ProximityResolver};
use crate::cfg::EngineCfg;
use crate::geom2::{polygon_area, polygon_centroid, px_to_m, Point};
use crate::model::Shape;

/// What reaches and runs through one plot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotPipeProfile {
    pub plot_id: String,
    pub plot_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,
    pub area_m2: f64,
    /// Farthest main-line distance from the pump to a sub-pipe feeding this plot.
    pub max_main_pipe_length: f64,
    /// Sum of those main-line distances over the plot's connected sub-pipes.
    pub total_main_pipe_length: f64,
    pub max_sub_pipe_length: f64,
    pub total_sub_pipe_length: f64,
    pub sub_pipe_count: usize,
    pub sprinkler_count: usize,
    pub drip_emitter_count: usize,
    pub flow_rate: f64,
}

/// One profile per plot, in reading order (see `order_plots`).
pub fn plot_profiles<R: ProximityResolver>(
    view: &NetworkView<'_>,
    flows: &NetworkFlows,
    resolver: &R,
    cfg: &EngineCfg,
) -> Vec<PlotPipeProfile> {
    let sprinklers = view.sprinkler_positions();
    let ordered = order_plots(&view.plots, cfg.proximity.plot_row_px);
    ordered
        .into_iter()
        .map(|plot| {
            let polygon = plot.points.as_slice();
            let mut profile = PlotPipeProfile {
                plot_id: plot.id.clone(),
                plot_name: plot.name.clone(),
                crop_type: plot.crop_type.clone(),
                area_m2: polygon_area(polygon),
                ..Default::default()
            };

            let mut serving: Vec<&[Point]> = Vec::new();
            for (sub, flow) in view.sub_pipes.iter().zip(&flows.sub_pipes) {
                if !resolver.sub_pipe_serves_plot(&sub.points, polygon) {
                    continue;
                }
                serving.push(&sub.points);
                let len_m = px_to_m(flow.length_px);
                profile.sub_pipe_count += 1;
                profile.total_sub_pipe_length += len_m;
                profile.max_sub_pipe_length = profile.max_sub_pipe_length.max(len_m);
                if let Some(conn) = flow.connection {
                    let station_m = conn.station_m();
                    profile.total_main_pipe_length += station_m;
                    profile.max_main_pipe_length = profile.max_main_pipe_length.max(station_m);
                }
            }

            profile.sprinkler_count = sprinklers
                .iter()
                .filter(|s| resolver.sprinkler_serves_plot(**s, polygon, &serving))
                .count();
            profile.drip_emitter_count = view
                .drip_lines
                .iter()
                .map(|d| drip_emitters_in_plot(d, polygon))
                .sum();
            profile.flow_rate = profile.sprinkler_count as f64 * cfg.flow.sprinkler_flow_rate
                + profile.drip_emitter_count as f64 * cfg.flow.drip_emitter_flow_rate;
            profile
        })
        .collect()
}

/// Reading order: top-to-bottom rows, left-to-right inside a row.
///
/// Plots are sorted by centroid y and cut into rows whenever a centroid sits
/// more than `row_px` below the first plot of the current row; each row is
/// then sorted by centroid x. Plots without vertices sort first.
pub fn order_plots<'a>(plots: &[&'a Shape], row_px: f64) -> Vec<&'a Shape> {
    let mut keyed: Vec<(Point, &'a Shape)> = plots
        .iter()
        .map(|p| {
            let c = polygon_centroid(&p.points)
                .unwrap_or_else(|| Point::new(f64::MIN, f64::MIN));
            (c, *p)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.y.total_cmp(&b.0.y));

    let mut rows: Vec<Vec<(Point, &'a Shape)>> = Vec::new();
    for entry in keyed {
        let new_row = rows
            .last()
            .is_none_or(|row| entry.0.y - row[0].0.y > row_px);
        if new_row {
            rows.push(vec![entry]);
        } else if let Some(row) = rows.last_mut() {
            row.push(entry);
        }
    }
    rows.into_iter()
        .flat_map(|mut row| {
            row.sort_by(|a, b| a.0.x.total_cmp(&b.0.x));
            row.into_iter().map(|(_, s)| s)
        })
        .collect()
}
