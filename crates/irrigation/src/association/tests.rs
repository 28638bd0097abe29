use super::*;
use crate::cfg::ProximityCfg;
use crate::model::{ElementKind, IrrigationElement, Shape, ShapeKind, Snapshot};
use nalgebra::vector;

fn plot_rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
    vec![
        vector![x0, y0],
        vector![x1, y0],
        vector![x1, y1],
        vector![x0, y1],
    ]
}

fn resolver() -> HeuristicResolver {
    HeuristicResolver::new(ProximityCfg::default())
}

#[test]
fn sub_pipe_with_endpoint_inside_serves_plot() {
    let plot = plot_rect(0.0, 0.0, 200.0, 100.0);
    let sub = vec![vector![100.0, -80.0], vector![100.0, 50.0]];
    assert!(resolver().sub_pipe_serves_plot(&sub, &plot));
}

#[test]
fn sub_pipe_passing_through_serves_by_midpoint() {
    let plot = plot_rect(0.0, 0.0, 200.0, 100.0);
    // Both ends outside, the segment midpoint (100, 50) is inside.
    let sub = vec![vector![100.0, -100.0], vector![100.0, 200.0]];
    assert!(resolver().sub_pipe_serves_plot(&sub, &plot));
}

#[test]
fn sub_pipe_on_plot_edge_serves_by_proximity() {
    let plot = plot_rect(0.0, 0.0, 200.0, 100.0);
    let on_edge = vec![vector![-10.0, -15.0], vector![210.0, -15.0]];
    assert!(resolver().sub_pipe_serves_plot(&on_edge, &plot));
    let far = vec![vector![-10.0, -25.0], vector![210.0, -25.0]];
    assert!(!resolver().sub_pipe_serves_plot(&far, &plot));
}

#[test]
fn degenerate_plot_is_never_served() {
    let sub = vec![vector![0.0, 0.0], vector![10.0, 0.0]];
    let plot = vec![vector![0.0, 0.0], vector![10.0, 0.0]];
    assert!(!resolver().sub_pipe_serves_plot(&sub, &plot));
}

#[test]
fn sprinkler_outside_plot_counts_via_serving_sub_pipe() {
    let plot = plot_rect(0.0, 0.0, 200.0, 100.0);
    let sub = vec![vector![0.0, -5.0], vector![200.0, -5.0]];
    let subs: Vec<&[Point]> = vec![sub.as_slice()];
    let r = resolver();
    assert!(r.sprinkler_serves_plot(vector![50.0, 50.0], &plot, &[]));
    assert!(r.sprinkler_serves_plot(vector![50.0, -30.0], &plot, &subs));
    assert!(!r.sprinkler_serves_plot(vector![50.0, -40.0], &plot, &subs));
}

#[test]
fn attachment_tolerances() {
    let sub = vec![vector![0.0, 0.0], vector![100.0, 0.0]];
    let r = resolver();
    assert!(r.sprinkler_attached(vector![50.0, 11.0], &sub));
    assert!(!r.sprinkler_attached(vector![50.0, 13.0], &sub));
    // Drip-line crossing the sub-pipe with both ends far away.
    let crossing = vec![vector![40.0, -60.0], vector![40.0, 60.0]];
    assert!(r.drip_line_attached(&crossing, &sub));
    // Drip-line starting next to the sub-pipe.
    let tee = vec![vector![60.0, 8.0], vector![60.0, 90.0]];
    assert!(r.drip_line_attached(&tee, &sub));
    let apart = vec![vector![60.0, 30.0], vector![60.0, 90.0]];
    assert!(!r.drip_line_attached(&apart, &sub));
}

#[test]
fn connection_picks_global_minimum_and_station() {
    let main_a = vec![vector![0.0, 0.0], vector![100.0, 0.0], vector![100.0, 200.0]];
    let main_b = vec![vector![300.0, 0.0], vector![300.0, 200.0]];
    let mains: Vec<&[Point]> = vec![main_a.as_slice(), main_b.as_slice()];
    let sub = vec![vector![130.0, 150.0], vector![250.0, 150.0]];
    let c = resolver().connect_to_main(&sub, &mains).expect("connected");
    assert_eq!(c.main, 0);
    assert!((c.distance - 30.0).abs() < 1e-9);
    assert!((c.station - 250.0).abs() < 1e-9);
    assert!((c.station_m() - 10.0).abs() < 1e-9);

    let far_sub = vec![vector![200.0, 100.0], vector![220.0, 100.0]];
    assert!(resolver().connect_to_main(&far_sub, &mains).is_none());
    assert!(resolver().connect_to_main(&sub, &[]).is_none());
}

#[test]
fn drip_emitter_counts() {
    // 75px = 3m, spacing 1m -> 4 emitters.
    let line = IrrigationElement::new(
        "d",
        ElementKind::DripLine,
        vec![vector![0.0, 10.0], vector![75.0, 10.0]],
    )
    .with_spacing(1.0);
    assert_eq!(drip_emitters_on_line(&line), 4);

    let no_spacing = IrrigationElement::new("d0", ElementKind::DripLine, line.points.clone());
    assert_eq!(drip_emitters_on_line(&no_spacing), 0);
    let bad_spacing = no_spacing.clone().with_spacing(-1.0);
    assert_eq!(drip_emitters_on_line(&bad_spacing), 0);
}

#[test]
fn drip_emitters_only_count_segments_in_plot() {
    let plot = plot_rect(0.0, 0.0, 60.0, 60.0);
    // Segment 0 (2m) lies inside, segment 1 (4m) starts inside and counts
    // whole, segment 2 (4m) is entirely outside.
    let line = IrrigationElement::new(
        "d",
        ElementKind::DripLine,
        vec![
            vector![5.0, 10.0],
            vector![55.0, 10.0],
            vector![155.0, 10.0],
            vector![255.0, 10.0],
        ],
    )
    .with_spacing(0.5);
    assert!((drip_length_in_plot_m(&line, &plot) - 6.0).abs() < 1e-12);
    assert_eq!(drip_emitters_in_plot(&line, &plot), 13);

    let outside = plot_rect(500.0, 500.0, 600.0, 600.0);
    assert_eq!(drip_emitters_in_plot(&line, &outside), 0);
}

#[test]
fn view_drops_malformed_elements() {
    let snap = Snapshot {
        shapes: vec![Shape {
            id: "p".into(),
            kind: ShapeKind::Plot,
            name: "P".into(),
            points: plot_rect(0.0, 0.0, 10.0, 10.0),
            crop_type: None,
        }],
        irrigation_elements: vec![
            IrrigationElement::new("m", ElementKind::MainPipe, vec![vector![0.0, 0.0]]),
            IrrigationElement::new(
                "s",
                ElementKind::SubPipe,
                vec![vector![0.0, 0.0], vector![1.0, 0.0]],
            ),
            IrrigationElement::new("k", ElementKind::Sprinkler, vec![]),
            IrrigationElement::new("pump", ElementKind::Pump, vec![vector![0.0, 0.0]]),
            IrrigationElement::new("v", ElementKind::BallValve, vec![vector![0.0, 0.0]]),
        ],
    };
    let view = NetworkView::new(&snap);
    assert_eq!(view.plots.len(), 1);
    assert!(view.main_pipes.is_empty());
    assert_eq!(view.sub_pipes.len(), 1);
    assert!(view.sprinklers.is_empty());
    assert_eq!(view.pump_positions().len(), 1);
}
