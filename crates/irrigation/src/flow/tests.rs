use super::*;
use crate::cfg::EngineCfg;
use crate::model::Snapshot;
use crate::testkit::*;

fn run(snapshot: &Snapshot) -> (Vec<PlotPipeProfile>, PipeFlowSummary) {
    analyze_flows(snapshot, &EngineCfg::default())
}

#[test]
fn three_sprinklers_on_one_sub_pipe() {
    let snap = Snapshot {
        shapes: vec![],
        irrigation_elements: vec![
            sub_pipe("s", &[(0.0, 0.0), (200.0, 0.0)]),
            sprinkler("k0", 20.0, 4.0),
            sprinkler("k1", 100.0, -6.0),
            sprinkler("k2", 180.0, 0.0),
        ],
    };
    let (_, summary) = run(&snap);
    assert_eq!(summary.sub_pipe_flow_rate, 30.0);
    assert_eq!(summary.connections.sub_to_emitters, 3);
    assert_eq!(summary.connections.main_to_sub, 0);
}

#[test]
fn main_pipe_sums_connected_sub_pipes() {
    let (_, s) = run(&two_bed_network());
    assert_eq!(s.main_pipe_count, 1);
    assert_eq!(s.sub_pipe_count, 2);
    assert_eq!(s.total_emitters, 6);
    assert_eq!(s.total_flow_rate, 60.0);
    assert_eq!(s.sub_pipe_flow_rate, 30.0);
    assert_eq!(s.main_pipe_flow_rate, 60.0);
    assert_eq!(s.connections.main_to_sub, 2);
    assert_eq!(s.connections.sub_to_emitters, 6);
}

#[test]
fn longest_runs_of_two_bed_network() {
    let (_, s) = run(&two_bed_network());
    assert!((s.longest.main.length - 16.0).abs() < 1e-12);
    assert_eq!(s.longest.main.connections, 2);
    assert!((s.longest.main.flow_rate - 60.0).abs() < 1e-12);
    // Equal length and emitters: the first sub-pipe in input order stays.
    assert!((s.longest.sub.length - 7.8).abs() < 1e-12);
    assert_eq!(s.longest.sub.emitters, 3);
    assert_eq!(s.longest.sub.flow_rate, 30.0);
}

#[test]
fn plot_profiles_in_reading_order() {
    let (profiles, _) = run(&two_bed_network());
    let ids: Vec<&str> = profiles.iter().map(|p| p.plot_id.as_str()).collect();
    assert_eq!(ids, ["bed-a", "bed-b"]);

    let a = &profiles[0];
    assert!((a.area_m2 - 32.0).abs() < 1e-12);
    assert_eq!(a.sub_pipe_count, 1);
    assert!((a.max_sub_pipe_length - 7.8).abs() < 1e-12);
    assert!((a.total_sub_pipe_length - 7.8).abs() < 1e-12);
    assert!((a.max_main_pipe_length - 4.0).abs() < 1e-12);
    assert!((a.total_main_pipe_length - 4.0).abs() < 1e-12);
    assert_eq!(a.sprinkler_count, 3);
    assert_eq!(a.drip_emitter_count, 0);
    assert_eq!(a.flow_rate, 30.0);

    let b = &profiles[1];
    assert!((b.max_main_pipe_length - 12.0).abs() < 1e-12);
    assert_eq!(b.sprinkler_count, 3);
}

#[test]
fn longest_sub_prefers_most_emitters_among_near_ties() {
    let snap = Snapshot {
        shapes: vec![],
        irrigation_elements: vec![
            sub_pipe("x", &[(0.0, 0.0), (200.0, 0.0)]),
            sub_pipe("y", &[(0.0, 100.0), (190.0, 100.0)]),
            sub_pipe("z", &[(0.0, 200.0), (100.0, 200.0)]),
            sprinkler("x0", 50.0, 0.0),
            sprinkler("y0", 20.0, 100.0),
            sprinkler("y1", 60.0, 100.0),
            sprinkler("y2", 120.0, 100.0),
            sprinkler("z0", 10.0, 200.0),
            sprinkler("z1", 30.0, 200.0),
            sprinkler("z2", 50.0, 200.0),
            sprinkler("z3", 70.0, 200.0),
            sprinkler("z4", 90.0, 200.0),
        ],
    };
    let (_, s) = run(&snap);
    assert_eq!(s.longest.sub.emitters, 3);
    assert!((s.longest.sub.length - 7.6).abs() < 1e-12);
    assert_eq!(s.longest.sub.flow_rate, 30.0);
    assert_eq!(s.sub_pipe_flow_rate, 50.0);
}

#[test]
fn drip_line_feeds_crossed_sub_pipe_and_plot() {
    let mut snap = two_bed_network();
    // 75px = 3m at 1m spacing: 4 emitters, crossing sub-a inside bed-a.
    snap.irrigation_elements
        .push(drip_line("d", &[(60.0, 120.0), (135.0, 120.0)], 1.0));
    let (profiles, s) = run(&snap);
    assert_eq!(s.total_emitters, 10);
    assert!((s.total_flow_rate - 60.96).abs() < 1e-9);
    assert!((s.sub_pipe_flow_rate - 30.96).abs() < 1e-9);
    assert_eq!(profiles[0].drip_emitter_count, 4);
    assert!((profiles[0].flow_rate - 30.96).abs() < 1e-9);
    assert_eq!(profiles[1].drip_emitter_count, 0);
}

#[test]
fn without_sub_pipes_main_carries_everything() {
    let snap = Snapshot {
        shapes: vec![],
        irrigation_elements: vec![
            main_pipe("m", &[(0.0, 0.0), (100.0, 0.0)]),
            sprinkler("k0", 10.0, 50.0),
            sprinkler("k1", 90.0, 50.0),
        ],
    };
    let (_, s) = run(&snap);
    assert_eq!(s.main_pipe_flow_rate, 20.0);
    assert_eq!(s.longest.main.flow_rate, 20.0);
    assert_eq!(s.longest.main.connections, 0);
    assert_eq!(s.longest.sub.length, 0.0);
    assert_eq!(s.longest.sub.flow_rate, 20.0);
}

#[test]
fn empty_snapshot_gives_zeroed_summary() {
    let (profiles, s) = run(&Snapshot::default());
    assert!(profiles.is_empty());
    assert_eq!(s, PipeFlowSummary::default());
}

#[test]
fn plot_rows_cut_on_vertical_gap() {
    let p1 = plot("p1", rect(250.0, 50.0, 350.0, 150.0)); // centroid (300, 100)
    let p2 = plot("p2", rect(50.0, 80.0, 150.0, 180.0)); // centroid (100, 130)
    let p3 = plot("p3", rect(0.0, 250.0, 100.0, 350.0)); // centroid (50, 300)
    let shapes = [&p1, &p3, &p2];
    let ordered = order_plots(&shapes, 50.0);
    let ids: Vec<&str> = ordered.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["p2", "p1", "p3"]);
}

#[test]
fn degenerate_plot_still_gets_a_zero_profile() {
    let mut snap = two_bed_network();
    snap.shapes.push(plot("sliver", path(&[(500.0, 500.0), (600.0, 500.0)])));
    let (profiles, _) = run(&snap);
    let sliver = profiles
        .iter()
        .find(|p| p.plot_id == "sliver")
        .expect("profile present");
    assert_eq!(sliver.area_m2, 0.0);
    assert_eq!(sliver.sub_pipe_count, 0);
    assert_eq!(sliver.sprinkler_count, 0);
}
