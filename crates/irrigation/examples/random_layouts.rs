//! Print flow and fitting figures for a few random greenhouse layouts.
//!
//! Usage:
//!   cargo run -p irrigation --example random_layouts -- [seed]
//!
//! One line per layout: plot grid, emitters, total flow, longest runs and
//! 2-/3-/4-way fitting counts.

use irrigation::cfg::EngineCfg;
use irrigation::layout::{draw_layouts, LayoutCfg};
use irrigation::report::analyze;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2024);
    let cfg = EngineCfg::default();
    for (i, snap) in draw_layouts(LayoutCfg::default(), seed, 5).iter().enumerate() {
        let r = analyze(snap, &cfg);
        println!(
            "layout {i}: plots={} emitters={} flow={:.1} L/min \
             longest main={:.1} m sub={:.1} m fittings={}/{}/{}",
            r.totals.plot_count,
            r.summary.total_emitters,
            r.summary.total_flow_rate,
            r.summary.longest.main.length,
            r.summary.longest.sub.length,
            r.fittings.two_way,
            r.fittings.three_way,
            r.fittings.four_way,
        );
    }
}
