//! Random greenhouse layouts (plot grid + pipe tree) with replay tokens.
//!
//! Purpose
//! - Realistic, reproducible inputs for benches and property tests. Every
//!   draw is a well-formed network: all sub-pipes reach the main line and all
//!   emitters sit on a sub-pipe.
//!
//! Model
//! - `rows × cols` plots with jittered corners inside a greenhouse outline.
//! - One main pipe along the top, a pump just before its start.
//! - One sub-pipe per plot column, starting a few px below the main pipe and
//!   running down through every row.
//! - Sprinklers scattered next to each sub-pipe; horizontal drip-lines
//!   crossing the sub-pipe inside each plot.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::vector;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::geom2::Point;
use crate::model::{ElementKind, IrrigationElement, Shape, ShapeKind, Snapshot};

const CROPS: [&str; 4] = ["tomato", "cucumber", "lettuce", "pepper"];

/// Grid dimension distribution.
#[derive(Clone, Copy, Debug)]
pub enum GridSize {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl GridSize {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            GridSize::Fixed(n) => n.max(1),
            GridSize::Uniform { min, max } => {
                let lo = min.max(1);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LayoutCfg {
    pub rows: GridSize,
    pub cols: GridSize,
    pub plot_width_px: f64,
    pub plot_height_px: f64,
    /// Walkway between neighbouring plots.
    pub gap_px: f64,
    /// Corner jitter (px). Clamped to an eighth of the smaller plot side.
    pub jitter_px: f64,
    pub sprinklers_per_plot: usize,
    pub drip_lines_per_plot: usize,
    /// Emitter spacing (m) on generated drip-lines.
    pub drip_spacing_m: f64,
}

impl Default for LayoutCfg {
    fn default() -> Self {
        Self {
            rows: GridSize::Uniform { min: 1, max: 3 },
            cols: GridSize::Uniform { min: 1, max: 4 },
            plot_width_px: 120.0,
            plot_height_px: 200.0,
            gap_px: 40.0,
            jitter_px: 6.0,
            sprinklers_per_plot: 3,
            drip_lines_per_plot: 2,
            drip_spacing_m: 0.3,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random greenhouse network.
pub fn draw_layout(cfg: LayoutCfg, tok: ReplayToken) -> Snapshot {
    let mut rng = tok.to_std_rng();
    let rows = cfg.rows.sample(&mut rng);
    let cols = cfg.cols.sample(&mut rng);
    let w = cfg.plot_width_px.max(40.0);
    let h = cfg.plot_height_px.max(40.0);
    let gap = cfg.gap_px.max(0.0);
    let jitter = cfg.jitter_px.clamp(0.0, w.min(h) / 8.0);
    let jit = |rng: &mut StdRng| (rng.gen::<f64>() * 2.0 - 1.0) * jitter;

    let margin = 60.0;
    let main_y = margin;
    let top = main_y + gap.max(20.0);
    let width = cols as f64 * (w + gap) + gap;
    let bottom = top + rows as f64 * (h + gap);

    let mut shapes = vec![Shape {
        id: "greenhouse".into(),
        kind: ShapeKind::Greenhouse,
        name: "Greenhouse".into(),
        points: vec![
            vector![margin - 40.0, margin - 40.0],
            vector![margin + width + 40.0, margin - 40.0],
            vector![margin + width + 40.0, bottom + 40.0],
            vector![margin - 40.0, bottom + 40.0],
        ],
        crop_type: None,
    }];
    let mut elements = vec![
        IrrigationElement::new(
            "main",
            ElementKind::MainPipe,
            vec![vector![margin, main_y], vector![margin + width, main_y]],
        ),
        IrrigationElement::new("pump", ElementKind::Pump, vec![vector![margin - 20.0, main_y]]),
    ];

    for c in 0..cols {
        let x0 = margin + gap + c as f64 * (w + gap);
        let sub_x = x0 + w / 2.0 + jit(&mut rng);
        let sub_id = format!("sub-{c}");
        elements.push(IrrigationElement::new(
            sub_id.as_str(),
            ElementKind::SubPipe,
            vec![vector![sub_x, main_y + 5.0], vector![sub_x, bottom - gap]],
        ));

        for r in 0..rows {
            let y0 = top + r as f64 * (h + gap);
            let corners: Vec<Point> = [(x0, y0), (x0 + w, y0), (x0 + w, y0 + h), (x0, y0 + h)]
                .into_iter()
                .map(|(x, y)| vector![x + jit(&mut rng), y + jit(&mut rng)])
                .collect();
            let id = format!("plot-{r}-{c}");
            shapes.push(Shape {
                name: format!("Plot {}{}", (b'A' + (r % 26) as u8) as char, c + 1),
                id: id.clone(),
                kind: ShapeKind::Plot,
                points: corners,
                crop_type: CROPS.choose(&mut rng).map(|s| s.to_string()),
            });

            let inner = (y0 + 2.0 * jitter + 5.0)..(y0 + h - 2.0 * jitter - 5.0);
            for k in 0..cfg.sprinklers_per_plot {
                let y = rng.gen_range(inner.clone());
                let dx = rng.gen_range(-8.0f64..8.0);
                elements.push(IrrigationElement::new(
                    format!("{id}-s{k}"),
                    ElementKind::Sprinkler,
                    vec![vector![sub_x + dx, y]],
                ));
            }
            for k in 0..cfg.drip_lines_per_plot {
                let y = rng.gen_range(inner.clone());
                let half = rng.gen_range(0.25f64..0.45) * w;
                elements.push(
                    IrrigationElement::new(
                        format!("{id}-d{k}"),
                        ElementKind::DripLine,
                        vec![vector![sub_x - half, y], vector![sub_x + half, y]],
                    )
                    .with_spacing(cfg.drip_spacing_m),
                );
            }
        }
    }

    Snapshot {
        shapes,
        irrigation_elements: elements,
    }
}

/// Deterministic batch of `n` layouts from one seed.
pub fn draw_layouts(cfg: LayoutCfg, seed: u64, n: usize) -> Vec<Snapshot> {
    (0..n as u64)
        .map(|index| draw_layout(cfg, ReplayToken { seed, index }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::association::NetworkView;
    use crate::cfg::{EngineCfg, ProximityCfg};
    use crate::fittings::fitting_report;
    use crate::report::analyze;
    use proptest::prelude::*;

    #[test]
    fn reproducible_draw() {
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = draw_layout(LayoutCfg::default(), tok);
        let b = draw_layout(LayoutCfg::default(), tok);
        assert_eq!(a, b);
        let c = draw_layout(LayoutCfg::default(), ReplayToken { seed: 42, index: 8 });
        assert_ne!(a, c);
    }

    #[test]
    fn fixed_grid_has_expected_counts() {
        let cfg = LayoutCfg {
            rows: GridSize::Fixed(2),
            cols: GridSize::Fixed(3),
            ..LayoutCfg::default()
        };
        let snap = draw_layout(cfg, ReplayToken { seed: 1, index: 0 });
        assert_eq!(snap.plots().count(), 6);
        assert_eq!(snap.elements_of(ElementKind::SubPipe).count(), 3);
        assert_eq!(snap.elements_of(ElementKind::Sprinkler).count(), 18);
        assert_eq!(snap.elements_of(ElementKind::DripLine).count(), 12);
        assert_eq!(snap.elements_of(ElementKind::Pump).count(), 1);
    }

    proptest! {
        #[test]
        fn every_sub_pipe_reaches_the_main(seed in any::<u64>(), index in 0u64..64) {
            let snap = draw_layout(LayoutCfg::default(), ReplayToken { seed, index });
            let report = analyze(&snap, &EngineCfg::default());
            let subs = snap.elements_of(ElementKind::SubPipe).count();
            prop_assert_eq!(report.summary.sub_pipe_count, subs);
            prop_assert_eq!(report.summary.connections.main_to_sub, subs);
            prop_assert_eq!(report.plots.len(), report.totals.plot_count);
        }

        #[test]
        fn analysis_is_idempotent(seed in any::<u64>(), index in 0u64..64) {
            let snap = draw_layout(LayoutCfg::default(), ReplayToken { seed, index });
            let cfg = EngineCfg::default();
            prop_assert_eq!(analyze(&snap, &cfg), analyze(&snap, &cfg));
        }

        #[test]
        fn submain_totals_match_clusters(seed in any::<u64>(), index in 0u64..64) {
            let snap = draw_layout(LayoutCfg::default(), ReplayToken { seed, index });
            let report = fitting_report(&NetworkView::new(&snap), &ProximityCfg::default());
            for s in &report.submains {
                prop_assert_eq!(s.counts.total(), s.clusters.len());
            }
            prop_assert_eq!(
                report.counts.two_way + report.counts.three_way + report.counts.four_way,
                report.counts.main.total() + report.counts.submain.total()
            );
        }
    }
}
