//! Typed view over a snapshot, split by element kind.

use crate::geom2::Point;
use crate::model::{ElementKind, IrrigationElement, Shape, Snapshot};

/// Borrowed, kind-sorted view of a `Snapshot`.
///
/// Pipes with fewer than two points and devices without a point are dropped
/// here, so downstream code can index segments and positions freely.
#[derive(Clone, Debug, Default)]
pub struct NetworkView<'a> {
    pub plots: Vec<&'a Shape>,
    pub main_pipes: Vec<&'a IrrigationElement>,
    pub sub_pipes: Vec<&'a IrrigationElement>,
    pub drip_lines: Vec<&'a IrrigationElement>,
    pub sprinklers: Vec<&'a IrrigationElement>,
    pub pumps: Vec<&'a IrrigationElement>,
}

impl<'a> NetworkView<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        let mut view = NetworkView {
            plots: snapshot.plots().collect(),
            ..Default::default()
        };
        for e in &snapshot.irrigation_elements {
            let list = match e.kind {
                ElementKind::MainPipe => &mut view.main_pipes,
                ElementKind::SubPipe => &mut view.sub_pipes,
                ElementKind::DripLine => &mut view.drip_lines,
                ElementKind::Sprinkler => &mut view.sprinklers,
                ElementKind::Pump => &mut view.pumps,
                _ => continue,
            };
            let usable = if e.kind.is_pipe() {
                e.points.len() >= 2
            } else {
                !e.points.is_empty()
            };
            if usable {
                list.push(e);
            }
        }
        view
    }

    pub fn main_paths(&self) -> Vec<&'a [Point]> {
        self.main_pipes.iter().map(|e| e.points.as_slice()).collect()
    }

    pub fn sprinkler_positions(&self) -> Vec<Point> {
        self.sprinklers.iter().filter_map(|e| e.position()).collect()
    }

    pub fn pump_positions(&self) -> Vec<Point> {
        self.pumps.iter().filter_map(|e| e.position()).collect()
    }
}
