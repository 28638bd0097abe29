//! Snapshot builders shared by unit tests.

use nalgebra::vector;

use crate::geom2::Point;
use crate::model::{ElementKind, IrrigationElement, Shape, ShapeKind, Snapshot};

pub(crate) fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
    vec![
        vector![x0, y0],
        vector![x1, y0],
        vector![x1, y1],
        vector![x0, y1],
    ]
}

pub(crate) fn plot(id: &str, points: Vec<Point>) -> Shape {
    Shape {
        id: id.to_string(),
        kind: ShapeKind::Plot,
        name: format!("Plot {id}"),
        points,
        crop_type: None,
    }
}

pub(crate) fn path(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| vector![x, y]).collect()
}

pub(crate) fn main_pipe(id: &str, coords: &[(f64, f64)]) -> IrrigationElement {
    IrrigationElement::new(id, ElementKind::MainPipe, path(coords))
}

pub(crate) fn sub_pipe(id: &str, coords: &[(f64, f64)]) -> IrrigationElement {
    IrrigationElement::new(id, ElementKind::SubPipe, path(coords))
}

pub(crate) fn drip_line(id: &str, coords: &[(f64, f64)], spacing: f64) -> IrrigationElement {
    IrrigationElement::new(id, ElementKind::DripLine, path(coords)).with_spacing(spacing)
}

pub(crate) fn device(id: &str, kind: ElementKind, x: f64, y: f64) -> IrrigationElement {
    IrrigationElement::new(id, kind, vec![vector![x, y]])
}

pub(crate) fn sprinkler(id: &str, x: f64, y: f64) -> IrrigationElement {
    device(id, ElementKind::Sprinkler, x, y)
}

/// One main along y=0 feeding two vertical sub-pipes (x=100 and x=300), each
/// carrying three sprinklers and running into its own plot.
pub(crate) fn two_bed_network() -> Snapshot {
    let mut elements = vec![
        main_pipe("main", &[(0.0, 0.0), (400.0, 0.0)]),
        sub_pipe("sub-a", &[(100.0, 5.0), (100.0, 200.0)]),
        sub_pipe("sub-b", &[(300.0, 5.0), (300.0, 200.0)]),
    ];
    for (k, y) in [50.0, 100.0, 150.0].into_iter().enumerate() {
        elements.push(sprinkler(&format!("a{k}"), 105.0, y));
        elements.push(sprinkler(&format!("b{k}"), 305.0, y));
    }
    Snapshot {
        shapes: vec![
            plot("bed-b", rect(250.0, 20.0, 350.0, 220.0)),
            plot("bed-a", rect(50.0, 20.0, 150.0, 220.0)),
        ],
        irrigation_elements: elements,
    }
}
