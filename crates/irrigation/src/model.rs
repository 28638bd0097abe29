//! Input snapshot: shapes and irrigation elements as drawn on the canvas.
//!
//! These are plain value types. Nothing in the engine mutates them; every
//! analysis borrows a `Snapshot` and returns fresh outputs.
//!
//! JSON layout follows the canvas format: points as `{ "x": .., "y": .. }`,
//! kinds in kebab-case under `type`, optional fields in camelCase.

use serde::{Deserialize, Serialize};

use crate::geom2::Point;

/// Kind of a drawn shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Greenhouse,
    Plot,
    Walkway,
    WaterSource,
    Measurement,
}

/// A polygon (or point/segment for water sources and measurements).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    #[serde(default)]
    pub name: String,
    #[serde(with = "xy_points")]
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,
}

impl Shape {
    #[inline]
    pub fn is_plot(&self) -> bool {
        self.kind == ShapeKind::Plot
    }
}

/// Kind of an irrigation element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    MainPipe,
    SubPipe,
    Sprinkler,
    DripLine,
    Pump,
    SolenoidValve,
    BallValve,
    WaterTank,
    FertilizerMachine,
}

impl ElementKind {
    /// Pipes are polylines; everything else is a single-point device.
    #[inline]
    pub fn is_pipe(self) -> bool {
        matches!(
            self,
            ElementKind::MainPipe | ElementKind::SubPipe | ElementKind::DripLine
        )
    }
}

/// A pipe (polyline) or a point device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(with = "xy_points")]
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Drip emitter spacing in meters (drip-lines only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_liters: Option<f64>,
}

impl IrrigationElement {
    /// Element with only the required fields set.
    pub fn new(id: impl Into<String>, kind: ElementKind, points: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            kind,
            points,
            width: None,
            radius: None,
            spacing: None,
            capacity_liters: None,
        }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_capacity(mut self, liters: f64) -> Self {
        self.capacity_liters = Some(liters);
        self
    }

    /// Location of a point device (its first point).
    #[inline]
    pub fn position(&self) -> Option<Point> {
        self.points.first().copied()
    }
}

/// Everything the engine looks at in one call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub irrigation_elements: Vec<IrrigationElement>,
}

impl Snapshot {
    pub fn plots(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.is_plot())
    }

    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = &IrrigationElement> {
        self.irrigation_elements
            .iter()
            .filter(move |e| e.kind == kind)
    }
}

/// Serde adapter for `Vec<Point>` as a list of `{x, y}` objects.
pub(crate) mod xy_points {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::geom2::Point;

    #[derive(Serialize, Deserialize)]
    struct Xy {
        x: f64,
        y: f64,
    }

    pub fn serialize<S: Serializer>(points: &[Point], s: S) -> Result<S::Ok, S::Error> {
        let xy: Vec<Xy> = points.iter().map(|p| Xy { x: p.x, y: p.y }).collect();
        xy.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Point>, D::Error> {
        let xy = Vec::<Xy>::deserialize(d)?;
        Ok(xy.into_iter().map(|p| Point::new(p.x, p.y)).collect())
    }
}
