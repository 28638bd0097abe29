//! Greenhouse irrigation network analysis.
//!
//! Reads a drawn canvas (plots, pipes, emitters, devices), infers how the
//! pieces connect from geometry alone, and reports flows, critical runs,
//! fitting counts and totals.
//!
//! Pipeline: `model::Snapshot` → `geom2` → `association` → `flow` and
//! `fittings` → `report::analyze`.
//!
//! API Policy
//! - Engine functions are pure: they borrow a snapshot and return fresh values.
//! - Malformed geometry degrades to zeros instead of errors; only the CLI
//!   deals in `Result`.

pub mod api;
pub mod association;
pub mod cfg;
pub mod fittings;
pub mod flow;
pub mod geom2;
pub mod layout;
pub mod model;
pub mod report;

#[cfg(test)]
mod testkit;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::EngineCfg;
pub use model::Snapshot;
pub use report::{analyze, NetworkReport};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::{EngineCfg, FlowCfg, ProximityCfg};
    pub use crate::fittings::{count_fittings, NetworkFittingCounts};
    pub use crate::flow::{analyze_flows, PipeFlowSummary, PlotPipeProfile};
    pub use crate::geom2::{px_to_m, Point, PX_PER_METER};
    pub use crate::layout::{draw_layout, LayoutCfg, ReplayToken};
    pub use crate::model::{ElementKind, IrrigationElement, Shape, ShapeKind, Snapshot};
    pub use crate::report::{
        analyze, water_inputs, NetworkReport, WaterIntensity, WaterRequirement,
        WaterRequirementEngine,
    };
}
