//! sensor-chart: multi-sensor CSV log ingestion and zoomable chart model.
//!
//! Raw log text is folded into an ordered `Data` set of sensors and signals.
//! A `SensorChart` projects the selected signals onto a shared time axis
//! with one value axis per sensor and turns zoom/pan gestures into
//! deterministic `RenderFrame`s for any `Renderer` backend.

pub mod api;
pub mod core;
pub mod error;
pub mod ingest;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, DisplaySignals, LoadOutcome, SensorChart};
pub use error::{ChartError, ChartResult};
pub use ingest::{Data, parse_csv_text};
