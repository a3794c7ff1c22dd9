//! Host-facing chart API: configuration, display selection, scale sessions
//! and the `SensorChart` facade.

mod axis;
mod config;
mod engine;
mod frame_builder;
mod highlight;
mod load_guard;
mod projection;
mod scale_session;

pub use axis::{
    AXIS_TICK_COUNT, AxisPlacement, AxisSide, AxisTick, axis_orientation_for_index,
    axis_side_for_index, format_grouped_fixed, format_si, horizontal_ticks, vertical_ticks,
};
pub use config::{ChartConfig, ExtentsPolicy};
pub use engine::{LoadOutcome, SensorChart};
pub use frame_builder::FrameStyle;
pub use highlight::{Emphasis, HighlightState, Tooltip, nearest_reading};
pub use load_guard::{LoadGuard, LoadTicket};
pub use projection::{DisplaySignals, project_display_signals};
pub use scale_session::{ScaleSession, SessionState};
