//! Pointer-driven pan/zoom state.

pub mod zoom;

pub use zoom::{DEFAULT_WHEEL_STEP, ZoomBehavior, ZoomTransform};
