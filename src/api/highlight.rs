use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::ingest::{Reading, Signal};

/// Tooltip offset from the pointer, in pixels.
const TOOLTIP_OFFSET_X: f64 = -6.0;
const TOOLTIP_OFFSET_Y: f64 = -15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emphasis {
    Normal,
    Hovered,
    Faded,
}

impl Emphasis {
    /// Extra style class for a line (`line--hover`/`line--fade`) or an axis
    /// (`axis--hover`/`axis--fade`).
    #[must_use]
    pub fn class_suffix(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Hovered => Some("hover"),
            Self::Faded => Some("fade"),
        }
    }
}

/// Hover state: at most one signal is highlighted at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightState {
    hovered: Option<HoveredSignal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct HoveredSignal {
    name: String,
    sensor: String,
}

impl HighlightState {
    pub fn hover(&mut self, signal: &Signal) {
        self.hovered = Some(HoveredSignal {
            name: signal.name().to_owned(),
            sensor: signal.sensor().to_owned(),
        });
    }

    pub fn clear(&mut self) {
        self.hovered = None;
    }

    #[must_use]
    pub fn hovered_signal(&self) -> Option<&str> {
        self.hovered.as_ref().map(|hovered| hovered.name.as_str())
    }

    #[must_use]
    pub fn line_emphasis(&self, signal_name: &str) -> Emphasis {
        match &self.hovered {
            None => Emphasis::Normal,
            Some(hovered) if hovered.name == signal_name => Emphasis::Hovered,
            Some(_) => Emphasis::Faded,
        }
    }

    #[must_use]
    pub fn axis_emphasis(&self, sensor: &str) -> Emphasis {
        match &self.hovered {
            None => Emphasis::Normal,
            Some(hovered) if hovered.sensor == sensor => Emphasis::Hovered,
            Some(_) => Emphasis::Faded,
        }
    }
}

/// Tooltip shown while a signal is hovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub nearest: Option<Reading>,
}

impl Tooltip {
    /// Tooltip for `signal` at pointer `(x, y)`; `tick` is the pointer's
    /// horizontal position in data space, used to find the nearest reading.
    #[must_use]
    pub fn for_signal(signal: &Signal, pointer: (f64, f64), tick: f64) -> Self {
        Self {
            text: signal.name().to_owned(),
            x: pointer.0 + TOOLTIP_OFFSET_X,
            y: pointer.1 + TOOLTIP_OFFSET_Y,
            nearest: nearest_reading(signal, tick).cloned(),
        }
    }
}

#[must_use]
pub fn nearest_reading(signal: &Signal, tick: f64) -> Option<&Reading> {
    if !tick.is_finite() {
        return None;
    }
    signal
        .readings()
        .iter()
        .filter(|reading| reading.tick.is_finite())
        .min_by_key(|reading| OrderedFloat((reading.tick - tick).abs()))
}
