use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ingest::{Data, Signal};

/// User-controlled visibility over `(sensor, dimension)` pairs.
///
/// Missing entries read as hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplaySignals {
    sensors: IndexMap<String, IndexMap<usize, bool>>,
}

impl DisplaySignals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection with every signal of `data` visible.
    #[must_use]
    pub fn all(data: &Data) -> Self {
        let mut display = Self::new();
        for signal in data.signals() {
            display.set(signal.sensor(), signal.dim(), true);
        }
        display
    }

    /// Every signal of the first `max_sensors` sensors of `data` visible.
    #[must_use]
    pub fn leading(data: &Data, max_sensors: usize) -> Self {
        let mut display = Self::new();
        for sensor in data.sensors().take(max_sensors) {
            for signal in sensor.signals() {
                display.set(signal.sensor(), signal.dim(), true);
            }
        }
        display
    }

    #[must_use]
    pub fn with(mut self, sensor: &str, dim: usize, visible: bool) -> Self {
        self.set(sensor, dim, visible);
        self
    }

    pub fn set(&mut self, sensor: &str, dim: usize, visible: bool) {
        self.sensors
            .entry(sensor.to_owned())
            .or_default()
            .insert(dim, visible);
    }

    pub fn toggle(&mut self, sensor: &str, dim: usize) -> bool {
        let visible = !self.is_visible(sensor, dim);
        self.set(sensor, dim, visible);
        visible
    }

    /// Drops every entry of `sensor`, hiding all its dimensions.
    pub fn clear_sensor(&mut self, sensor: &str) {
        self.sensors.shift_remove(sensor);
    }

    #[must_use]
    pub fn is_visible(&self, sensor: &str, dim: usize) -> bool {
        self.sensors
            .get(sensor)
            .and_then(|dims| dims.get(&dim))
            .copied()
            .unwrap_or(false)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.sensors.values().flat_map(IndexMap::values).any(|visible| *visible)
    }
}

/// Signals selected for rendering, in data order (sensor insertion order,
/// then dimension order).
#[must_use]
pub fn project_display_signals<'a>(data: &'a Data, display: &DisplaySignals) -> Vec<&'a Signal> {
    let projected: Vec<&Signal> = data
        .signals()
        .filter(|signal| display.is_visible(signal.sensor(), signal.dim()))
        .collect();
    debug!(
        available = data.signals().count(),
        displayed = projected.len(),
        "projected display signals"
    );
    projected
}
