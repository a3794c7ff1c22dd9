use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Extents, LinePath, LinearScale, PlotArea, Viewport, project_line_path};
use crate::error::{ChartError, ChartResult};
use crate::ingest::{Data, Signal};
use crate::interaction::{ZoomBehavior, ZoomTransform};

use super::axis::{AxisPlacement, AxisSide, axis_orientation_for_index, axis_side_for_index};
use super::config::{ChartConfig, ExtentsPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Scales built, initial transform applied, no user event yet.
    Configured,
    /// At least one zoom/pan event has been applied.
    Interactive,
}

/// Scales for one rendering session of a displayed-signal set.
///
/// The horizontal scale is shared by every signal; each distinct sensor
/// owns an independent vertical scale. Zoom only ever touches the
/// horizontal working scale, and always re-derives it from the untouched
/// initial scale `x0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleSession {
    plot: PlotArea,
    x0: LinearScale,
    x: LinearScale,
    y_scales: IndexMap<String, LinearScale>,
    axes: Vec<AxisPlacement>,
    zoom: ZoomBehavior,
    state: SessionState,
}

impl ScaleSession {
    /// Builds scales for `signals` (already projected from `data`, in
    /// display order) and applies the configured initial zoom.
    ///
    /// Domains come from whole-sensor extents, so every dimension of a
    /// displayed sensor fits its vertical scale.
    pub fn setup(
        viewport: Viewport,
        config: &ChartConfig,
        data: &Data,
        signals: &[&Signal],
    ) -> ChartResult<Self> {
        if signals.is_empty() {
            return Err(ChartError::NoDisplayedSignals);
        }
        let plot = PlotArea::from_viewport(viewport, config.margins)?;

        let sensors = distinct_sensors(signals);
        if sensors.len() > config.max_axes {
            return Err(ChartError::TooManySensors {
                count: sensors.len(),
                max: config.max_axes,
            });
        }
        debug!(sensors = ?sensors, "displayed sensors");

        let x_domain = horizontal_domain(data, &sensors, config.extents_policy);
        debug!(start = x_domain.0, end = x_domain.1, "x-scale domain");
        let x0 = LinearScale::new(x_domain, (0.0, plot.width))?;

        let mut y_scales = IndexMap::with_capacity(sensors.len());
        let mut axes = Vec::with_capacity(sensors.len());
        for (index, sensor) in sensors.iter().enumerate() {
            let y_domain = vertical_domain(data, sensor);
            debug!(sensor = %sensor, min = y_domain.0, max = y_domain.1, "y-scale domain");
            y_scales.insert(
                (*sensor).to_owned(),
                LinearScale::new(y_domain, (plot.height, 0.0))?,
            );

            let side = axis_side_for_index(index).ok_or(ChartError::TooManySensors {
                count: sensors.len(),
                max: config.max_axes,
            })?;
            axes.push(AxisPlacement {
                sensor: (*sensor).to_owned(),
                index,
                side,
                orientation: axis_orientation_for_index(index),
            });
        }

        let mut zoom = ZoomBehavior::new(plot.width, plot.height, config.scale_extent)?
            .with_wheel_step(config.wheel_zoom_step)?;
        zoom.scale_to(config.initial_zoom_scale)?;
        zoom.translate_by(config.initial_pan_px.unwrap_or(plot.width), 0.0)?;
        let x = zoom.transform().rescale_x(x0)?;

        Ok(Self {
            plot,
            x0,
            x,
            y_scales,
            axes,
            zoom,
            state: SessionState::Configured,
        })
    }

    #[must_use]
    pub fn plot(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Working horizontal scale (after the current transform).
    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.x
    }

    /// Horizontal scale as built at setup, before any transform.
    #[must_use]
    pub fn initial_x_scale(&self) -> LinearScale {
        self.x0
    }

    #[must_use]
    pub fn y_scale(&self, sensor: &str) -> Option<LinearScale> {
        self.y_scales.get(sensor).copied()
    }

    /// Vertical scales keyed by sensor, in first-displayed order.
    #[must_use]
    pub fn y_scales(&self) -> &IndexMap<String, LinearScale> {
        &self.y_scales
    }

    #[must_use]
    pub fn axes(&self) -> &[AxisPlacement] {
        &self.axes
    }

    #[must_use]
    pub fn axis_side(&self, sensor: &str) -> Option<AxisSide> {
        self.axes
            .iter()
            .find(|axis| axis.sensor == sensor)
            .map(|axis| axis.side)
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.zoom.transform()
    }

    /// Applies a host-supplied transform (clamped and constrained first).
    pub fn apply_zoom(&mut self, transform: ZoomTransform) -> ChartResult<ZoomTransform> {
        let applied = self.zoom.set_transform(transform)?;
        self.refresh_x()?;
        Ok(applied)
    }

    /// Wheel zoom anchored at a plot-space point.
    pub fn wheel(&mut self, delta_y: f64, point: [f64; 2]) -> ChartResult<ZoomTransform> {
        let applied = self.zoom.wheel(delta_y, point)?;
        self.refresh_x()?;
        Ok(applied)
    }

    /// Drag pan by a pixel delta.
    pub fn drag(&mut self, dx_px: f64, dy_px: f64) -> ChartResult<ZoomTransform> {
        let applied = self.zoom.drag(dx_px, dy_px)?;
        self.refresh_x()?;
        Ok(applied)
    }

    /// Line geometry for `signal` in plot-area coordinates, or `None` when
    /// its sensor is not part of this session.
    #[must_use]
    pub fn line_path(&self, signal: &Signal) -> Option<LinePath> {
        let y = self.y_scale(signal.sensor())?;
        Some(project_line_path(signal.plot_samples(), self.x, y))
    }

    /// Maps one `(tick, value)` pair of `sensor` into plot coordinates.
    #[must_use]
    pub fn map_point(&self, sensor: &str, tick: f64, value: f64) -> Option<(f64, f64)> {
        let y = self.y_scale(sensor)?;
        Some((self.x.map(tick), y.map(value)))
    }

    fn refresh_x(&mut self) -> ChartResult<()> {
        self.x = self.zoom.transform().rescale_x(self.x0)?;
        self.state = SessionState::Interactive;
        let (start, end) = self.x.domain();
        trace!(start, end, "rescaled x domain");
        Ok(())
    }
}

fn distinct_sensors<'a>(signals: &[&'a Signal]) -> Vec<&'a str> {
    let mut sensors: Vec<&str> = Vec::new();
    for signal in signals {
        if !sensors.contains(&signal.sensor()) {
            sensors.push(signal.sensor());
        }
    }
    sensors
}

fn sensor_extents(data: &Data, sensor: &str) -> Option<Extents> {
    data.get(sensor).and_then(|sensor| sensor.extents())
}

// With `FirstSignal`, later sensors never widen the domain even if their
// ticks fall outside it.
fn horizontal_domain(data: &Data, sensors: &[&str], policy: ExtentsPolicy) -> (f64, f64) {
    let mut extents = sensors
        .iter()
        .filter_map(|sensor| sensor_extents(data, sensor));
    let picked = match policy {
        ExtentsPolicy::FirstSignal => extents.next(),
        ExtentsPolicy::Union => extents.reduce(Extents::union),
    };
    picked.map_or((0.0, 0.0), Extents::x_domain)
}

fn vertical_domain(data: &Data, sensor: &str) -> (f64, f64) {
    sensor_extents(data, sensor).map_or((0.0, 0.0), Extents::y_domain)
}
