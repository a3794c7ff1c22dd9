use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::ingest::{Data, FileSource, Signal, accept_file, ingest_file};
use crate::interaction::ZoomTransform;
use crate::render::{RenderFrame, Renderer};

use super::config::ChartConfig;
use super::frame_builder::{FrameBuilder, FrameStyle};
use super::highlight::{HighlightState, Tooltip};
use super::load_guard::{LoadGuard, LoadTicket};
use super::projection::{DisplaySignals, project_display_signals};
use super::scale_session::ScaleSession;

/// Result of handing one file to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadOutcome {
    /// The file was parsed and is now the displayed data set.
    Loaded { sensors: usize, readings: usize },
    /// The file type is not accepted; nothing changed.
    Skipped,
    /// A newer load started before this one finished; its result was dropped.
    Stale,
}

/// Main orchestration facade consumed by host applications.
///
/// `SensorChart` owns the current data set, the display selection and the
/// scale session, and hands finished frames to the renderer. State only
/// changes after a load, projection and setup have all succeeded.
pub struct SensorChart<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    style: FrameStyle,
    loads: LoadGuard,
    data: Option<Arc<Data>>,
    display: DisplaySignals,
    viewport: Option<Viewport>,
    session: Option<ScaleSession>,
    highlight: HighlightState,
}

impl<R: Renderer> SensorChart<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            config,
            style: FrameStyle::default(),
            loads: LoadGuard::default(),
            data: None,
            display: DisplaySignals::new(),
            viewport: None,
            session: None,
            highlight: HighlightState::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn set_frame_style(&mut self, style: FrameStyle) {
        self.style = style;
    }

    #[must_use]
    pub fn data(&self) -> Option<Arc<Data>> {
        self.data.clone()
    }

    #[must_use]
    pub fn display_signals(&self) -> &DisplaySignals {
        &self.display
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Current scale session; `None` while uninitialized.
    #[must_use]
    pub fn session(&self) -> Option<&ScaleSession> {
        self.session.as_ref()
    }

    /// Signals currently selected for rendering, in data order.
    #[must_use]
    pub fn displayed_signals(&self) -> Vec<&Signal> {
        match &self.data {
            Some(data) => project_display_signals(data, &self.display),
            None => Vec::new(),
        }
    }

    /// Starts a load whose result is committed with [`Self::complete_load`].
    ///
    /// Starting another load makes every earlier ticket stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.loads.begin();
        debug!(generation = ticket.generation(), "load started");
        ticket
    }

    /// Commits a parse result for `ticket`.
    ///
    /// A stale ticket's result is dropped, whether it parsed or failed. A
    /// fresh read error propagates and leaves the chart untouched. Fresh
    /// data always replaces the current set; the selection is reset to show
    /// every signal of the first `max_axes` sensors.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: ChartResult<Data>,
    ) -> ChartResult<LoadOutcome> {
        if !self.loads.is_current(ticket) {
            warn!(
                generation = ticket.generation(),
                latest = self.loads.latest_generation(),
                failed = result.is_err(),
                "discarding stale load result"
            );
            return Ok(LoadOutcome::Stale);
        }
        let data = result?;

        if data.len() > self.config.max_axes {
            warn!(
                sensors = data.len(),
                max = self.config.max_axes,
                "too many sensors to display at once; showing the first ones"
            );
        }
        let display = DisplaySignals::leading(&data, self.config.max_axes);
        let session = self.build_session(&data, &display)?;
        let outcome = LoadOutcome::Loaded {
            sensors: data.len(),
            readings: data.reading_count(),
        };

        self.data = Some(Arc::new(data));
        self.display = display;
        self.session = session;
        self.highlight.clear();
        info!(?outcome, "data set replaced");
        Ok(outcome)
    }

    /// Loads one file: unsupported types are logged and skipped, read errors
    /// propagate.
    pub fn load_file(&mut self, file: &dyn FileSource) -> ChartResult<LoadOutcome> {
        if let Err(err) = accept_file(file, &self.config.accepted_mime) {
            warn!(error = %err, "unsupported file skipped");
            return Ok(LoadOutcome::Skipped);
        }
        let ticket = self.begin_load();
        let result = ingest_file(file, &self.config.syslog_token);
        self.complete_load(ticket, result)
    }

    /// Loads every dropped file in order; the last successfully parsed one
    /// ends up displayed.
    pub fn drop_files(&mut self, files: &[&dyn FileSource]) -> Vec<ChartResult<LoadOutcome>> {
        debug!(count = files.len(), "files dropped");
        files.iter().map(|file| self.load_file(*file)).collect()
    }

    /// Replaces the display selection and rebuilds the session.
    pub fn set_display_signals(&mut self, display: DisplaySignals) -> ChartResult<()> {
        let session = match &self.data {
            Some(data) => self.build_session(data, &display)?,
            None => None,
        };
        self.display = display;
        self.session = session;
        self.highlight.clear();
        Ok(())
    }

    /// Sets the host surface size (initial size or resize) and rebuilds the
    /// session.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let previous = self.viewport.replace(viewport);
        let session = match &self.data {
            Some(data) => self.build_session(data, &self.display),
            None => Ok(None),
        };
        match session {
            Ok(session) => {
                self.session = session;
                Ok(())
            }
            Err(err) => {
                self.viewport = previous;
                Err(err)
            }
        }
    }

    /// Applies a zoom/pan transform delivered by the host surface.
    pub fn zoom(&mut self, transform: ZoomTransform) -> ChartResult<ZoomTransform> {
        self.session_mut()?.apply_zoom(transform)
    }

    /// Wheel zoom at a plot-space point.
    pub fn wheel(&mut self, delta_y: f64, point: [f64; 2]) -> ChartResult<ZoomTransform> {
        self.session_mut()?.wheel(delta_y, point)
    }

    /// Drag pan by a pixel delta.
    pub fn drag(&mut self, dx_px: f64, dy_px: f64) -> ChartResult<ZoomTransform> {
        self.session_mut()?.drag(dx_px, dy_px)
    }

    /// Highlights the displayed signal named `signal_name` and returns its
    /// tooltip; `pointer` is in plot-area coordinates.
    pub fn hover(&mut self, signal_name: &str, pointer: (f64, f64)) -> Option<Tooltip> {
        let session = self.session.as_ref()?;
        let data = self.data.as_ref()?;
        let signal = project_display_signals(data, &self.display)
            .into_iter()
            .find(|signal| signal.name() == signal_name)?;

        let tick = session.x_scale().invert(pointer.0);
        let tooltip = Tooltip::for_signal(signal, pointer, tick);
        self.highlight.hover(signal);
        Some(tooltip)
    }

    pub fn pointer_out(&mut self) {
        self.highlight.clear();
    }

    #[must_use]
    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    /// Builds the frame for the current state. Without a session the frame
    /// is empty.
    pub fn build_frame(&self) -> ChartResult<RenderFrame> {
        let viewport = self.viewport.ok_or(ChartError::NotConfigured)?;
        let Some(session) = &self.session else {
            return Ok(RenderFrame::new(viewport));
        };
        let signals = self.displayed_signals();
        FrameBuilder {
            viewport,
            session,
            signals: &signals,
            highlight: &self.highlight,
            style: self.style,
        }
        .build()
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn session_mut(&mut self) -> ChartResult<&mut ScaleSession> {
        self.session.as_mut().ok_or(ChartError::NotConfigured)
    }

    // `Ok(None)` means nothing to draw: no viewport yet or an empty selection.
    fn build_session(
        &self,
        data: &Data,
        display: &DisplaySignals,
    ) -> ChartResult<Option<ScaleSession>> {
        let Some(viewport) = self.viewport else {
            return Ok(None);
        };
        let signals = project_display_signals(data, display);
        if signals.is_empty() {
            return Ok(None);
        }
        ScaleSession::setup(viewport, &self.config, data, &signals).map(Some)
    }
}
