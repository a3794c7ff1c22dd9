use serde::{Deserialize, Serialize};

use crate::core::Margins;
use crate::error::{ChartError, ChartResult};
use crate::ingest::{CSV_MIME, DEFAULT_SYSLOG_TOKEN};
use crate::interaction::DEFAULT_WHEEL_STEP;

/// How displayed sensors contribute to the shared horizontal domain.
///
/// Each vertical domain always covers its own sensor's full extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExtentsPolicy {
    /// The sensor of the first displayed signal defines the shared
    /// horizontal domain.
    #[default]
    FirstSignal,
    /// The horizontal domain covers every displayed sensor.
    Union,
}

/// Chart setup persisted/loaded by host applications.
///
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub margins: Margins,
    pub scale_extent: (f64, f64),
    pub initial_zoom_scale: f64,
    /// Initial horizontal pan in pixels; `None` pans by the plot width.
    pub initial_pan_px: Option<f64>,
    pub accepted_mime: String,
    pub syslog_token: String,
    pub extents_policy: ExtentsPolicy,
    pub max_axes: usize,
    pub wheel_zoom_step: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            scale_extent: (1.0, 50.0),
            initial_zoom_scale: 2.0,
            initial_pan_px: None,
            accepted_mime: CSV_MIME.to_owned(),
            syslog_token: DEFAULT_SYSLOG_TOKEN.to_owned(),
            extents_policy: ExtentsPolicy::default(),
            max_axes: 4,
            wheel_zoom_step: DEFAULT_WHEEL_STEP,
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_extents_policy(mut self, policy: ExtentsPolicy) -> Self {
        self.extents_policy = policy;
        self
    }

    #[must_use]
    pub fn with_initial_zoom(mut self, scale: f64, pan_px: Option<f64>) -> Self {
        self.initial_zoom_scale = scale;
        self.initial_pan_px = pan_px;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.margins
            .validate()
            .map_err(|err| ChartError::Config(err.to_string()))?;

        let (min, max) = self.scale_extent;
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ChartError::Config(
                "scale_extent must be finite, > 0 and ordered".to_owned(),
            ));
        }
        if !self.initial_zoom_scale.is_finite() || self.initial_zoom_scale <= 0.0 {
            return Err(ChartError::Config(
                "initial_zoom_scale must be finite and > 0".to_owned(),
            ));
        }
        if self.initial_pan_px.is_some_and(|pan| !pan.is_finite()) {
            return Err(ChartError::Config(
                "initial_pan_px must be finite".to_owned(),
            ));
        }
        if self.accepted_mime.is_empty() {
            return Err(ChartError::Config("accepted_mime must not be empty".to_owned()));
        }
        if self.syslog_token.is_empty() {
            return Err(ChartError::Config("syslog_token must not be empty".to_owned()));
        }
        if self.max_axes == 0 || self.max_axes > 4 {
            return Err(ChartError::Config(
                "max_axes must be between 1 and 4".to_owned(),
            ));
        }
        if !self.wheel_zoom_step.is_finite() || self.wheel_zoom_step <= 0.0 {
            return Err(ChartError::Config(
                "wheel_zoom_step must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Config(format!("failed to parse chart config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Config(format!("failed to serialize chart config: {e}")))
    }
}
