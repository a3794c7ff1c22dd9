use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

/// Affine pan/zoom transform: `screen = k * plot + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    #[must_use]
    pub const fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    #[must_use]
    pub fn apply_x(self, x: f64) -> f64 {
        x * self.k + self.x
    }

    #[must_use]
    pub fn invert_x(self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    #[must_use]
    pub fn invert_y(self, y: f64) -> f64 {
        (y - self.y) / self.k
    }

    #[must_use]
    pub fn invert(self, point: [f64; 2]) -> [f64; 2] {
        [self.invert_x(point[0]), self.invert_y(point[1])]
    }

    /// Multiplies the scale factor.
    #[must_use]
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.k * k, self.x, self.y)
    }

    /// Translates by a plot-space offset (multiplied by `k`).
    #[must_use]
    pub fn translate(self, x: f64, y: f64) -> Self {
        Self::new(self.k, self.x + self.k * x, self.y + self.k * y)
    }

    /// Re-derives a horizontal scale from `base`: the base range is mapped
    /// back through this transform and then through `base` to a new domain.
    ///
    /// Always start from the same untransformed `base`; feeding the result
    /// back in would compound transforms.
    pub fn rescale_x(self, base: LinearScale) -> ChartResult<LinearScale> {
        let (r0, r1) = base.range();
        let d0 = base.invert(self.invert_x(r0));
        let d1 = base.invert(self.invert_x(r1));
        base.with_domain(d0, d1)
    }

    fn validate(self) -> ChartResult<Self> {
        if !self.k.is_finite() || self.k <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom scale factor must be finite and > 0".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom translation must be finite".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Wheel delta multiplier: one wheel unit scales by `2^(-delta * step)`.
pub const DEFAULT_WHEEL_STEP: f64 = 0.002;

/// Pan/zoom behavior bound to a plot area.
///
/// Every transform it stores has its scale clamped into `scale_extent` and
/// its translation constrained so the viewport never leaves
/// `translate_extent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBehavior {
    scale_extent: (f64, f64),
    extent: [[f64; 2]; 2],
    translate_extent: [[f64; 2]; 2],
    wheel_step: f64,
    transform: ZoomTransform,
}

impl ZoomBehavior {
    /// Creates a behavior whose viewport and translate extent are both
    /// `[[0, 0], [width, height]]`.
    pub fn new(width: f64, height: f64, scale_extent: (f64, f64)) -> ChartResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom extent must be finite and > 0".to_owned(),
            ));
        }
        let scale_extent = validate_scale_extent(scale_extent)?;
        let bounds = [[0.0, 0.0], [width, height]];
        Ok(Self {
            scale_extent,
            extent: bounds,
            translate_extent: bounds,
            wheel_step: DEFAULT_WHEEL_STEP,
            transform: ZoomTransform::IDENTITY,
        })
    }

    pub fn with_wheel_step(mut self, wheel_step: f64) -> ChartResult<Self> {
        if !wheel_step.is_finite() || wheel_step <= 0.0 {
            return Err(ChartError::InvalidData(
                "wheel zoom step must be finite and > 0".to_owned(),
            ));
        }
        self.wheel_step = wheel_step;
        Ok(self)
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    #[must_use]
    pub fn scale_extent(&self) -> (f64, f64) {
        self.scale_extent
    }

    /// Replaces the transform, clamping and constraining it first.
    pub fn set_transform(&mut self, transform: ZoomTransform) -> ChartResult<ZoomTransform> {
        let transform = transform.validate()?;
        let clamped = self.clamp_scale(transform, transform.k);
        Ok(self.store(self.constrain(clamped)))
    }

    /// Sets the scale factor, keeping the viewport centre fixed.
    pub fn scale_to(&mut self, k: f64) -> ChartResult<ZoomTransform> {
        self.scale_to_at(k, self.centroid())
    }

    /// Multiplies the scale factor, keeping the viewport centre fixed.
    pub fn scale_by(&mut self, factor: f64) -> ChartResult<ZoomTransform> {
        self.scale_to(self.transform.k * factor)
    }

    /// Multiplies the scale factor, keeping `point` fixed on screen.
    pub fn scale_by_at(&mut self, factor: f64, point: [f64; 2]) -> ChartResult<ZoomTransform> {
        self.scale_to_at(self.transform.k * factor, point)
    }

    /// Translates by a plot-space offset.
    pub fn translate_by(&mut self, dx: f64, dy: f64) -> ChartResult<ZoomTransform> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom translation must be finite".to_owned(),
            ));
        }
        let translated = self.transform.translate(dx, dy);
        Ok(self.store(self.constrain(translated)))
    }

    /// Wheel gesture at `point`; negative deltas zoom in.
    pub fn wheel(&mut self, delta_y: f64, point: [f64; 2]) -> ChartResult<ZoomTransform> {
        if !delta_y.is_finite() {
            return Err(ChartError::InvalidData(
                "wheel delta must be finite".to_owned(),
            ));
        }
        let factor = (-delta_y * self.wheel_step).exp2();
        self.scale_by_at(factor, point)
    }

    /// Drag gesture by a screen-space pixel delta.
    pub fn drag(&mut self, dx_px: f64, dy_px: f64) -> ChartResult<ZoomTransform> {
        let k = self.transform.k;
        self.translate_by(dx_px / k, dy_px / k)
    }

    fn scale_to_at(&mut self, k: f64, point: [f64; 2]) -> ChartResult<ZoomTransform> {
        if !k.is_finite() || k <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom scale factor must be finite and > 0".to_owned(),
            ));
        }
        if !point[0].is_finite() || !point[1].is_finite() {
            return Err(ChartError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }

        let anchor_plot = self.transform.invert(point);
        let scaled = self.clamp_scale(self.transform, k);
        let anchored = ZoomTransform::new(
            scaled.k,
            point[0] - anchor_plot[0] * scaled.k,
            point[1] - anchor_plot[1] * scaled.k,
        );
        Ok(self.store(self.constrain(anchored)))
    }

    fn clamp_scale(&self, transform: ZoomTransform, k: f64) -> ZoomTransform {
        let k = k.clamp(self.scale_extent.0, self.scale_extent.1);
        ZoomTransform::new(k, transform.x, transform.y)
    }

    fn constrain(&self, transform: ZoomTransform) -> ZoomTransform {
        let [[e0x, e0y], [e1x, e1y]] = self.extent;
        let [[t0x, t0y], [t1x, t1y]] = self.translate_extent;
        let dx0 = transform.invert_x(e0x) - t0x;
        let dx1 = transform.invert_x(e1x) - t1x;
        let dy0 = transform.invert_y(e0y) - t0y;
        let dy1 = transform.invert_y(e1y) - t1y;
        transform.translate(constrain_axis(dx0, dx1), constrain_axis(dy0, dy1))
    }

    fn centroid(&self) -> [f64; 2] {
        let [[x0, y0], [x1, y1]] = self.extent;
        [(x0 + x1) / 2.0, (y0 + y1) / 2.0]
    }

    fn store(&mut self, transform: ZoomTransform) -> ZoomTransform {
        trace!(k = transform.k, x = transform.x, y = transform.y, "zoom transform");
        self.transform = transform;
        transform
    }
}

fn constrain_axis(d0: f64, d1: f64) -> f64 {
    if d1 > d0 {
        return (d0 + d1) / 2.0;
    }
    let low = d0.min(0.0);
    if low != 0.0 { low } else { d1.max(0.0) }
}

fn validate_scale_extent(extent: (f64, f64)) -> ChartResult<(f64, f64)> {
    let (min, max) = extent;
    if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
        return Err(ChartError::InvalidData(
            "zoom scale extent must be finite, > 0 and ordered".to_owned(),
        ));
    }
    Ok(extent)
}
