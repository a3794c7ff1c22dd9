use serde::{Deserialize, Serialize};

/// Bounding box of a series: tick range on x, value range on y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Extents {
    /// Computes extents from `(tick, value)` samples.
    ///
    /// Non-finite ticks and values are ignored. Returns `None` when no
    /// sample has a finite tick. When ticks exist but no value is numeric
    /// (message series, or all values failed to parse) the value range
    /// collapses to `[0, 0]`.
    pub fn from_samples<I>(samples: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, Option<f64>)>,
    {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for (tick, value) in samples {
            if tick.is_finite() {
                x_min = x_min.min(tick);
                x_max = x_max.max(tick);
            }
            if let Some(value) = value.filter(|value| value.is_finite()) {
                y_min = y_min.min(value);
                y_max = y_max.max(value);
            }
        }

        if x_min > x_max {
            return None;
        }
        if y_min > y_max {
            y_min = 0.0;
            y_max = 0.0;
        }

        Some(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    #[must_use]
    pub fn x_domain(self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    #[must_use]
    pub fn y_domain(self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }
}
