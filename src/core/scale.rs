use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Continuous linear mapping from a value domain onto a pixel range.
///
/// A degenerate domain (`start == end`) maps every value onto the middle of
/// the range instead of failing, so message-only series and single-sample
/// series still get a drawable position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        validate_pair(domain, "scale domain")?;
        validate_pair(range, "scale range")?;
        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Returns a copy with a replaced domain and the same range.
    pub fn with_domain(self, start: f64, end: f64) -> ChartResult<Self> {
        Self::new((start, end), self.range())
    }

    /// Maps a domain value to the range. Non-finite input yields NaN.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let t = normalize(self.domain_start, self.domain_end, value);
        self.range_start + t * (self.range_end - self.range_start)
    }

    /// Maps a range value back to the domain.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let t = normalize(self.range_start, self.range_end, pixel);
        self.domain_start + t * (self.domain_end - self.domain_start)
    }

    /// Human-friendly tick values covering the domain.
    ///
    /// Steps are powers of ten multiplied by 1, 2 or 5; roughly `count`
    /// values are returned, in the domain's direction.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        tick_values(self.domain_start, self.domain_end, count)
    }

    /// Absolute distance between adjacent ticks for `count`, or `None` when
    /// the domain cannot produce ticks.
    #[must_use]
    pub fn tick_step(self, count: usize) -> Option<f64> {
        let (start, stop) = ordered(self.domain_start, self.domain_end);
        tick_step(start, stop, count)
    }
}

fn validate_pair(pair: (f64, f64), what: &str) -> ChartResult<()> {
    if !pair.0.is_finite() || !pair.1.is_finite() {
        return Err(ChartError::InvalidData(format!("{what} must be finite")));
    }
    Ok(())
}

fn normalize(start: f64, end: f64, value: f64) -> f64 {
    let span = end - start;
    if span == 0.0 {
        return if value.is_nan() { f64::NAN } else { 0.5 };
    }
    (value - start) / span
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Signed increment: positive values are the step itself, negative values
/// are the negated inverse of a sub-unit step (keeps sub-unit ticks exact).
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

fn tick_step(start: f64, stop: f64, count: usize) -> Option<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() || start == stop {
        return None;
    }
    let increment = tick_increment(start, stop, count);
    if increment == 0.0 || !increment.is_finite() {
        return None;
    }
    Some(if increment > 0.0 {
        increment
    } else {
        1.0 / -increment
    })
}

fn tick_values(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (start, stop) = ordered(start, stop);
    let increment = tick_increment(start, stop, count);
    if increment == 0.0 || !increment.is_finite() {
        return Vec::new();
    }

    let mut ticks = Vec::new();
    if increment > 0.0 {
        let first = (start / increment).ceil();
        let last = (stop / increment).floor();
        let mut i = first;
        while i <= last {
            ticks.push(i * increment);
            i += 1.0;
        }
    } else {
        let inverse = -increment;
        let first = (start * inverse).ceil();
        let last = (stop * inverse).floor();
        let mut i = first;
        while i <= last {
            ticks.push(i / inverse);
            i += 1.0;
        }
    }

    if reverse {
        ticks.reverse();
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn ticks_use_one_two_five_steps() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 500.0)).expect("scale");
        assert_eq!(
            scale.ticks(10),
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]
        );
        assert_eq!(scale.ticks(4), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn sub_unit_ticks_stay_exact() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0)).expect("scale");
        let ticks = scale.ticks(5);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(scale.tick_step(5), Some(0.2));
    }

    #[test]
    fn reversed_domain_yields_descending_ticks() {
        let scale = LinearScale::new((10.0, 0.0), (0.0, 100.0)).expect("scale");
        assert_eq!(scale.ticks(2), vec![10.0, 5.0, 0.0]);
    }

    #[test]
    fn degenerate_domain_maps_to_range_midpoint() {
        let scale = LinearScale::new((3.0, 3.0), (400.0, 0.0)).expect("scale");
        assert_eq!(scale.map(3.0), 200.0);
        assert_eq!(scale.map(-7.0), 200.0);
        assert!(scale.map(f64::NAN).is_nan());
        assert_eq!(scale.ticks(10), vec![3.0]);
    }
}
