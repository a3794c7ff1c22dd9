use serde::{Deserialize, Serialize};

use crate::core::LinearScale;

/// Default number of ticks requested from a scale.
pub const AXIS_TICK_COUNT: usize = 10;

/// SI prefix for exponents -24..=24 in steps of three.
const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisSide {
    Left,
    Right,
}

/// Where a sensor's vertical axis is drawn and which way its ticks point.
///
/// Placement follows left, right, right, left for the first four sensors;
/// tick orientation simply alternates left, right, left, right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisPlacement {
    pub sensor: String,
    pub index: usize,
    pub side: AxisSide,
    pub orientation: AxisSide,
}

/// Side for the `index`-th distinct sensor, `None` past the fourth.
#[must_use]
pub fn axis_side_for_index(index: usize) -> Option<AxisSide> {
    match index {
        0 | 3 => Some(AxisSide::Left),
        1 | 2 => Some(AxisSide::Right),
        _ => None,
    }
}

#[must_use]
pub fn axis_orientation_for_index(index: usize) -> AxisSide {
    if index % 2 == 0 {
        AxisSide::Left
    } else {
        AxisSide::Right
    }
}

/// One labelled tick in scale range coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

/// Horizontal ticks: fixed-point labels with thousands separators and as
/// many decimals as the tick step needs.
#[must_use]
pub fn horizontal_ticks(scale: LinearScale, count: usize) -> Vec<AxisTick> {
    let decimals = scale.tick_step(count).map_or(0, precision_for_step);
    scale
        .ticks(count)
        .into_iter()
        .map(|value| AxisTick {
            value,
            position: scale.map(value),
            label: format_grouped_fixed(value, decimals),
        })
        .collect()
}

/// Vertical ticks: two significant digits with an SI prefix.
#[must_use]
pub fn vertical_ticks(scale: LinearScale, count: usize) -> Vec<AxisTick> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| AxisTick {
            value,
            position: scale.map(value),
            label: format_si(value, 2),
        })
        .collect()
}

fn precision_for_step(step: f64) -> usize {
    let exponent = step.abs().log10().floor();
    if exponent.is_finite() && exponent < 0.0 {
        (-exponent) as usize
    } else {
        0
    }
}

/// Formats `value` with `precision` significant digits and an SI prefix
/// (`1500 -> "1.5k"`, `0.5 -> "500m"`, `0 -> "0.0"`).
#[must_use]
pub fn format_si(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let precision = precision.max(1);
    let sign = if value < 0.0 { "-" } else { "" };
    let (digits, exponent) = decimal_digits(value.abs(), precision);

    let prefix_exponent = exponent.div_euclid(3).clamp(-8, 8);
    let split = exponent - prefix_exponent * 3 + 1;
    let len = digits.len() as i32;
    let body = if split == len {
        digits
    } else if split > len {
        format!("{digits}{}", "0".repeat((split - len) as usize))
    } else if split > 0 {
        let (int, frac) = digits.split_at(split as usize);
        format!("{int}.{frac}")
    } else {
        let extra = (precision as i32 + split - 1).max(1) as usize;
        let (tail, _) = decimal_digits(value.abs(), extra);
        format!("0.{}{tail}", "0".repeat((1 - split) as usize))
    };

    let prefix = SI_PREFIXES[(prefix_exponent + 8) as usize];
    format!("{sign}{body}{prefix}")
}

/// Coefficient digits (no decimal point) and decimal exponent of `value`
/// rounded to `precision` significant digits.
fn decimal_digits(value: f64, precision: usize) -> (String, i32) {
    let formatted = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let digits = mantissa.chars().filter(|c| *c != '.').collect();
    (digits, exponent.parse().unwrap_or(0))
}

/// Fixed-point formatting with `,` thousands separators.
#[must_use]
pub fn format_grouped_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int, frac) = match formatted.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (index, ch) in int.chars().enumerate() {
        if index > 0 && (int.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    match frac {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
