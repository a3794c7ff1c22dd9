use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Extents;
use crate::ingest::tokenizer::coerce_number;

/// Value carried by a reading: numeric for standard sensors, text for
/// message sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadingValue {
    Number(f64),
    Message(String),
}

impl ReadingValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Message(_) => None,
        }
    }

    #[must_use]
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Message(text) => Some(text),
        }
    }
}

/// One `(tick, value)` sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub tick: f64,
    pub value: ReadingValue,
}

impl Reading {
    #[must_use]
    pub fn number(tick: f64, value: f64) -> Self {
        Self {
            tick,
            value: ReadingValue::Number(value),
        }
    }

    #[must_use]
    pub fn message(tick: f64, text: impl Into<String>) -> Self {
        Self {
            tick,
            value: ReadingValue::Message(text.into()),
        }
    }
}

/// Sensor variant, fixed when the sensor is first created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorKind {
    /// Numeric readings; raw values are coerced to numbers.
    Standard,
    /// Free-text log messages; raw values are kept verbatim.
    Syslog,
}

impl SensorKind {
    #[must_use]
    pub fn is_message(self) -> bool {
        matches!(self, Self::Syslog)
    }

    /// Converts a raw CSV field into this variant's reading value.
    #[must_use]
    pub fn coerce(self, raw: String) -> ReadingValue {
        match self {
            Self::Standard => ReadingValue::Number(coerce_number(&raw)),
            Self::Syslog => ReadingValue::Message(raw),
        }
    }
}

/// One dimension's time series for one sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    sensor: String,
    dim: usize,
    name: String,
    readings: Vec<Reading>,
}

impl Signal {
    fn new(sensor: &str, dim: usize) -> Self {
        Self {
            sensor: sensor.to_owned(),
            dim,
            name: signal_name(sensor, dim),
            readings: Vec::new(),
        }
    }

    #[must_use]
    pub fn sensor(&self) -> &str {
        &self.sensor
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Display identifier, `<sensor>--<dim>`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Readings in arrival order; equal ticks are kept as-is.
    #[must_use]
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Bounding box over all readings, `None` without a finite tick.
    #[must_use]
    pub fn extents(&self) -> Option<Extents> {
        Extents::from_samples(
            self.readings
                .iter()
                .map(|reading| (reading.tick, reading.value.as_number())),
        )
    }

    /// `(tick, y)` pairs for line projection. Messages sit on `0.0`, which
    /// their degenerate vertical domain maps to the plot's mid-height.
    pub fn plot_samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.readings.iter().map(|reading| {
            (
                reading.tick,
                reading.value.as_number().unwrap_or(0.0),
            )
        })
    }

    fn push(&mut self, reading: Reading) {
        self.readings.push(reading);
    }
}

#[must_use]
pub fn signal_name(sensor: &str, dim: usize) -> String {
    format!("{sensor}--{dim}")
}

/// A named source of one or more dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    token: String,
    kind: SensorKind,
    signals: Vec<Signal>,
}

impl Sensor {
    #[must_use]
    pub fn new(token: impl Into<String>, kind: SensorKind) -> Self {
        Self {
            token: token.into(),
            kind,
            signals: Vec::new(),
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    #[must_use]
    pub fn is_message(&self) -> bool {
        self.kind.is_message()
    }

    /// Signals ordered by dimension index.
    #[must_use]
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    #[must_use]
    pub fn signal(&self, dim: usize) -> Option<&Signal> {
        self.signals.get(dim)
    }

    /// Appends a reading to dimension `dim`, creating signals up to `dim`
    /// on first reference.
    pub fn append(&mut self, reading: Reading, dim: usize) {
        while self.signals.len() <= dim {
            let next = self.signals.len();
            self.signals.push(Signal::new(&self.token, next));
        }
        self.signals[dim].push(reading);
    }

    /// Union of all signals' extents.
    #[must_use]
    pub fn extents(&self) -> Option<Extents> {
        self.signals
            .iter()
            .filter_map(Signal::extents)
            .reduce(Extents::union)
    }
}

/// Immutable token → sensor mapping produced by one parse.
///
/// Iteration follows the order in which tokens first appeared in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Data {
    sensors: IndexMap<String, Sensor>,
}

impl Data {
    pub(crate) fn from_sensors(sensors: IndexMap<String, Sensor>) -> Self {
        Self { sensors }
    }

    #[must_use]
    pub fn get(&self, token: &str) -> Option<&Sensor> {
        self.sensors.get(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.sensors.keys().map(String::as_str)
    }

    pub fn sensors(&self) -> impl Iterator<Item = &Sensor> {
        self.sensors.values()
    }

    /// Every signal, by sensor order then dimension order.
    pub fn signals(&self) -> impl Iterator<Item = &Signal> {
        self.sensors.values().flat_map(|sensor| sensor.signals.iter())
    }

    #[must_use]
    pub fn reading_count(&self) -> usize {
        self.signals().map(Signal::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{Reading, ReadingValue, Sensor, SensorKind};

    #[test]
    fn append_creates_signals_lazily_in_dimension_order() {
        let mut sensor = Sensor::new("gyro", SensorKind::Standard);
        sensor.append(Reading::number(1.0, 3.0), 0);
        sensor.append(Reading::number(1.0, 4.0), 2);

        assert_eq!(sensor.signals().len(), 3);
        assert!(sensor.signal(1).expect("dim 1").is_empty());
        assert_eq!(sensor.signal(2).expect("dim 2").name(), "gyro--2");
    }

    #[test]
    fn syslog_kind_keeps_raw_text() {
        assert_eq!(
            SensorKind::Syslog.coerce(" 12 ".to_owned()),
            ReadingValue::Message(" 12 ".to_owned())
        );
        assert_eq!(
            SensorKind::Standard.coerce(" 12 ".to_owned()),
            ReadingValue::Number(12.0)
        );
    }

    #[test]
    fn sensor_extents_are_the_union_of_signal_extents() {
        let mut sensor = Sensor::new("acc", SensorKind::Standard);
        sensor.append(Reading::number(1.0, 5.0), 0);
        sensor.append(Reading::number(4.0, -2.0), 1);

        let extents = sensor.extents().expect("extents");
        assert_eq!(extents.x_domain(), (1.0, 4.0));
        assert_eq!(extents.y_domain(), (-2.0, 5.0));
    }
}
