use indexmap::IndexMap;
use tracing::{debug, info, trace};

use crate::error::ChartResult;
use crate::ingest::model::{Data, Reading, Sensor, SensorKind};
use crate::ingest::source::{FileSource, read_file_text};
use crate::ingest::tokenizer::{Row, tokenize};

/// Token reserved for the syslog/message sensor.
pub const DEFAULT_SYSLOG_TOKEN: &str = "S";

/// Folds rows into a sensor mapping it owns exclusively until `finish`.
#[derive(Debug, Clone)]
pub struct DataBuilder {
    syslog_token: String,
    sensors: IndexMap<String, Sensor>,
    rows_seen: usize,
    rows_skipped: usize,
}

impl Default for DataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DataBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::with_syslog_token(DEFAULT_SYSLOG_TOKEN)
    }

    #[must_use]
    pub fn with_syslog_token(token: impl Into<String>) -> Self {
        Self {
            syslog_token: token.into(),
            sensors: IndexMap::new(),
            rows_seen: 0,
            rows_skipped: 0,
        }
    }

    /// Adds one row. Rows with an empty token are skipped.
    pub fn push_row(&mut self, row: Row) {
        self.rows_seen += 1;
        if row.token.is_empty() {
            self.rows_skipped += 1;
            trace!(row = self.rows_seen, "skipping row without sensor token");
            return;
        }

        let tick = row.tick;
        let sensor = self.sensor_for(row.token);
        let kind = sensor.kind();
        for (dim, raw) in row.dimensions.into_iter().enumerate() {
            sensor.append(
                Reading {
                    tick,
                    value: kind.coerce(raw),
                },
                dim,
            );
        }
    }

    pub fn extend_rows<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = Row>,
    {
        for row in rows {
            self.push_row(row);
        }
    }

    #[must_use]
    pub fn rows_skipped(&self) -> usize {
        self.rows_skipped
    }

    /// Hands the completed mapping off as an immutable value.
    #[must_use]
    pub fn finish(self) -> Data {
        debug!(
            rows = self.rows_seen,
            skipped = self.rows_skipped,
            sensors = self.sensors.len(),
            "ingestion finished"
        );
        Data::from_sensors(self.sensors)
    }

    // The variant is bound on first sight of a token and never re-checked.
    fn sensor_for(&mut self, token: String) -> &mut Sensor {
        if let Some(index) = self.sensors.get_index_of(token.as_str()) {
            return &mut self.sensors[index];
        }

        let kind = if token == self.syslog_token {
            SensorKind::Syslog
        } else {
            SensorKind::Standard
        };
        debug!(token = %token, ?kind, "created sensor");
        let sensor = Sensor::new(token.clone(), kind);
        let (index, _) = self.sensors.insert_full(token, sensor);
        &mut self.sensors[index]
    }
}

/// Tokenizes and ingests CSV text with the default syslog token.
#[must_use]
pub fn parse_csv_text(text: &str) -> Data {
    parse_csv_text_with(text, DEFAULT_SYSLOG_TOKEN)
}

#[must_use]
pub fn parse_csv_text_with(text: &str, syslog_token: &str) -> Data {
    let mut builder = DataBuilder::with_syslog_token(syslog_token);
    builder.extend_rows(tokenize(text));
    builder.finish()
}

/// Reads the whole file, then tokenizes and ingests it.
///
/// A read failure aborts before any row is processed; there is no partial
/// result.
pub fn ingest_file(file: &dyn FileSource, syslog_token: &str) -> ChartResult<Data> {
    let text = read_file_text(file)?;
    let data = parse_csv_text_with(&text, syslog_token);
    info!(
        file = file.name(),
        bytes = text.len(),
        sensors = data.len(),
        readings = data.reading_count(),
        "parsed sensor log"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::parse_csv_text_with;

    #[test]
    fn custom_syslog_token_selects_message_variant() {
        let data = parse_csv_text_with("LOG,1,hello\nS,1,2\n", "LOG");
        assert!(data.get("LOG").expect("LOG").is_message());
        assert!(!data.get("S").expect("S").is_message());
    }
}
