//! CSV sensor-log ingestion: tokenizer, data model and fold pipeline.

pub mod model;
pub mod pipeline;
pub mod source;
pub mod tokenizer;

pub use model::{Data, Reading, ReadingValue, Sensor, SensorKind, Signal, signal_name};
pub use pipeline::{
    DEFAULT_SYSLOG_TOKEN, DataBuilder, ingest_file, parse_csv_text, parse_csv_text_with,
};
pub use source::{
    CSV_MIME, FileSource, LocalFile, MemoryFile, accept_file, mime_from_extension,
    read_file_text,
};
pub use tokenizer::{Row, Rows, coerce_number, tokenize};
