use std::io;

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// File contents could not be read; `code` mirrors the I/O error kind.
    #[error("file could not be read (code {code:?}): {source}")]
    Read {
        code: io::ErrorKind,
        #[source]
        source: io::Error,
    },

    #[error("unsupported file `{name}` with type `{mime}`")]
    UnsupportedFileType { name: String, mime: String },

    #[error("too many displayed sensors: {count} (at most {max} axes are supported)")]
    TooManySensors { count: usize, max: usize },

    #[error("no signals are selected for display")]
    NoDisplayedSignals,

    #[error("chart has no scale session: load data and select signals first")]
    NotConfigured,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<io::Error> for ChartError {
    fn from(source: io::Error) -> Self {
        Self::Read {
            code: source.kind(),
            source,
        }
    }
}
