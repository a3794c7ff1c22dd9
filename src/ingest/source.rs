use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

pub const CSV_MIME: &str = "text/csv";

/// A file handed over by the host (drop zone, file picker, CLI argument).
pub trait FileSource {
    fn name(&self) -> &str;

    fn mime_type(&self) -> &str;

    /// Reads the whole file as UTF-8 text.
    fn read_text(&self) -> io::Result<String>;
}

/// File on the local filesystem; the MIME type is guessed from its extension
/// unless given explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    mime: String,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mime = mime_from_extension(&path).to_owned();
        Self::with_mime(path, mime)
    }

    pub fn with_mime(path: impl Into<PathBuf>, mime: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        Self {
            path,
            name,
            mime: mime.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileSource for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime
    }

    fn read_text(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}

/// File whose contents are already in memory, or whose read is known to fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    name: String,
    mime: String,
    contents: Result<String, io::ErrorKind>,
}

impl MemoryFile {
    pub fn new(
        name: impl Into<String>,
        mime: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            contents: Ok(contents.into()),
        }
    }

    pub fn csv(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self::new(name, CSV_MIME, contents)
    }

    /// A file whose read fails with `kind`.
    pub fn unreadable(name: impl Into<String>, mime: impl Into<String>, kind: io::ErrorKind) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            contents: Err(kind),
        }
    }
}

impl FileSource for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime
    }

    fn read_text(&self) -> io::Result<String> {
        match &self.contents {
            Ok(text) => Ok(text.clone()),
            Err(kind) => Err(io::Error::new(*kind, format!("cannot read `{}`", self.name))),
        }
    }
}

#[must_use]
pub fn mime_from_extension(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => CSV_MIME,
        Some("txt" | "log") => "text/plain",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("mp4") => "video/mp4",
        _ => "application/octet-stream",
    }
}

/// Checks the file's MIME type against `accepted_mime`.
pub fn accept_file(file: &dyn FileSource, accepted_mime: &str) -> ChartResult<()> {
    if file.mime_type() == accepted_mime {
        debug!(file = file.name(), mime = file.mime_type(), "accepted file");
        return Ok(());
    }
    Err(ChartError::UnsupportedFileType {
        name: file.name().to_owned(),
        mime: file.mime_type().to_owned(),
    })
}

/// Reads a file's text, mapping I/O failures to [`ChartError::Read`].
pub fn read_file_text(file: &dyn FileSource) -> ChartResult<String> {
    file.read_text().map_err(|err| {
        warn!(file = file.name(), code = ?err.kind(), error = %err, "file could not be read");
        ChartError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;

    use super::{MemoryFile, accept_file, mime_from_extension, read_file_text};
    use crate::error::ChartError;

    #[test]
    fn extension_guess_is_case_insensitive() {
        assert_eq!(mime_from_extension(Path::new("run.CSV")), "text/csv");
        assert_eq!(mime_from_extension(Path::new("shot.png")), "image/png");
        assert_eq!(
            mime_from_extension(Path::new("noext")),
            "application/octet-stream"
        );
    }

    #[test]
    fn non_csv_file_is_rejected_by_type() {
        let file = MemoryFile::new("shot.png", "image/png", "");
        let err = accept_file(&file, "text/csv").expect_err("png must be rejected");
        assert!(matches!(err, ChartError::UnsupportedFileType { .. }));
    }

    #[test]
    fn read_failure_carries_error_code() {
        let file = MemoryFile::unreadable("log.csv", "text/csv", io::ErrorKind::PermissionDenied);
        let err = read_file_text(&file).expect_err("read must fail");
        assert!(matches!(
            err,
            ChartError::Read {
                code: io::ErrorKind::PermissionDenied,
                ..
            }
        ));
    }
}
