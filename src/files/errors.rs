use std::path::PathBuf;

// ============================================================================
// File Errors
// ============================================================================
//
// Batch-fatal failures of the file collaborators. A single bad row is not a
// FileError; it is reported as a RecordError against its line number.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    Missing(PathBuf),

    #[error("CSV file has no header row: {0}")]
    MissingHeader(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl FileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv { path: path.into(), source }
    }
}
