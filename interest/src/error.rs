use std::path::Path;
use std::path::PathBuf;

/// Persistence failure surfaced to the caller.
///
/// A failed read or write is scoped to the single user action that
/// triggered it; prior in-memory state stays intact and the action can be
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("interest map encoding: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "sqlite")]
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StorageError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
