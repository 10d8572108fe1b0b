use std::path::PathBuf;

use texmatch_core::ConflictError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("The path '{0}' does not exist")]
    NotFound(PathBuf),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No material was selected")]
    EmptySelection,
}

/// Everything that aborts a batch before any material is touched
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),
}
