use gl_core::GlossaError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Codec error: {0}")]
    Codec(#[from] GlossaError),
    #[error("Not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("Corrupt side-file {}: {reason}", .path.display())]
    CorruptSideFile { path: PathBuf, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Map a read failure, turning a missing file into [`StoreError::NotFound`].
    pub(crate) fn read(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path: path.into() },
            _ => Self::Io(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
