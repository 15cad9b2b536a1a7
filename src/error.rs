// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Course data directory does not exist: {path}")]
    DirectoryMissing { path: PathBuf },

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed course file {file}: {message}")]
    MalformedInput { file: String, message: String },

    #[error("Course '{identifier}' not found")]
    NotFound { identifier: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    /// True for conditions that listing tolerates by skipping the file.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            CatalogError::MalformedInput { .. } | CatalogError::FileOperation { .. }
        )
    }
}
