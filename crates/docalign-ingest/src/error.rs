//! Error types for document ingestion.

use std::path::PathBuf;

use docalign_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading templates, discovering documents or
/// reading OCR output. Each one aborts a single document, never the batch.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input document, directory or OCR sidecar does not exist.
    #[error("input not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Template Errors ===
    /// Template file does not exist.
    #[error("template not found: {path}")]
    TemplateMissing { path: PathBuf },

    /// Template file exists but its keys are invalid.
    #[error("invalid template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    // === OCR Output Errors ===
    /// OCR output could not be decoded.
    #[error("failed to decode OCR output {path}: {message}")]
    DecodeFailure { path: PathBuf, message: String },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::InputNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
