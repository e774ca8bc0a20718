//! Error types shared across Caplit crates.

use std::path::PathBuf;

/// Top-level error type for Caplit operations.
#[derive(Debug, thiserror::Error)]
pub enum CaplitError {
    #[error("Transcription error: {message}")]
    Transcription { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Job error: {message}")]
    Job { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CaplitError.
pub type CaplitResult<T> = Result<T, CaplitError>;

impl CaplitError {
    pub fn transcription(msg: impl Into<String>) -> Self {
        Self::Transcription {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn job(msg: impl Into<String>) -> Self {
        Self::Job {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
