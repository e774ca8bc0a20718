//! Whisper model size selection.

use serde::{Deserialize, Serialize};

use caplit_common::error::{CaplitError, CaplitResult};

/// Whisper model size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhisperModel {
    /// Fastest, least accurate (~39 MB).
    Tiny,
    /// Good balance of speed and accuracy (~142 MB).
    Base,
    /// Better accuracy, slower (~466 MB).
    Small,
    /// High accuracy (~1.5 GB).
    Medium,
    /// Best accuracy, slowest (~2.9 GB).
    Large,
}

impl WhisperModel {
    /// Name understood by the whisper CLI's `--model` flag.
    pub fn cli_name(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::Base => "base",
            WhisperModel::Small => "small",
            WhisperModel::Medium => "medium",
            WhisperModel::Large => "large",
        }
    }

    /// Parse a configured model name.
    pub fn parse(name: &str) -> CaplitResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tiny" => Ok(WhisperModel::Tiny),
            "base" => Ok(WhisperModel::Base),
            "small" => Ok(WhisperModel::Small),
            "medium" => Ok(WhisperModel::Medium),
            "large" => Ok(WhisperModel::Large),
            other => Err(CaplitError::config(format!(
                "Unknown whisper model '{other}'. Use: tiny, base, small, medium, large"
            ))),
        }
    }
}

impl Default for WhisperModel {
    fn default() -> Self {
        WhisperModel::Small
    }
}
