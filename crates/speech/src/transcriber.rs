//! Transcription boundary.
//!
//! The speech engine is a black box behind the [`Transcriber`] trait: given
//! a media file, it returns timed [`Segment`]s or fails. One engine handle
//! is shared read-only across all render workers, so implementations must
//! be `Send + Sync` and keep no per-call mutable state.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use caplit_caption_model::{Segment, Word};
use caplit_common::error::{CaplitError, CaplitResult};

use crate::model::WhisperModel;

/// Speech-to-text capability.
pub trait Transcriber: Send + Sync {
    /// Transcribe the speech track of `media` into timed segments.
    fn transcribe(&self, media: &Path) -> CaplitResult<Vec<Segment>>;
}

/// Transcriber backed by the `whisper` command-line tool.
///
/// Spawns `whisper` with JSON output and word timestamps into a scoped
/// temporary directory, then parses the result. The directory is removed
/// when the guard drops, whether or not transcription succeeded.
#[derive(Debug, Clone)]
pub struct WhisperCli {
    model: WhisperModel,
    language: Option<String>,
}

impl WhisperCli {
    pub fn new(model: WhisperModel, language: Option<String>) -> Self {
        Self { model, language }
    }

    /// Whether the whisper CLI is present on this system.
    pub fn is_available() -> bool {
        Command::new("whisper")
            .arg("--help")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

impl Transcriber for WhisperCli {
    fn transcribe(&self, media: &Path) -> CaplitResult<Vec<Segment>> {
        tracing::info!(
            path = %media.display(),
            model = ?self.model,
            "Starting transcription"
        );

        if !media.exists() {
            return Err(CaplitError::FileNotFound {
                path: media.to_path_buf(),
            });
        }

        let workdir = tempfile::tempdir().map_err(|e| {
            CaplitError::transcription(format!("Failed to create transcription workdir: {e}"))
        })?;

        let mut cmd = Command::new("whisper");
        cmd.arg(media)
            .args(["--model", self.model.cli_name()])
            .args(["--output_format", "json"])
            .args(["--word_timestamps", "True"])
            .arg("--output_dir")
            .arg(workdir.path());
        if let Some(language) = &self.language {
            cmd.args(["--language", language]);
        }

        let started = std::time::Instant::now();
        let output = cmd
            .output()
            .map_err(|e| CaplitError::transcription(format!("Failed to start whisper: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CaplitError::transcription(format!(
                "whisper failed (status {}): {}",
                output.status,
                stderr.trim()
            )));
        }

        let json_path = workdir.path().join(transcript_file_name(media));
        let content = std::fs::read_to_string(&json_path).map_err(|e| {
            CaplitError::transcription(format!(
                "whisper produced no transcript at {}: {e}",
                json_path.display()
            ))
        })?;

        let segments = parse_transcript(&content)?;
        tracing::info!(
            segments = segments.len(),
            elapsed_secs = started.elapsed().as_secs_f64(),
            "Transcription finished"
        );
        Ok(segments)
    }
}

/// The whisper CLI names its output after the input stem.
fn transcript_file_name(media: &Path) -> String {
    let stem = media
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transcript".to_string());
    format!("{stem}.json")
}

// Raw whisper JSON shape. A segment without `text` is malformed and fails
// parsing, which fails the whole job; there is no partial-caption output.

#[derive(Debug, Deserialize)]
struct RawTranscript {
    segments: Vec<RawSegment>,
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    start: f64,
    end: Option<f64>,
    text: String,
    #[serde(default)]
    words: Vec<RawWord>,
}

#[derive(Debug, Deserialize)]
struct RawWord {
    word: String,
    start: f64,
    end: f64,
}

/// Parse whisper JSON output into model segments.
pub fn parse_transcript(json: &str) -> CaplitResult<Vec<Segment>> {
    let raw: RawTranscript = serde_json::from_str(json)
        .map_err(|e| CaplitError::transcription(format!("Malformed transcript JSON: {e}")))?;

    Ok(raw
        .segments
        .into_iter()
        .map(|segment| Segment {
            start_secs: segment.start,
            end_secs: segment.end,
            text: segment.text.trim().to_string(),
            words: if segment.words.is_empty() {
                None
            } else {
                Some(
                    segment
                        .words
                        .into_iter()
                        .map(|word| Word {
                            start_secs: word.start,
                            end_secs: word.end,
                            text: word.word.trim().to_string(),
                        })
                        .collect(),
                )
            },
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_word_timing() {
        let json = r#"{
            "text": " hello world",
            "language": "en",
            "segments": [{
                "id": 0,
                "start": 0.0,
                "end": 1.2,
                "text": " hello world",
                "words": [
                    {"word": " hello", "start": 0.0, "end": 0.5, "probability": 0.98},
                    {"word": " world", "start": 0.5, "end": 1.1, "probability": 0.95}
                ]
            }]
        }"#;

        let segments = parse_transcript(json).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "hello world");
        let words = segments[0].words.as_ref().unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "hello");
        assert_eq!(words[1].end_secs, 1.1);
    }

    #[test]
    fn test_parse_without_word_timing() {
        let json = r#"{"segments": [{"start": 2.0, "end": 4.0, "text": " coarse only"}]}"#;
        let segments = parse_transcript(json).unwrap();
        assert_eq!(segments.len(), 1);
        assert!(segments[0].words.is_none());
        assert_eq!(segments[0].end_secs, Some(4.0));
    }

    #[test]
    fn test_parse_missing_end_is_tolerated() {
        let json = r#"{"segments": [{"start": 2.0, "end": null, "text": "tail"}]}"#;
        let segments = parse_transcript(json).unwrap();
        assert!(segments[0].end_secs.is_none());
    }

    #[test]
    fn test_parse_missing_text_is_fatal() {
        let json = r#"{"segments": [{"start": 0.0, "end": 1.0}]}"#;
        let err = parse_transcript(json).unwrap_err();
        assert!(err.to_string().contains("Malformed transcript"));
    }

    #[test]
    fn test_transcript_file_name_uses_stem() {
        assert_eq!(
            transcript_file_name(Path::new("/tmp/clip_42.mp4")),
            "clip_42.json"
        );
    }
}
