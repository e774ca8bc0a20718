//! Caplit Speech
//!
//! Speech-to-text boundary:
//! - **Transcriber trait:** The engine seam, shared read-only across jobs
//! - **Whisper CLI backend:** JSON transcripts with word timestamps
//! - **Model selection:** Whisper size chosen once at startup

pub mod model;
pub mod transcriber;

pub use model::WhisperModel;
pub use transcriber::{parse_transcript, Transcriber, WhisperCli};
