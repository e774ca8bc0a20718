//! Transcript segment types.
//!
//! A [`Segment`] is a contiguous span of transcribed speech as returned by
//! the speech engine. Word-level sub-timing is optional: engines configured
//! without word timestamps (or older engine versions) return segment
//! granularity only, and downstream normalization synthesizes per-word
//! timing from the segment bounds.

use serde::{Deserialize, Serialize};

/// A contiguous span of transcribed speech with timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds from the beginning of the media.
    pub start_secs: f64,

    /// End time in seconds. Engines occasionally omit the end of the last
    /// segment; normalization falls back to a fixed default span.
    pub end_secs: Option<f64>,

    /// Transcribed text for the whole segment.
    pub text: String,

    /// Word-level timing, when the engine produced it.
    pub words: Option<Vec<Word>>,
}

/// A single word with engine-reported timing.
///
/// `start_secs < end_secs` is NOT guaranteed by upstream engines; zero and
/// negative spans occur in practice and are corrected during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Start time in seconds.
    pub start_secs: f64,
    /// End time in seconds.
    pub end_secs: f64,
    /// The word text, trimmed.
    pub text: String,
}

impl Segment {
    /// Whether this segment carries usable word-level timing.
    pub fn has_word_timing(&self) -> bool {
        self.words.as_ref().is_some_and(|words| !words.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_timing_presence() {
        let mut segment = Segment {
            start_secs: 0.0,
            end_secs: Some(2.0),
            text: "hello world".to_string(),
            words: None,
        };
        assert!(!segment.has_word_timing());

        segment.words = Some(vec![]);
        assert!(!segment.has_word_timing());

        segment.words = Some(vec![Word {
            start_secs: 0.0,
            end_secs: 0.5,
            text: "hello".to_string(),
        }]);
        assert!(segment.has_word_timing());
    }

    #[test]
    fn test_segment_serde() {
        let json = r#"{"start_secs":1.5,"end_secs":null,"text":"ok","words":null}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(segment.start_secs, 1.5);
        assert!(segment.end_secs.is_none());
        assert!(segment.words.is_none());
    }
}
