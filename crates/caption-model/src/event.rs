//! Normalized caption events.

use serde::{Deserialize, Serialize};

/// Hard floor for caption event durations in seconds.
///
/// Zero or negative durations would produce overlays that are never visible
/// (or rejected by the encoder), so every event is clamped to at least this.
pub const MIN_EVENT_SECS: f64 = 0.01;

/// The normalized, word-granular unit of timed caption content.
///
/// Exactly one spoken word, either taken verbatim from engine word timing or
/// synthesized by uniform segment splitting. `start_secs >= 0` and
/// `duration_secs >= MIN_EVENT_SECS` always hold after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEvent {
    /// Start time in seconds.
    pub start_secs: f64,

    /// Visible duration in seconds.
    pub duration_secs: f64,

    /// The word shown on screen.
    pub text: String,
}

impl CaptionEvent {
    /// Create an event, clamping the start to zero and the duration to the
    /// minimum floor.
    pub fn clamped(start_secs: f64, duration_secs: f64, text: impl Into<String>) -> Self {
        Self {
            start_secs: start_secs.max(0.0),
            duration_secs: duration_secs.max(MIN_EVENT_SECS),
            text: text.into(),
        }
    }

    /// End of the half-open visibility window `[start, start + duration)`.
    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.duration_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_floors_duration() {
        let event = CaptionEvent::clamped(1.0, 0.0, "ok");
        assert_eq!(event.duration_secs, MIN_EVENT_SECS);

        let event = CaptionEvent::clamped(1.0, -0.3, "ok");
        assert_eq!(event.duration_secs, MIN_EVENT_SECS);
    }

    #[test]
    fn test_clamped_floors_start() {
        let event = CaptionEvent::clamped(-0.5, 1.0, "ok");
        assert_eq!(event.start_secs, 0.0);
    }

    #[test]
    fn test_end_secs() {
        let event = CaptionEvent::clamped(1.5, 0.25, "ok");
        assert!((event.end_secs() - 1.75).abs() < 1e-12);
    }
}
