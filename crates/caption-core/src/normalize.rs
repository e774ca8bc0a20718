//! Timestamp normalization: transcript segments to caption events.
//!
//! # Algorithm
//!
//! 1. **Word path:** when a segment carries word-level timing, emit one
//!    event per word verbatim, flooring the duration at the 0.01 s minimum.
//! 2. **Fallback path:** when word timing is absent, whitespace-split the
//!    segment text into N tokens and synthesize N events that partition
//!    `[start, end]` into equal, gapless, non-overlapping sub-intervals.
//! 3. Segments whose text splits into zero tokens produce no events.
//!
//! The fallback guarantees full timing coverage even when the speech engine
//! produced only coarse segment bounds.

use caplit_caption_model::{CaptionEvent, Segment};

/// Span assumed for a segment whose end timestamp is missing.
pub const DEFAULT_SEGMENT_SECS: f64 = 2.0;

/// Flatten transcript segments into an ordered sequence of caption events,
/// one per spoken word.
///
/// Engine-supplied word timestamps are passed through without monotonicity
/// or overlap correction; only the duration floor and a non-negative start
/// clamp are applied.
pub fn normalize(segments: &[Segment]) -> Vec<CaptionEvent> {
    let mut events = Vec::new();

    for segment in segments {
        if segment.has_word_timing() {
            for word in segment.words.as_deref().unwrap_or_default() {
                // Duration is measured from the clamped start so the event
                // still ends at the engine-reported word end.
                let start = word.start_secs.max(0.0);
                events.push(CaptionEvent::clamped(
                    start,
                    word.end_secs - start,
                    word.text.trim(),
                ));
            }
        } else {
            synthesize_uniform(segment, &mut events);
        }
    }

    tracing::debug!(
        segments = segments.len(),
        events = events.len(),
        "Normalized transcript"
    );

    events
}

/// Uniformly split a segment's text across its time span.
fn synthesize_uniform(segment: &Segment, events: &mut Vec<CaptionEvent>) {
    let tokens: Vec<&str> = segment.text.split_whitespace().collect();
    if tokens.is_empty() {
        tracing::debug!(start_secs = segment.start_secs, "Skipping empty segment");
        return;
    }

    let start = segment.start_secs;
    let end = segment
        .end_secs
        .unwrap_or(segment.start_secs + DEFAULT_SEGMENT_SECS);
    let step = (end - start) / tokens.len() as f64;

    for (i, token) in tokens.iter().enumerate() {
        events.push(CaptionEvent::clamped(start + i as f64 * step, step, *token));
    }
}
