//! Overlay primitive construction.
//!
//! Every caption event expands into exactly two renderable primitives: a
//! filled highlight box sized to the measured word, and the word itself.
//! Both share the event's timing and render centered at the fixed
//! center/center screen anchor (per-word positioning is out of scope).

use caplit_caption_model::CaptionEvent;

use crate::measure::TextMeasurer;

/// Kind of renderable overlay element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Filled box drawn behind the word.
    Highlight,
    /// The word glyphs themselves.
    Text,
}

/// A single renderable visual element with its own visibility window.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPrimitive {
    pub kind: PrimitiveKind,

    /// Width of the element's bounding box in pixels.
    pub width_px: u32,

    /// Height of the element's bounding box in pixels.
    pub height_px: u32,

    /// Start of the visibility window in seconds.
    pub start_secs: f64,

    /// Length of the visibility window in seconds.
    pub duration_secs: f64,

    /// The word this primitive belongs to.
    pub text: String,
}

impl OverlayPrimitive {
    /// End of the half-open visibility window.
    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.duration_secs
    }

    /// Whether this primitive is visible at time `t` (half-open window).
    pub fn visible_at(&self, t: f64) -> bool {
        t >= self.start_secs && t < self.end_secs()
    }
}

/// Expand caption events into highlight/text primitive pairs.
///
/// Output order: per event, highlight immediately followed by text, events
/// in input order. The highlight bounds are the measured bounds of the
/// rendered word, so the box covers the word exactly regardless of glyph
/// widths.
pub fn build_overlay_pairs(
    events: &[CaptionEvent],
    measurer: &dyn TextMeasurer,
) -> Vec<OverlayPrimitive> {
    let mut primitives = Vec::with_capacity(events.len() * 2);

    for event in events {
        let extent = measurer.measure(&event.text);

        for kind in [PrimitiveKind::Highlight, PrimitiveKind::Text] {
            primitives.push(OverlayPrimitive {
                kind,
                width_px: extent.width_px,
                height_px: extent.height_px,
                start_secs: event.start_secs,
                duration_secs: event.duration_secs,
                text: event.text.clone(),
            });
        }
    }

    primitives
}
