//! Caplit Caption Core
//!
//! Turns raw transcripts into a deterministic, gap-free overlay plan:
//! - **Normalization:** Segment/word timing to per-word caption events
//! - **Measurement:** Glyph metrics for highlight sizing
//! - **Overlay building:** Highlight + text primitive pairs per event
//! - **Composite planning:** Ordered, time-windowed draw instructions
//!
//! This crate is pure computation with no I/O and no engine dependencies.
//! All inputs are data; all outputs are data.

pub mod compositor;
pub mod measure;
pub mod normalize;
pub mod overlay;

pub use compositor::{plan_composite, CompositePlan, DrawOp};
pub use measure::{GlyphMetrics, GlyphMetricsConfig, TextExtent, TextMeasurer};
pub use normalize::normalize;
pub use overlay::{build_overlay_pairs, OverlayPrimitive, PrimitiveKind};
