//! Caplit Caption Model
//!
//! Defines the core data contracts for caption processing:
//! - **Segments:** Transcribed speech spans with optional word-level timing
//! - **Caption events:** Normalized per-word units driving the overlay
//!
//! All timestamps are seconds from the start of the source media. This crate
//! is pure data with no I/O and no engine dependencies.

pub mod event;
pub mod segment;

pub use event::*;
pub use segment::*;
