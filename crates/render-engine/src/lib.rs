//! Caplit Render Engine
//!
//! Offline rendering pipeline that composites the caption overlay plan onto
//! the source video and encodes the final artifact.
//!
//! # Pipeline Architecture
//!
//! ```text
//! input.mp4 ──► probe (fps) ──► transcribe ──► normalize ──► overlay pairs
//!                                                                 │
//!                                                                 ▼
//!                                                          composite plan
//!                                                                 │
//!              hflip + drawbox/drawtext filter chain ◄────────────┘
//!                                │
//!                                ▼
//!                     encode (libx264/aac)
//!                                │
//!                                ▼
//!                output_dir/video_{job}_{stamp}.mp4
//! ```

pub mod filter;
pub mod pipeline;
pub mod probe;

pub use filter::{build_filter_chain, FilterStyle};
pub use pipeline::{RenderPipeline, Renderer};
pub use probe::{command_exists, probe_stream, StreamInfo};
