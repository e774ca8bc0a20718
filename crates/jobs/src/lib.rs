//! Caplit Jobs
//!
//! End-to-end processing of submitted videos:
//! - **JobManager:** Bounded worker pool over the render pipeline
//! - **Job ids:** Atomic, strictly increasing, never reused
//! - **Temp inputs:** Scoped per-job files, deleted on every exit path
//! - **Transport boundary:** Payload acceptance rules for inbound videos

pub mod manager;
pub mod temp;
pub mod transport;

pub use manager::{CompletedJob, JobManager, JobState, DEFAULT_WORKERS};
pub use temp::TempInput;
pub use transport::{accepts, guess_mime, payload_for_file, Payload};
