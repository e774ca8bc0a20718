//! Job manager: bounded concurrency, atomic ids, scoped resources.
//!
//! The manager bridges an asynchronous front end to the synchronous,
//! CPU-bound render pipeline. The coordinator task only does I/O (download
//! into the temp input, awaiting results); rendering runs on blocking
//! worker threads gated by a semaphore, default two wide. Additional
//! submissions queue on the semaphore.
//!
//! Per job: `Received → Downloaded → Rendering → Completed | Failed`. No
//! retries, no cancellation, no cross-job ordering guarantees.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::io::AsyncRead;
use tokio::sync::Semaphore;

use caplit_common::error::{CaplitError, CaplitResult};
use caplit_render_engine::Renderer;

use crate::temp::TempInput;

/// Default number of concurrent render workers.
pub const DEFAULT_WORKERS: usize = 2;

/// Lifecycle states of a single job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Received,
    Downloaded,
    Rendering,
    Completed,
    Failed,
}

/// A finished job and its artifact.
#[derive(Debug, Clone)]
pub struct CompletedJob {
    /// The job's process-unique identifier.
    pub id: u64,
    /// Absolute path of the rendered artifact.
    pub artifact: PathBuf,
}

/// Owns the worker pool and the job id sequence.
pub struct JobManager {
    renderer: Arc<dyn Renderer>,
    permits: Arc<Semaphore>,
    next_job_id: AtomicU64,
}

impl JobManager {
    /// Create a manager over `renderer` with a fixed worker bound.
    pub fn new(renderer: Arc<dyn Renderer>, workers: usize) -> Self {
        Self {
            renderer,
            permits: Arc::new(Semaphore::new(workers.max(1))),
            next_job_id: AtomicU64::new(1),
        }
    }

    /// Create a manager with the default worker bound.
    pub fn with_default_workers(renderer: Arc<dyn Renderer>) -> Self {
        Self::new(renderer, DEFAULT_WORKERS)
    }

    /// Process one submitted video end to end.
    ///
    /// `origin` identifies the submitting chat/session for log correlation.
    /// The payload is streamed into a job-scoped temp file which is deleted
    /// on every exit path, including a panicking render worker.
    pub async fn submit<R>(&self, origin: &str, payload: R) -> CaplitResult<CompletedJob>
    where
        R: AsyncRead + Unpin + Send,
    {
        let job_id = self.next_job_id.fetch_add(1, Ordering::SeqCst);
        tracing::info!(job_id, origin, state = ?JobState::Received, "Job accepted");

        let result = self.run_job(job_id, origin, payload).await;

        match &result {
            Ok(job) => tracing::info!(
                job_id,
                origin,
                state = ?JobState::Completed,
                artifact = %job.artifact.display(),
                "Job finished"
            ),
            Err(error) => tracing::error!(
                job_id,
                origin,
                state = ?JobState::Failed,
                %error,
                "Job failed"
            ),
        }

        result
    }

    async fn run_job<R>(&self, job_id: u64, origin: &str, payload: R) -> CaplitResult<CompletedJob>
    where
        R: AsyncRead + Unpin + Send,
    {
        // The guard lives for the whole job; dropping it removes the file.
        let input = TempInput::create()?;

        let bytes = input.fill(payload).await?;
        tracing::info!(job_id, origin, bytes, state = ?JobState::Downloaded, "Input stored");

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| CaplitError::job("Worker pool is shut down"))?;
        tracing::info!(job_id, origin, state = ?JobState::Rendering, "Render started");

        let renderer = Arc::clone(&self.renderer);
        let input_path = input.path().to_path_buf();
        let artifact = tokio::task::spawn_blocking(move || renderer.render(&input_path, job_id))
            .await
            .map_err(|e| CaplitError::job(format!("Render worker panicked: {e}")))??;

        Ok(CompletedJob {
            id: job_id,
            artifact,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    /// Renderer double that records inputs and can be told to fail or panic.
    struct FakeRenderer {
        mode: Mode,
        active: AtomicUsize,
        max_active: AtomicUsize,
        seen_inputs: Mutex<Vec<PathBuf>>,
    }

    enum Mode {
        Succeed,
        Fail,
        Panic,
    }

    impl FakeRenderer {
        fn new(mode: Mode) -> Arc<Self> {
            Arc::new(Self {
                mode,
                active: AtomicUsize::new(0),
                max_active: AtomicUsize::new(0),
                seen_inputs: Mutex::new(Vec::new()),
            })
        }
    }

    impl Renderer for FakeRenderer {
        fn render(&self, input: &Path, job_id: u64) -> CaplitResult<PathBuf> {
            let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(active, Ordering::SeqCst);
            self.seen_inputs.lock().unwrap().push(input.to_path_buf());

            // Hold the slot long enough for submissions to pile up.
            std::thread::sleep(std::time::Duration::from_millis(30));
            self.active.fetch_sub(1, Ordering::SeqCst);

            match self.mode {
                Mode::Succeed => Ok(PathBuf::from(format!("/out/video_{job_id}.mp4"))),
                Mode::Fail => Err(CaplitError::render("encode blew up")),
                Mode::Panic => panic!("worker crashed"),
            }
        }
    }

    #[tokio::test]
    async fn test_successful_job_returns_artifact() {
        let manager = JobManager::with_default_workers(FakeRenderer::new(Mode::Succeed));
        let job = manager.submit("chat-1", &b"payload"[..]).await.unwrap();
        assert_eq!(job.id, 1);
        assert_eq!(job.artifact, PathBuf::from("/out/video_1.mp4"));
    }

    #[tokio::test]
    async fn test_ids_strictly_increase_under_concurrency() {
        let renderer = FakeRenderer::new(Mode::Succeed);
        let manager = Arc::new(JobManager::new(renderer, 2));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let manager = Arc::clone(&manager);
            handles.push(tokio::spawn(async move {
                manager.submit("chat-1", &b"x"[..]).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8, "job ids must be pairwise distinct");
        assert_eq!(ids, (1..=8).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_worker_bound_is_respected() {
        let renderer = FakeRenderer::new(Mode::Succeed);
        let manager = Arc::new(JobManager::new(Arc::clone(&renderer) as Arc<dyn Renderer>, 2));

        let mut handles = Vec::new();
        for _ in 0..6 {
            let manager = Arc::clone(&manager);
            handles.push(tokio::spawn(async move {
                manager.submit("chat-1", &b"x"[..]).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(
            renderer.max_active.load(Ordering::SeqCst) <= 2,
            "render concurrency exceeded the worker bound"
        );
    }

    #[tokio::test]
    async fn test_temp_input_removed_after_success() {
        let renderer = FakeRenderer::new(Mode::Succeed);
        let manager = JobManager::new(Arc::clone(&renderer) as Arc<dyn Renderer>, 2);

        manager.submit("chat-1", &b"x"[..]).await.unwrap();

        let seen = renderer.seen_inputs.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(!seen[0].exists(), "temp input must not outlive the job");
    }

    #[tokio::test]
    async fn test_temp_input_removed_after_failure() {
        let renderer = FakeRenderer::new(Mode::Fail);
        let manager = JobManager::new(Arc::clone(&renderer) as Arc<dyn Renderer>, 2);

        let err = manager.submit("chat-1", &b"x"[..]).await.unwrap_err();
        assert!(err.to_string().contains("encode blew up"));

        let seen = renderer.seen_inputs.lock().unwrap();
        assert!(!seen[0].exists(), "temp input must not survive a failed job");
    }

    #[tokio::test]
    async fn test_temp_input_removed_after_worker_panic() {
        let renderer = FakeRenderer::new(Mode::Panic);
        let manager = JobManager::new(Arc::clone(&renderer) as Arc<dyn Renderer>, 2);

        let err = manager.submit("chat-1", &b"x"[..]).await.unwrap_err();
        assert!(err.to_string().contains("panicked"));

        let seen = renderer.seen_inputs.lock().unwrap();
        assert!(!seen[0].exists());
    }

    #[tokio::test]
    async fn test_download_failure_aborts_before_rendering() {
        struct BrokenPayload;
        impl AsyncRead for BrokenPayload {
            fn poll_read(
                self: std::pin::Pin<&mut Self>,
                _cx: &mut std::task::Context<'_>,
                _buf: &mut tokio::io::ReadBuf<'_>,
            ) -> std::task::Poll<std::io::Result<()>> {
                std::task::Poll::Ready(Err(std::io::Error::other("transport dropped")))
            }
        }

        let renderer = FakeRenderer::new(Mode::Succeed);
        let manager = JobManager::new(Arc::clone(&renderer) as Arc<dyn Renderer>, 2);

        let err = manager.submit("chat-1", BrokenPayload).await.unwrap_err();
        assert!(err.to_string().contains("transport dropped"));
        assert!(
            renderer.seen_inputs.lock().unwrap().is_empty(),
            "renderer must not run when the download fails"
        );
    }
}
