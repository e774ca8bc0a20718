//! The end-to-end render pipeline.
//!
//! One call per job: transcribe the source, normalize the transcript into
//! caption events, plan the overlay composite, and encode the mirrored,
//! captioned result into a uniquely named artifact. Failures anywhere are
//! terminal for the job; nothing is retried and there is no partial output.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use chrono::{DateTime, Local};

use caplit_caption_core::{build_overlay_pairs, normalize, plan_composite, GlyphMetrics};
use caplit_common::config::AppConfig;
use caplit_common::error::{CaplitError, CaplitResult};
use caplit_speech::Transcriber;

use crate::filter::{build_filter_chain, FilterStyle};
use crate::probe::probe_stream;

/// Trait for render backends.
///
/// The job manager drives rendering through this seam so it can be tested
/// with a substitute implementation.
pub trait Renderer: Send + Sync {
    /// Render `input` and return the absolute path of the encoded artifact.
    fn render(&self, input: &Path, job_id: u64) -> CaplitResult<PathBuf>;
}

/// ffmpeg-backed caption render pipeline.
///
/// Holds the shared transcription handle explicitly; the engine is an
/// expensive, read-only resource shared by all workers, never ambient
/// global state.
pub struct RenderPipeline {
    output_dir: PathBuf,
    style: FilterStyle,
    transcriber: Arc<dyn Transcriber>,
    measurer: GlyphMetrics,
}

impl RenderPipeline {
    /// Build a pipeline from configuration, creating the output directory
    /// once. Artifacts accumulate there and are never cleaned up.
    pub fn new(config: &AppConfig, transcriber: Arc<dyn Transcriber>) -> CaplitResult<Self> {
        std::fs::create_dir_all(&config.output_dir)?;
        tracing::info!(output_dir = %config.output_dir.display(), "Output directory ready");

        Ok(Self {
            output_dir: config.output_dir.clone(),
            style: FilterStyle {
                font_path: config.render.font_path.clone(),
                font_size_px: config.render.font_size_px,
                text_color: config.render.text_color.clone(),
                highlight_color: config.render.highlight_color.clone(),
            },
            transcriber,
            measurer: GlyphMetrics::with_font_size(config.render.font_size_px),
        })
    }

    /// Whether the encoder backend is present on this system.
    pub fn is_available() -> bool {
        crate::probe::command_exists("ffmpeg")
    }

    fn run_ffmpeg(&self, args: &[String]) -> CaplitResult<()> {
        tracing::debug!(?args, "Running ffmpeg");
        let mut child = Command::new("ffmpeg")
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CaplitError::render(format!("Failed to start ffmpeg: {e}")))?;

        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| CaplitError::render("Failed to capture ffmpeg stderr"))?;

        // Drain stderr concurrently to avoid ffmpeg blocking on a full pipe.
        let stderr_task = std::thread::spawn(move || -> String {
            let mut reader = std::io::BufReader::new(stderr);
            let mut output = String::new();
            match reader.read_to_string(&mut output) {
                Ok(_) => output,
                Err(err) => format!("<failed to read ffmpeg stderr: {err}>"),
            }
        });

        let status = child
            .wait()
            .map_err(|e| CaplitError::render(format!("Failed to wait on ffmpeg: {e}")))?;

        let stderr_output = stderr_task
            .join()
            .unwrap_or_else(|_| "<failed to join stderr reader>".to_string());

        if !status.success() {
            return Err(CaplitError::render(format!(
                "ffmpeg encode failed (status {}): {}",
                status,
                stderr_output.trim()
            )));
        }

        Ok(())
    }
}

impl Renderer for RenderPipeline {
    fn render(&self, input: &Path, job_id: u64) -> CaplitResult<PathBuf> {
        let started = std::time::Instant::now();

        if !input.exists() {
            return Err(CaplitError::FileNotFound {
                path: input.to_path_buf(),
            });
        }

        let stream = probe_stream(input);
        match &stream {
            Some(info) => tracing::info!(
                job_id,
                width = info.width,
                height = info.height,
                frame_rate = %info.frame_rate,
                "Probed source stream"
            ),
            None => tracing::warn!(
                job_id,
                input = %input.display(),
                "Could not probe source stream; ffmpeg will keep input timing"
            ),
        }

        let segments = self.transcriber.transcribe(input)?;
        let events = normalize(&segments);
        tracing::info!(
            job_id,
            segments = segments.len(),
            events = events.len(),
            "Caption events ready"
        );

        let plan = plan_composite(build_overlay_pairs(&events, &self.measurer));
        let filter_chain = build_filter_chain(&plan, &self.style);

        let output_path = self.output_dir.join(artifact_file_name(job_id, Local::now()));

        let mut args = vec![
            "-y".to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-vf".to_string(),
            filter_chain,
        ];

        // Carry the probed rate through so output fps matches input exactly.
        if let Some(info) = &stream {
            args.push("-r".to_string());
            args.push(info.frame_rate.clone());
        }

        args.extend(
            [
                "-c:v", "libx264", "-preset", "medium", "-pix_fmt", "yuv420p", "-c:a", "aac",
            ]
            .map(String::from),
        );
        args.push(output_path.display().to_string());

        self.run_ffmpeg(&args)?;

        let artifact = std::fs::canonicalize(&output_path)?;
        tracing::info!(
            job_id,
            artifact = %artifact.display(),
            elapsed_secs = started.elapsed().as_secs_f64(),
            "Render finished"
        );
        Ok(artifact)
    }
}

/// Artifact file name: job id plus wall-clock stamp.
///
/// The wall clock alone is not collision-free under concurrency; the job id
/// component makes names unique for the lifetime of the process.
fn artifact_file_name(job_id: u64, now: DateTime<Local>) -> String {
    format!("video_{job_id}_{}.mp4", now.format("%Y%m%d_%H%M%S"))
}
