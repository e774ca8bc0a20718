//! Render captioned copies of local video files.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;

use caplit_common::config::AppConfig;
use caplit_jobs::{accepts, payload_for_file, JobManager};
use caplit_render_engine::RenderPipeline;
use caplit_speech::{WhisperCli, WhisperModel};

pub async fn run(
    videos: Vec<PathBuf>,
    output: Option<PathBuf>,
    workers: Option<usize>,
    model: Option<String>,
    language: Option<String>,
) -> anyhow::Result<()> {
    let mut config = AppConfig::load();
    if let Some(output) = output {
        config.output_dir = output;
    }
    if let Some(workers) = workers {
        config.render.workers = workers.max(1);
    }
    if let Some(model) = model {
        config.speech.model = model;
    }
    if let Some(language) = language {
        config.speech.language = Some(language);
    }

    if !RenderPipeline::is_available() {
        anyhow::bail!("ffmpeg not found in PATH; run `caplit check`");
    }

    let model = WhisperModel::parse(&config.speech.model)?;
    let transcriber = Arc::new(WhisperCli::new(model, config.speech.language.clone()));
    let pipeline = Arc::new(RenderPipeline::new(&config, transcriber)?);
    let manager = Arc::new(JobManager::new(pipeline, config.render.workers));

    // The CLI is its own transport: local files are native video payloads
    // and go through the same acceptance rule as inbound chat attachments.
    let mut submitted = 0usize;
    let mut tasks = JoinSet::new();
    for video in videos {
        let name = video.display().to_string();
        if !accepts(&payload_for_file(&name)) {
            tracing::debug!(video = %name, "Ignoring non-video input");
            continue;
        }

        submitted += 1;
        let manager = Arc::clone(&manager);
        tasks.spawn(async move {
            let file = match tokio::fs::File::open(&video).await {
                Ok(file) => file,
                Err(e) => return (name, Err(anyhow::anyhow!("cannot open input: {e}"))),
            };
            let result = manager
                .submit(&name, file)
                .await
                .map_err(anyhow::Error::from);
            (name, result)
        });
    }

    if submitted == 0 {
        println!("No video inputs recognized.");
        return Ok(());
    }

    let mut failures = 0usize;
    while let Some(joined) = tasks.join_next().await {
        let (name, result) = joined?;
        match result {
            Ok(job) => println!("[OK] {name} -> {}", job.artifact.display()),
            Err(e) => {
                failures += 1;
                println!("[FAIL] {name}: {e}");
            }
        }
    }

    println!(
        "\n{} of {submitted} video(s) rendered.",
        submitted - failures
    );
    if failures == submitted {
        anyhow::bail!("all render jobs failed");
    }
    Ok(())
}
