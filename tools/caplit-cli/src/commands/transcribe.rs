//! Transcribe a video and print the timed segments.

use std::path::PathBuf;

use caplit_common::config::AppConfig;
use caplit_speech::{Transcriber, WhisperCli, WhisperModel};

pub fn run(video: PathBuf, model: Option<String>, json: bool) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let model = WhisperModel::parse(&model.unwrap_or(config.speech.model))?;

    let transcriber = WhisperCli::new(model, config.speech.language);
    let segments = transcriber.transcribe(&video)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
        return Ok(());
    }

    println!("Transcript of {} ({} segments):", video.display(), segments.len());
    for segment in &segments {
        let end = segment
            .end_secs
            .map(|end| format!("{end:7.2}"))
            .unwrap_or_else(|| "      ?".to_string());
        println!("  [{:7.2} -> {end}] {}", segment.start_secs, segment.text);
        if let Some(words) = &segment.words {
            for word in words {
                println!(
                    "      {:7.2} -> {:7.2}  {}",
                    word.start_secs, word.end_secs, word.text
                );
            }
        }
    }

    Ok(())
}
