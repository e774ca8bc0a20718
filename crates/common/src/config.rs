//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where rendered videos are written.
    pub output_dir: PathBuf,

    /// Render settings.
    pub render: RenderSettings,

    /// Speech-to-text settings.
    pub speech: SpeechSettings,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Rendering parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Number of concurrent render workers.
    pub workers: usize,

    /// Path to the caption font file.
    pub font_path: PathBuf,

    /// Caption font size in pixels.
    pub font_size_px: u32,

    /// Word text color (ffmpeg color name or 0xRRGGBB).
    pub text_color: String,

    /// Highlight box color behind the current word.
    pub highlight_color: String,
}

/// Speech recognition parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSettings {
    /// Whisper model size name (tiny, base, small, medium, large).
    pub model: String,

    /// Language hint (ISO 639-1 code, e.g., "en"). None = auto-detect.
    pub language: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "caplit=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output_videos"),
            render: RenderSettings::default(),
            speech: SpeechSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            workers: 2,
            font_path: PathBuf::from("fonts/Montserrat-ExtraBold.ttf"),
            font_size_px: 60,
            text_color: "white".to_string(),
            highlight_color: "blue".to_string(),
        }
    }
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            model: "small".to_string(),
            language: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults,
    /// then apply environment overrides. Called once at startup.
    pub fn load() -> Self {
        let mut config = Self::load_file();
        config.apply_env_overrides();
        config
    }

    fn load_file() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Environment variables take precedence over the config file.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("CAPLIT_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Ok(model) = std::env::var("CAPLIT_WHISPER_MODEL") {
            self.speech.model = model;
        }
        if let Ok(workers) = std::env::var("CAPLIT_WORKERS") {
            match workers.parse::<usize>() {
                Ok(n) if n > 0 => self.render.workers = n,
                _ => tracing::warn!("Ignoring invalid CAPLIT_WORKERS value: {workers}"),
            }
        }
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("caplit").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.render.workers, 2);
        assert_eq!(config.render.font_size_px, 60);
        assert_eq!(config.speech.model, "small");
        assert_eq!(config.output_dir, PathBuf::from("output_videos"));
    }

    #[test]
    fn test_roundtrip_serde() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.render.workers, config.render.workers);
        assert_eq!(parsed.speech.model, config.speech.model);
    }
}
