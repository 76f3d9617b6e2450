//! TOML configuration file loading
//!
//! Supports `~/.config/yova/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct YovaConfigFile {
    /// Assistant identity
    #[serde(default)]
    pub assistant: AssistantFileConfig,

    /// Speech input/output
    #[serde(default)]
    pub speech: SpeechFileConfig,

    /// External information services
    #[serde(default)]
    pub services: ServicesFileConfig,

    /// Link opening
    #[serde(default)]
    pub browser: BrowserFileConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysFileConfig,
}

/// Assistant identity
#[derive(Debug, Default, Deserialize)]
pub struct AssistantFileConfig {
    /// Name the assistant answers with
    pub name: Option<String>,
    /// Who the assistant credits as its creator
    pub creator: Option<String>,
}

/// Speech configuration
#[derive(Debug, Default, Deserialize)]
pub struct SpeechFileConfig {
    /// Default locale tag (e.g. "en-US")
    pub language: Option<String>,
    /// Gap between paced utterances, in milliseconds
    pub pacing_ms: Option<u64>,
    /// "console" or "voice"
    pub backend: Option<String>,
    /// TTS model (e.g. "tts-1")
    pub tts_model: Option<String>,
    /// TTS voice (e.g. "alloy")
    pub tts_voice: Option<String>,
    /// TTS speed multiplier
    pub tts_speed: Option<f32>,
    /// STT model (e.g. "whisper-1")
    pub stt_model: Option<String>,
    /// Microphone listen window, in seconds
    pub listen_secs: Option<u64>,
}

/// External service endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ServicesFileConfig {
    pub news_country: Option<String>,
    pub news_url: Option<String>,
    pub wikipedia_url: Option<String>,
    pub translate_url: Option<String>,
    pub weather_url: Option<String>,
    /// Empty string disables geolocation
    pub geolocation_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Link opening
#[derive(Debug, Default, Deserialize)]
pub struct BrowserFileConfig {
    /// Open URLs in the system browser
    pub open_links: Option<bool>,
}

/// API keys configuration
#[derive(Debug, Default, Deserialize)]
pub struct ApiKeysFileConfig {
    pub openai: Option<String>,
    pub news: Option<String>,
}

/// Load the TOML config file from the standard path
///
/// Returns `YovaConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> YovaConfigFile {
    config_file_path().map_or_else(YovaConfigFile::default, |path| load_config_file_from(&path))
}

/// Load a TOML config file from an explicit path
///
/// Missing or invalid files yield defaults.
pub fn load_config_file_from(path: &Path) -> YovaConfigFile {
    if !path.exists() {
        return YovaConfigFile::default();
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(Error::from)
        .and_then(|content| parse_config_file(&content));

    match parsed {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded config file");
            config
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to load config file, using defaults"
            );
            YovaConfigFile::default()
        }
    }
}

/// Parse config file contents
///
/// # Errors
///
/// Returns [`Error::Toml`] if the contents are not valid config TOML
pub fn parse_config_file(content: &str) -> Result<YovaConfigFile> {
    Ok(toml::from_str(content)?)
}

/// Return the config file path: `~/.config/yova/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("yova").join("config.toml"))
}
