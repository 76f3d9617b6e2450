//! Configuration management for YoVa
//!
//! Every setting resolves as env > TOML file > default.

pub mod file;

use std::time::Duration;

use file::YovaConfigFile;

/// Assistant configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Assistant identity
    pub assistant: AssistantConfig,

    /// Speech input/output
    pub speech: SpeechConfig,

    /// External information services
    pub services: ServicesConfig,

    /// Link opening
    pub browser: BrowserConfig,

    /// API keys
    pub api_keys: ApiKeys,
}

/// Assistant identity
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Name the assistant answers with
    pub name: String,
    /// Who the assistant credits as its creator
    pub creator: String,
}

/// Which speech device to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechBackend {
    /// Print utterances to the terminal
    Console,
    /// Synthesize and play through the speakers (`audio` feature)
    Voice,
}

impl SpeechBackend {
    /// Parse a backend name, falling back to console
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "voice" | "audio" | "tts" => Self::Voice,
            _ => Self::Console,
        }
    }
}

/// Speech configuration
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// Default locale tag for utterances
    pub language: String,

    /// Minimum gap between paced utterances (news, fact recall, help)
    pub pacing: Duration,

    /// Output device
    pub backend: SpeechBackend,

    /// TTS model (e.g. "tts-1")
    pub tts_model: String,

    /// TTS voice identifier
    pub tts_voice: String,

    /// TTS speed multiplier (0.25 to 4.0)
    pub tts_speed: f32,

    /// STT model (e.g. "whisper-1")
    pub stt_model: String,

    /// How long the microphone listens per capture
    pub listen_window: Duration,
}

/// External service configuration
#[derive(Debug, Clone)]
pub struct ServicesConfig {
    /// NewsAPI key
    pub news_api_key: Option<String>,
    /// Country code for headlines
    pub news_country: String,
    /// NewsAPI base URL
    pub news_url: String,
    /// Wikipedia base URL
    pub wikipedia_url: String,
    /// MyMemory base URL
    pub translate_url: String,
    /// wttr.in base URL
    pub weather_url: String,
    /// ip-api base URL; `None` disables geolocation
    pub geolocation_url: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            news_country: "us".to_string(),
            news_url: "https://newsapi.org".to_string(),
            wikipedia_url: "https://en.wikipedia.org".to_string(),
            translate_url: "https://api.mymemory.translated.net".to_string(),
            weather_url: "https://wttr.in".to_string(),
            geolocation_url: Some("http://ip-api.com".to_string()),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Link opening configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Open URLs in the system browser (otherwise only log them)
    pub open_links: bool,
}

/// API keys for external services
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// `OpenAI` API key (for Whisper and TTS)
    pub openai: Option<String>,
}

impl Config {
    /// Load configuration from the environment and the config file
    #[must_use]
    pub fn load() -> Self {
        let fc = file::load_config_file();
        Self::from_sources(fc, |key| std::env::var(key).ok())
    }

    /// Resolve configuration from a parsed file and an environment lookup
    #[must_use]
    pub fn from_sources(fc: YovaConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| env(key).map(|v| v == "1" || v.eq_ignore_ascii_case("true"));
        let number = |key: &str| env(key).and_then(|v| v.trim().parse::<u64>().ok());

        let assistant = AssistantConfig {
            name: env("YOVA_NAME")
                .or(fc.assistant.name)
                .unwrap_or_else(|| "YoVa".to_string()),
            creator: env("YOVA_CREATOR")
                .or(fc.assistant.creator)
                .unwrap_or_else(|| "Aaqib Sir".to_string()),
        };

        let default_backend = if cfg!(feature = "audio") { "voice" } else { "console" };
        let speech = SpeechConfig {
            language: env("YOVA_LANGUAGE")
                .or(fc.speech.language)
                .unwrap_or_else(|| "hi-IN".to_string()),
            pacing: Duration::from_millis(
                number("YOVA_PACING_MS")
                    .or(fc.speech.pacing_ms)
                    .unwrap_or(2500),
            ),
            backend: SpeechBackend::parse(
                &env("YOVA_SPEECH_BACKEND")
                    .or(fc.speech.backend)
                    .unwrap_or_else(|| default_backend.to_string()),
            ),
            tts_model: env("YOVA_TTS_MODEL")
                .or(fc.speech.tts_model)
                .unwrap_or_else(|| "tts-1".to_string()),
            tts_voice: env("YOVA_TTS_VOICE")
                .or(fc.speech.tts_voice)
                .unwrap_or_else(|| "alloy".to_string()),
            tts_speed: env("YOVA_TTS_SPEED")
                .and_then(|v| v.trim().parse().ok())
                .or(fc.speech.tts_speed)
                .unwrap_or(1.0),
            stt_model: env("YOVA_STT_MODEL")
                .or(fc.speech.stt_model)
                .unwrap_or_else(|| "whisper-1".to_string()),
            listen_window: Duration::from_secs(
                number("YOVA_LISTEN_SECS")
                    .or(fc.speech.listen_secs)
                    .unwrap_or(5),
            ),
        };

        let defaults = ServicesConfig::default();
        let services = ServicesConfig {
            news_api_key: env("NEWS_API_KEY").or(fc.api_keys.news),
            news_country: env("YOVA_NEWS_COUNTRY")
                .or(fc.services.news_country)
                .unwrap_or(defaults.news_country),
            news_url: env("YOVA_NEWS_URL")
                .or(fc.services.news_url)
                .unwrap_or(defaults.news_url),
            wikipedia_url: env("YOVA_WIKIPEDIA_URL")
                .or(fc.services.wikipedia_url)
                .unwrap_or(defaults.wikipedia_url),
            translate_url: env("YOVA_TRANSLATE_URL")
                .or(fc.services.translate_url)
                .unwrap_or(defaults.translate_url),
            weather_url: env("YOVA_WEATHER_URL")
                .or(fc.services.weather_url)
                .unwrap_or(defaults.weather_url),
            geolocation_url: match env("YOVA_GEOLOCATION_URL").or(fc.services.geolocation_url) {
                Some(url) if url.trim().is_empty() => None,
                Some(url) => Some(url),
                None => defaults.geolocation_url,
            },
            timeout: number("YOVA_HTTP_TIMEOUT")
                .or(fc.services.timeout_secs)
                .map_or(defaults.timeout, Duration::from_secs),
        };

        let browser = BrowserConfig {
            open_links: flag("YOVA_OPEN_LINKS")
                .or(fc.browser.open_links)
                .unwrap_or(true),
        };

        let api_keys = ApiKeys {
            openai: env("OPENAI_API_KEY").or(fc.api_keys.openai),
        };

        Self {
            assistant,
            speech,
            services,
            browser,
            api_keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_sources(YovaConfigFile::default(), env_from(&[]));
        assert_eq!(config.assistant.name, "YoVa");
        assert_eq!(config.speech.language, "hi-IN");
        assert_eq!(config.speech.pacing, Duration::from_millis(2500));
        assert_eq!(config.services.news_country, "us");
        assert!(config.services.geolocation_url.is_some());
        assert!(config.browser.open_links);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut fc = YovaConfigFile::default();
        fc.speech.language = Some("fr-FR".to_string());
        fc.speech.pacing_ms = Some(1000);

        let config = Config::from_sources(
            fc,
            env_from(&[("YOVA_LANGUAGE", "en-US"), ("YOVA_OPEN_LINKS", "false")]),
        );

        assert_eq!(config.speech.language, "en-US");
        assert_eq!(config.speech.pacing, Duration::from_millis(1000));
        assert!(!config.browser.open_links);
    }

    #[test]
    fn test_empty_geolocation_url_disables() {
        let config = Config::from_sources(
            YovaConfigFile::default(),
            env_from(&[("YOVA_GEOLOCATION_URL", "")]),
        );
        assert!(config.services.geolocation_url.is_none());
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(SpeechBackend::parse("Voice"), SpeechBackend::Voice);
        assert_eq!(SpeechBackend::parse("console"), SpeechBackend::Console);
        assert_eq!(SpeechBackend::parse("whatever"), SpeechBackend::Console);
    }
}
