//! Error types for the YoVa assistant

use thiserror::Error;

/// Result type alias for YoVa operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the assistant core
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Audio device error
    #[error("audio error: {0}")]
    Audio(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Capture produced no usable transcript
    #[error("recognition failed: {0}")]
    Recognition(String),

    /// A fact to remember was empty after trimming
    #[error("fact text is empty")]
    EmptyFact,

    /// A reminder time could not be used
    #[error("invalid reminder time: {0}")]
    InvalidTime(#[from] InvalidTime),

    /// Navigation (URL opening) error
    #[error("navigation error: {0}")]
    Navigation(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Why a reminder time was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTime {
    /// The time phrase is not a recognizable clock time
    #[error("unparseable time phrase: {0:?}")]
    Unparseable(String),

    /// The time has already passed today
    #[error("time has already passed")]
    Passed,
}
