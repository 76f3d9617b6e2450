//! Intent classification
//!
//! A transcript maps to exactly one [`Intent`]. Rules are tried top-down in
//! [`rules::RULES`] and the first structural match wins; anything left over
//! becomes a web search for the whole transcript.
//!
//! Parameters that extract to nothing after trimming are `None`, never an
//! empty string. The dispatcher answers those with guidance instead of
//! acting.

mod rules;

use std::time::Duration;

use serde::Serialize;

pub use rules::{RULES, Rule};

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    Greet,
    WhoAreYou { question: IdentityQuestion },
    Introduce { name: Option<String> },
    RecallName,
    OpenSite { site: String },
    GetTime,
    GetDate,
    GetWeather { city: Option<String> },
    SetReminder { request: Option<ReminderRequest> },
    TellJoke,
    GetNews,
    StopSpeaking,
    ChangeLanguage { language: Option<String> },
    PlayOnVideoSite { query: Option<String> },
    Lookup { query: Option<String> },
    Remember { fact: Option<String> },
    RecallFacts,
    Translate { request: Option<TranslateRequest> },
    DeviceToggle { on: bool, device: Option<String> },
    Locate,
    Navigate { place: Option<String> },
    Help,
    WebSearchFallback { query: String },
}

impl Intent {
    /// Stable tag for logging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Greet => "greet",
            Self::WhoAreYou { .. } => "who_are_you",
            Self::Introduce { .. } => "introduce",
            Self::RecallName => "recall_name",
            Self::OpenSite { .. } => "open_site",
            Self::GetTime => "get_time",
            Self::GetDate => "get_date",
            Self::GetWeather { .. } => "get_weather",
            Self::SetReminder { .. } => "set_reminder",
            Self::TellJoke => "tell_joke",
            Self::GetNews => "get_news",
            Self::StopSpeaking => "stop_speaking",
            Self::ChangeLanguage { .. } => "change_language",
            Self::PlayOnVideoSite { .. } => "play_on_video_site",
            Self::Lookup { .. } => "lookup",
            Self::Remember { .. } => "remember",
            Self::RecallFacts => "recall_facts",
            Self::Translate { .. } => "translate",
            Self::DeviceToggle { .. } => "device_toggle",
            Self::Locate => "locate",
            Self::Navigate { .. } => "navigate",
            Self::Help => "help",
            Self::WebSearchFallback { .. } => "web_search_fallback",
        }
    }
}

/// Which identity question was asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityQuestion {
    /// "who are you", "who created you"
    Creator,
    /// "what is your name"
    Name,
}

/// A well-formed reminder command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderRequest {
    pub when: ReminderWhen,
    pub task: String,
}

/// When a reminder should fire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderWhen {
    /// Clock time phrase as spoken, e.g. "6:30 pm"
    At(String),
    /// Offset from now
    In(Duration),
}

/// A well-formed translate command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslateRequest {
    pub text: String,
    /// Spoken language name, e.g. "spanish"
    pub language: String,
}

/// Classify a transcript
///
/// Input is expected lower-cased; surrounding whitespace is ignored.
#[must_use]
pub fn classify(transcript: &str) -> Intent {
    let message = transcript.trim();

    for rule in RULES {
        if let Some(intent) = (rule.classify)(message) {
            tracing::debug!(rule = rule.name, intent = intent.name(), "rule matched");
            return intent;
        }
    }

    Intent::WebSearchFallback {
        query: message.to_string(),
    }
}
