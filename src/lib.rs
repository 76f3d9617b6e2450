//! `YoVa` - a voice-driven personal assistant
//!
//! This library provides the command interpretation and dispatch core:
//! - Intent classification over an ordered rule table
//! - Action dispatch with session memory and paced multi-utterance replies
//! - A single-slot preemptive speech channel
//! - One-shot reminders that fire independently of command handling
//! - Adapters for news, encyclopedia, translation, weather and geolocation
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  Transcript ingress                   │
//! │        stdin  │  microphone + STT (audio feature)     │
//! └─────────────────────────┬────────────────────────────┘
//!                           │
//! ┌─────────────────────────▼────────────────────────────┐
//! │   Intent classifier  →  Dispatcher  →  Services      │
//! │                           │  memory  │  reminders    │
//! └─────────────────────────┬────────────────────────────┘
//!                           │
//! ┌─────────────────────────▼────────────────────────────┐
//! │                Speaker (one utterance)                │
//! │        console  │  TTS + playback (audio feature)     │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod assistant;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod intent;
pub mod language;
pub mod memory;
pub mod navigation;
pub mod reminders;
pub mod services;
pub mod voice;

pub use assistant::{Assistant, CaptureState, Turn};
pub use config::Config;
pub use dispatch::{DispatchSettings, Dispatcher};
pub use error::{Error, Result};
pub use intent::{Intent, classify};
