//! Voice input and output
//!
//! The [`Speaker`] is the only way to produce speech. Transcripts arrive
//! through a [`TranscriptSource`]. Microphone capture, STT, TTS and
//! speaker playback are behind the `audio` feature.

mod console;
mod ingress;
mod speaker;

#[cfg(feature = "audio")]
mod capture;
#[cfg(feature = "audio")]
mod microphone;
#[cfg(feature = "audio")]
mod output;
#[cfg(feature = "audio")]
mod playback;
#[cfg(feature = "audio")]
mod stt;
#[cfg(feature = "audio")]
mod tts;

pub use console::ConsoleSpeech;
pub use ingress::{LineTranscripts, StdinTranscripts, TranscriptSource, normalize_transcript};
pub use speaker::{SpeechDevice, SpeechRequest, Speaker, Utterance, UtteranceEnd};

#[cfg(feature = "audio")]
pub use capture::{AudioCapture, SAMPLE_RATE, samples_to_wav};
#[cfg(feature = "audio")]
pub use microphone::MicrophoneTranscripts;
#[cfg(feature = "audio")]
pub use output::VoiceOutput;
#[cfg(feature = "audio")]
pub use playback::AudioPlayback;
#[cfg(feature = "audio")]
pub use stt::SpeechToText;
#[cfg(feature = "audio")]
pub use tts::TextToSpeech;
