//! Spoken output through TTS and the system speaker

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use super::{AudioPlayback, SpeechDevice, SpeechRequest, TextToSpeech};
use crate::{Error, Result};

/// Speech device that synthesizes each utterance and plays it aloud
///
/// Cancellation bumps a generation counter; a playback started under an
/// older generation stops at its next poll.
pub struct VoiceOutput {
    tts: TextToSpeech,
    playback: AudioPlayback,
    generation: Arc<AtomicU64>,
}

impl VoiceOutput {
    /// Create a voice output over a synthesizer and an opened output device
    #[must_use]
    pub fn new(tts: TextToSpeech, playback: AudioPlayback) -> Self {
        Self {
            tts,
            playback,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }
}

#[async_trait]
impl SpeechDevice for VoiceOutput {
    async fn say(&self, request: &SpeechRequest) -> Result<()> {
        let generation = self.generation.load(Ordering::SeqCst);
        let audio = self.tts.synthesize(&request.text, &request.language).await?;

        if self.generation.load(Ordering::SeqCst) != generation {
            return Ok(());
        }

        let playback = self.playback.clone();
        let current = Arc::clone(&self.generation);
        tokio::task::spawn_blocking(move || {
            playback.play_mp3_blocking(&audio, &|| {
                current.load(Ordering::SeqCst) == generation
            })
        })
        .await
        .map_err(|e| Error::Audio(e.to_string()))?
    }

    fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
