//! Text-only speech device for terminals without audio hardware

use std::io::Write;

use async_trait::async_trait;

use super::{SpeechDevice, SpeechRequest};
use crate::Result;

/// Prints utterances to stdout instead of playing them
#[derive(Debug, Clone)]
pub struct ConsoleSpeech {
    speaker_name: String,
}

impl ConsoleSpeech {
    /// Create a console device that prefixes lines with the assistant name
    #[must_use]
    pub fn new(speaker_name: impl Into<String>) -> Self {
        Self {
            speaker_name: speaker_name.into(),
        }
    }
}

#[async_trait]
impl SpeechDevice for ConsoleSpeech {
    async fn say(&self, request: &SpeechRequest) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(
            stdout,
            "{} [{}]: {}",
            self.speaker_name, request.language, request.text
        )?;
        stdout.flush()?;
        Ok(())
    }
}
