//! Push-to-talk microphone transcripts

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use super::{AudioCapture, SAMPLE_RATE, SpeechToText, TranscriptSource, samples_to_wav};
use crate::{Error, Result};

/// Records a fixed window after each Enter key press and transcribes it
pub struct MicrophoneTranscripts {
    capture: AudioCapture,
    stt: SpeechToText,
    window: Duration,
    trigger: Lines<BufReader<Stdin>>,
}

impl MicrophoneTranscripts {
    /// Create a microphone source
    #[must_use]
    pub fn new(capture: AudioCapture, stt: SpeechToText, window: Duration) -> Self {
        Self {
            capture,
            stt,
            window,
            trigger: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

#[async_trait(?Send)]
impl TranscriptSource for MicrophoneTranscripts {
    async fn next_transcript(&mut self) -> Result<Option<String>> {
        {
            let mut stdout = std::io::stdout().lock();
            write!(stdout, "[press Enter and speak] ")?;
            stdout.flush()?;
        }

        if self.trigger.next_line().await?.is_none() {
            return Ok(None);
        }

        let samples = self.capture.record(self.window).await?;
        if samples.is_empty() {
            return Err(Error::Recognition("no audio captured".to_string()));
        }

        let wav = samples_to_wav(&samples, SAMPLE_RATE)?;
        let transcript = self
            .stt
            .transcribe(&wav)
            .await
            .map_err(|e| Error::Recognition(e.to_string()))?;

        Ok(Some(transcript))
    }
}
