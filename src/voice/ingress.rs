//! Transcript ingress
//!
//! A capture event yields one raw transcript. Sources stop on their first
//! result or error; the session loop triggers the next capture.

use std::io::{ErrorKind, Write};

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::{Error, Result};

/// Source of spoken (or typed) commands
#[async_trait(?Send)]
pub trait TranscriptSource {
    /// Capture one transcript
    ///
    /// Returns `Ok(None)` when the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Recognition`] (or a device error) when the capture
    /// produced nothing usable
    async fn next_transcript(&mut self) -> Result<Option<String>>;
}

/// Normalize a raw transcript: trimmed and lower-cased
///
/// Returns `None` when nothing usable remains.
#[must_use]
pub fn normalize_transcript(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Reads typed commands line by line
pub struct LineTranscripts<R> {
    lines: Lines<R>,
    prompt: String,
}

/// Typed commands from stdin
pub type StdinTranscripts = LineTranscripts<BufReader<Stdin>>;

impl StdinTranscripts {
    /// Create a stdin source that prints `prompt` before each capture
    #[must_use]
    pub fn stdin(prompt: impl Into<String>) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), prompt)
    }
}

impl<R: AsyncBufRead + Unpin> LineTranscripts<R> {
    /// Read commands from `reader`, printing `prompt` before each one
    #[must_use]
    pub fn new(reader: R, prompt: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            prompt: prompt.into(),
        }
    }
}

#[async_trait(?Send)]
impl<R: AsyncBufRead + Unpin> TranscriptSource for LineTranscripts<R> {
    async fn next_transcript(&mut self) -> Result<Option<String>> {
        {
            let mut stdout = std::io::stdout().lock();
            write!(stdout, "{}", self.prompt)?;
            stdout.flush()?;
        }

        match self.lines.next_line().await {
            Ok(line) => Ok(line),
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(Error::Recognition(e.to_string())),
            Err(e) => {
                tracing::warn!(error = %e, "input closed");
                Ok(None)
            }
        }
    }
}
