//! The interactive session
//!
//! One capture at a time: capture is disabled from the moment a transcript
//! arrives until its dispatch (including any service call or paced
//! sequence) has completed. Reminders keep firing in the background.

use tokio::sync::watch;

use crate::Result;
use crate::dispatch::Dispatcher;
use crate::intent::Intent;
use crate::voice::{TranscriptSource, normalize_transcript};

/// Where the capture control is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Ready for the next trigger
    Idle,
    /// Capturing a transcript
    Listening,
    /// A command is being handled; capture is disabled
    Interpreting,
}

/// Outcome of one capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// A transcript was classified and dispatched
    Handled(Intent),
    /// Capture produced nothing usable; the user was asked to retry
    NotCaught,
    /// The transcript source is exhausted
    Ended,
}

/// A running assistant session
pub struct Assistant<S> {
    dispatcher: Dispatcher,
    source: S,
    state: watch::Sender<CaptureState>,
}

impl<S: TranscriptSource> Assistant<S> {
    #[must_use]
    pub fn new(dispatcher: Dispatcher, source: S) -> Self {
        let (state, _) = watch::channel(CaptureState::Idle);
        Self {
            dispatcher,
            source,
            state,
        }
    }

    /// Watch capture-control transitions
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CaptureState> {
        self.state.subscribe()
    }

    /// Current capture-control state
    #[must_use]
    pub fn capture_state(&self) -> CaptureState {
        *self.state.borrow()
    }

    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Greet, then handle transcripts until the source runs dry
    ///
    /// # Errors
    ///
    /// Currently infallible; recognition errors are spoken, not returned
    #[allow(clippy::future_not_send)]
    pub async fn run(&mut self) -> Result<()> {
        self.dispatcher.greet_on_start();

        let mut handled = 0usize;
        loop {
            match self.step().await {
                Turn::Handled(_) => handled += 1,
                Turn::NotCaught => {}
                Turn::Ended => break,
            }
        }

        self.dispatcher.finish_speaking().await;
        tracing::info!(handled, "session ended");
        Ok(())
    }

    /// Capture and handle one transcript
    #[allow(clippy::future_not_send)]
    pub async fn step(&mut self) -> Turn {
        self.set_state(CaptureState::Listening);

        let turn = match self.source.next_transcript().await {
            Ok(Some(raw)) => match normalize_transcript(&raw) {
                Some(transcript) => {
                    self.set_state(CaptureState::Interpreting);
                    Turn::Handled(self.dispatcher.handle(&transcript).await)
                }
                None => self.not_caught("empty transcript"),
            },
            Ok(None) => Turn::Ended,
            Err(e) => self.not_caught(&e.to_string()),
        };

        self.set_state(CaptureState::Idle);
        turn
    }

    fn not_caught(&mut self, reason: &str) -> Turn {
        tracing::warn!(reason, "recognition failed");
        self.dispatcher.apologize();
        Turn::NotCaught
    }

    fn set_state(&self, state: CaptureState) {
        let previous = self.state.send_replace(state);
        if previous != state {
            tracing::debug!(?previous, ?state, "capture state");
        }
    }
}

impl<S> std::fmt::Debug for Assistant<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("dispatcher", &self.dispatcher)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
