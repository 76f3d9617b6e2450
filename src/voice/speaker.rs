//! Single-slot preemptive speech output
//!
//! Every utterance goes through [`Speaker`]. Starting a new utterance
//! cancels the one in flight; nothing is queued. Callers that need several
//! utterances to be heard in turn must wait between them (see
//! [`Utterance::finished`]).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use async_trait::async_trait;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::Result;

/// One utterance to be spoken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    /// Text to speak
    pub text: String,
    /// Locale tag, e.g. "en-US"
    pub language: String,
}

/// Speech output device with cancel-then-speak semantics
#[async_trait]
pub trait SpeechDevice: Send + Sync {
    /// Speak one utterance, resolving once it has been fully played
    ///
    /// # Errors
    ///
    /// Returns error if synthesis or playback fails
    async fn say(&self, request: &SpeechRequest) -> Result<()>;

    /// Silence whatever is currently playing
    fn cancel(&self) {}
}

/// How an utterance ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtteranceEnd {
    /// Played to the end (or the device failed, which is not observable)
    Completed,
    /// Preempted by a later utterance or stopped
    Interrupted,
}

/// Handle to an utterance started by [`Speaker::speak`]
#[derive(Debug)]
pub struct Utterance {
    id: u64,
    done: oneshot::Receiver<()>,
}

impl Utterance {
    /// Sequence number of this utterance
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Wait until the utterance has completed or been interrupted
    pub async fn finished(self) -> UtteranceEnd {
        match self.done.await {
            Ok(()) => UtteranceEnd::Completed,
            Err(_) => UtteranceEnd::Interrupted,
        }
    }
}

struct Active {
    id: u64,
    task: JoinHandle<()>,
}

/// The one shared speech channel
pub struct Speaker {
    device: Arc<dyn SpeechDevice>,
    language: RwLock<String>,
    slot: Arc<Mutex<Option<Active>>>,
    busy: Arc<watch::Sender<bool>>,
    next_id: AtomicU64,
}

impl Speaker {
    /// Create a speaker over a device, with a default locale
    #[must_use]
    pub fn new(device: Arc<dyn SpeechDevice>, language: impl Into<String>) -> Self {
        Self {
            device,
            language: RwLock::new(language.into()),
            slot: Arc::new(Mutex::new(None)),
            busy: Arc::new(watch::Sender::new(false)),
            next_id: AtomicU64::new(1),
        }
    }

    /// Current default locale
    #[must_use]
    pub fn language(&self) -> String {
        self.language
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Change the default locale for later utterances
    pub fn set_language(&self, language: impl Into<String>) {
        let language = language.into();
        tracing::debug!(%language, "default speech language changed");
        *self.language.write().unwrap_or_else(PoisonError::into_inner) = language;
    }

    /// Speak in the default locale
    ///
    /// Returns `None` (and does nothing) for empty text.
    pub fn speak(&self, text: &str) -> Option<Utterance> {
        let language = self.language();
        self.speak_in(text, &language)
    }

    /// Speak in an explicit locale, preempting any utterance in flight
    ///
    /// Must be called from within a Tokio runtime.
    pub fn speak_in(&self, text: &str, language: &str) -> Option<Utterance> {
        if text.trim().is_empty() {
            return None;
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = SpeechRequest {
            text: text.to_string(),
            language: language.to_string(),
        };
        let (done_tx, done_rx) = oneshot::channel();

        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(active) = slot.take() {
            self.interrupt(active);
        }

        tracing::debug!(id, text, language, "speaking");

        let device = Arc::clone(&self.device);
        let slot_handle = Arc::clone(&self.slot);
        let busy = Arc::clone(&self.busy);
        let task = tokio::spawn(async move {
            if let Err(e) = device.say(&request).await {
                tracing::warn!(error = %e, id, "speech device error");
            }

            let mut slot = slot_handle.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.as_ref().is_some_and(|active| active.id == id) {
                *slot = None;
                busy.send_replace(false);
            }
            drop(slot);

            let _ = done_tx.send(());
        });

        *slot = Some(Active { id, task });
        self.busy.send_replace(true);

        Some(Utterance { id, done: done_rx })
    }

    /// Silence the current utterance
    ///
    /// Returns true if something was interrupted.
    pub fn stop(&self) -> bool {
        let active = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match active {
            Some(active) => {
                self.interrupt(active);
                self.busy.send_replace(false);
                true
            }
            None => {
                self.device.cancel();
                false
            }
        }
    }

    /// Whether an utterance is currently in flight
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|active| !active.task.is_finished())
    }

    /// Wait until nothing is being spoken
    pub async fn idle(&self) {
        let mut busy = self.busy.subscribe();
        let _ = busy.wait_for(|busy| !*busy).await;
    }

    fn interrupt(&self, active: Active) {
        tracing::debug!(id = active.id, "interrupting utterance");
        active.task.abort();
        self.device.cancel();
    }
}

impl std::fmt::Debug for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Speaker")
            .field("language", &self.language())
            .field("speaking", &self.is_speaking())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    /// Device that takes one second per utterance and records completions
    #[derive(Default)]
    struct SlowDevice {
        completed: Mutex<Vec<SpeechRequest>>,
    }

    #[async_trait]
    impl SpeechDevice for SlowDevice {
        async fn say(&self, request: &SpeechRequest) -> Result<()> {
            tokio::time::sleep(Duration::from_secs(1)).await;
            self.completed.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text_is_noop() {
        let speaker = Speaker::new(Arc::new(SlowDevice::default()), "en-US");
        assert!(speaker.speak("").is_none());
        assert!(speaker.speak("   ").is_none());
        assert!(!speaker.is_speaking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_speech_preempts_previous() {
        let device = Arc::new(SlowDevice::default());
        let speaker = Speaker::new(device.clone(), "en-US");

        let first = speaker.speak("A").unwrap();
        let second = speaker.speak("B").unwrap();

        assert_eq!(first.finished().await, UtteranceEnd::Interrupted);
        assert_eq!(second.finished().await, UtteranceEnd::Completed);

        let completed = device.completed.lock().unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].text, "B");
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiting_between_utterances_keeps_both() {
        let device = Arc::new(SlowDevice::default());
        let speaker = Speaker::new(device.clone(), "en-US");

        let first = speaker.speak("A").unwrap();
        assert_eq!(first.finished().await, UtteranceEnd::Completed);
        let second = speaker.speak("B").unwrap();
        assert_eq!(second.finished().await, UtteranceEnd::Completed);

        let texts: Vec<String> = device
            .completed
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.text.clone())
            .collect();
        assert_eq!(texts, ["A", "B"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_interrupts() {
        let device = Arc::new(SlowDevice::default());
        let speaker = Speaker::new(device.clone(), "en-US");

        let utterance = speaker.speak("long story").unwrap();
        assert!(speaker.stop());
        assert_eq!(utterance.finished().await, UtteranceEnd::Interrupted);
        assert!(!speaker.stop());
        assert!(device.completed.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_waits_for_preempting_utterance() {
        let device = Arc::new(SlowDevice::default());
        let speaker = Speaker::new(device.clone(), "en-US");
        speaker.idle().await;

        let first = speaker.speak("A").unwrap();
        tokio::time::advance(Duration::from_millis(500)).await;
        let _second = speaker.speak("B").unwrap();
        assert_eq!(first.finished().await, UtteranceEnd::Interrupted);

        let started = tokio::time::Instant::now();
        speaker.idle().await;
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert!(!speaker.is_speaking());
        assert_eq!(device.completed.lock().unwrap()[0].text, "B");
    }

    #[tokio::test(start_paused = true)]
    async fn test_language_default_and_override() {
        let device = Arc::new(SlowDevice::default());
        let speaker = Speaker::new(device.clone(), "hi-IN");

        speaker.speak("namaste").unwrap().finished().await;
        speaker.set_language("fr-FR");
        speaker.speak("bonjour").unwrap().finished().await;
        speaker
            .speak_in("hola", "es-ES")
            .unwrap()
            .finished()
            .await;

        let languages: Vec<String> = device
            .completed
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.language.clone())
            .collect();
        assert_eq!(languages, ["hi-IN", "fr-FR", "es-ES"]);
    }
}
