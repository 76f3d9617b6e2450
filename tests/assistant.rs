//! Session loop and capture control

mod common;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use common::{Harness, StubEncyclopedia, failing_services, settle};
use yova::dispatch::responses;
use yova::voice::{LineTranscripts, TranscriptSource};
use yova::{Assistant, CaptureState, Error, Intent, Turn};

/// Plays back a fixed script; each capture takes a second
struct Script(VecDeque<yova::Result<Option<String>>>);

impl Script {
    fn new(lines: impl IntoIterator<Item = yova::Result<Option<String>>>) -> Self {
        Self(lines.into_iter().collect())
    }
}

#[async_trait(?Send)]
impl TranscriptSource for Script {
    async fn next_transcript(&mut self) -> yova::Result<Option<String>> {
        tokio::time::sleep(Duration::from_secs(1)).await;
        self.0.pop_front().unwrap_or(Ok(None))
    }
}

fn said(text: &str) -> yova::Result<Option<String>> {
    Ok(Some(text.to_string()))
}

#[tokio::test(start_paused = true)]
async fn test_session_recovers_from_recognition_failures() {
    let h = Harness::new(failing_services());
    let device = h.device.clone();

    let script = Script::new([
        said("Hello"),
        Err(Error::Recognition("no speech detected".to_string())),
        said("   "),
        said("My name is aaqib"),
        said("What is my name"),
    ]);
    let mut assistant = Assistant::new(h.dispatcher, script);
    assistant.run().await.unwrap();

    assert_eq!(
        device.texts(),
        [
            "Good Morning Sir",
            "Yes sir, how can I help you?",
            responses::NOT_CAUGHT,
            responses::NOT_CAUGHT,
            "Nice to meet you, Aaqib",
            "You told me your name is Aaqib",
        ]
    );
    assert_eq!(assistant.capture_state(), CaptureState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_step_reports_each_turn() {
    let h = Harness::new(failing_services());
    let script = Script::new([
        said("tell me a joke"),
        Err(Error::Recognition("timeout".to_string())),
    ]);
    let mut assistant = Assistant::new(h.dispatcher, script);

    assert_eq!(assistant.step().await, Turn::Handled(Intent::TellJoke));
    assert_eq!(assistant.step().await, Turn::NotCaught);
    assert_eq!(assistant.step().await, Turn::Ended);
}

#[tokio::test(start_paused = true)]
async fn test_capture_disabled_while_interpreting() {
    let mut services = failing_services();
    services.encyclopedia = Arc::new(StubEncyclopedia {
        result: Ok("A mathematician.".to_string()),
        delay: Duration::from_secs(5),
    });
    let h = Harness::new(services);
    let mut assistant = Assistant::new(h.dispatcher, Script::new([said("who is alan turing")]));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut states = assistant.subscribe();
    let monitor = {
        let seen = Arc::clone(&seen);
        tokio::spawn(async move {
            while states.changed().await.is_ok() {
                let state = *states.borrow_and_update();
                seen.lock().unwrap().push(state);
            }
        })
    };

    let turn = assistant.step().await;
    settle().await;

    assert!(matches!(turn, Turn::Handled(Intent::Lookup { .. })));
    assert_eq!(
        *seen.lock().unwrap(),
        [
            CaptureState::Listening,
            CaptureState::Interpreting,
            CaptureState::Idle,
        ]
    );
    monitor.abort();
}

/// Input that has gone away for good
struct ClosedInput;

impl tokio::io::AsyncRead for ClosedInput {
    fn poll_read(
        self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
        _buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        std::task::Poll::Ready(Err(std::io::Error::from_raw_os_error(5)))
    }
}

#[tokio::test(start_paused = true)]
async fn test_session_ends_when_input_fails() {
    let h = Harness::new(failing_services());
    let device = h.device.clone();
    let input = LineTranscripts::new(tokio::io::BufReader::new(ClosedInput), "");

    let mut assistant = Assistant::new(h.dispatcher, input);
    assistant.run().await.unwrap();

    assert_eq!(device.texts(), ["Good Morning Sir"]);
    assert_eq!(assistant.capture_state(), CaptureState::Idle);
}

