//! Shared test utilities
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use url::Url;

use yova::clock::FixedClock;
use yova::navigation::Navigator;
use yova::services::{
    Coordinates, Encyclopedia, Geolocator, NewsSource, ServiceError, ServiceResult, Services,
    Translator, WeatherReport, WeatherSource,
};
use yova::voice::{SpeechDevice, SpeechRequest, Speaker};
use yova::{DispatchSettings, Dispatcher};

/// Speech device that records every utterance it starts
#[derive(Default)]
pub struct RecordingDevice {
    requests: Mutex<Vec<SpeechRequest>>,
    duration: Duration,
}

impl RecordingDevice {
    /// A device whose utterances take `duration` to play
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            duration,
        }
    }

    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.text).collect()
    }

    pub fn last(&self) -> Option<SpeechRequest> {
        self.requests().pop()
    }
}

#[async_trait]
impl SpeechDevice for RecordingDevice {
    async fn say(&self, request: &SpeechRequest) -> yova::Result<()> {
        self.requests.lock().unwrap().push(request.clone());
        if !self.duration.is_zero() {
            tokio::time::sleep(self.duration).await;
        }
        Ok(())
    }
}

/// Navigator that remembers opened URLs
#[derive(Default)]
pub struct RecordingNavigator {
    opened: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open(&self, url: &Url) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

fn not_stubbed<T>() -> ServiceResult<T> {
    Err(ServiceError::Failure("not stubbed".to_string()))
}

pub struct StubNews(pub ServiceResult<Vec<String>>);

#[async_trait]
impl NewsSource for StubNews {
    async fn headlines(&self, _country: &str) -> ServiceResult<Vec<String>> {
        self.0.clone()
    }
}

/// Encyclopedia that answers after a delay
pub struct StubEncyclopedia {
    pub result: ServiceResult<String>,
    pub delay: Duration,
}

#[async_trait]
impl Encyclopedia for StubEncyclopedia {
    async fn summary(&self, _title: &str) -> ServiceResult<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone()
    }
}

/// Translator that records its arguments
pub struct StubTranslator {
    pub result: ServiceResult<String>,
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl StubTranslator {
    pub fn new(result: ServiceResult<String>) -> Self {
        Self {
            result,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> ServiceResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), source.to_string(), target.to_string()));
        self.result.clone()
    }
}

pub struct StubWeather(pub ServiceResult<WeatherReport>);

#[async_trait]
impl WeatherSource for StubWeather {
    async fn current(&self, _city: &str) -> ServiceResult<WeatherReport> {
        self.0.clone()
    }
}

pub struct StubGeolocator(pub ServiceResult<Coordinates>);

#[async_trait]
impl Geolocator for StubGeolocator {
    async fn locate(&self) -> ServiceResult<Coordinates> {
        self.0.clone()
    }
}

/// Services where every call fails unless replaced
pub fn failing_services() -> Services {
    Services {
        news: Arc::new(StubNews(not_stubbed())),
        encyclopedia: Arc::new(StubEncyclopedia {
            result: not_stubbed(),
            delay: Duration::ZERO,
        }),
        translator: Arc::new(StubTranslator::new(not_stubbed())),
        weather: Arc::new(StubWeather(not_stubbed())),
        geolocator: Arc::new(StubGeolocator(not_stubbed())),
    }
}

/// 10:00 local time on a fixed weekday
pub fn morning() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 3, 10, 10, 0, 0)
        .single()
        .unwrap()
}

/// A dispatcher wired to recording fakes
pub struct Harness {
    pub dispatcher: Dispatcher,
    pub device: Arc<RecordingDevice>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn new(services: Services) -> Self {
        Self::with_device(services, RecordingDevice::default())
    }

    pub fn with_device(services: Services, device: RecordingDevice) -> Self {
        let device = Arc::new(device);
        let navigator = Arc::new(RecordingNavigator::default());
        let speaker = Arc::new(Speaker::new(device.clone(), "hi-IN"));
        let dispatcher = Dispatcher::new(
            speaker,
            services,
            navigator.clone(),
            Arc::new(FixedClock(morning())),
            DispatchSettings::default(),
        );
        Self {
            dispatcher,
            device,
            navigator,
        }
    }

    /// Handle a transcript and wait until its last utterance has played
    pub async fn say(&mut self, transcript: &str) {
        self.dispatcher.handle(transcript).await;
        self.dispatcher.finish_speaking().await;
    }

    /// Texts spoken so far
    pub fn spoken(&self) -> Vec<String> {
        self.device.texts()
    }
}

/// Let spawned tasks run without moving the clock
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
