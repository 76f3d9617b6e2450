//! Action dispatch
//!
//! The [`Dispatcher`] owns the session: memory, the reminder registry and
//! handles to the speaker, services and navigator. Every outcome, including
//! missing parameters and service failures, ends as something spoken.

pub mod responses;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use rand::seq::SliceRandom;

use crate::clock::Clock;
use crate::config::Config;
use crate::error::InvalidTime;
use crate::intent::{
    self, IdentityQuestion, Intent, ReminderRequest, ReminderWhen, TranslateRequest,
};
use crate::language::{language_code, locale_for};
use crate::memory::SessionMemory;
use crate::navigation::{self, Navigator};
use crate::reminders::{ReminderScheduler, parse_clock_time, resolve_today};
use crate::services::{ServiceError, Services};
use crate::voice::{Speaker, Utterance, UtteranceEnd};

/// Headlines read per news request
const MAX_HEADLINES: usize = 5;

/// Language the user speaks commands in
const SOURCE_LANGUAGE: &str = "en";

/// Identity and pacing knobs
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Name the assistant answers with
    pub assistant_name: String,
    /// Who the assistant credits as its creator
    pub creator: String,
    /// Country code for headlines
    pub news_country: String,
    /// Minimum gap between paced utterances
    pub pacing: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            assistant_name: "YoVa".to_string(),
            creator: "Aaqib Sir".to_string(),
            news_country: "us".to_string(),
            pacing: Duration::from_millis(2500),
        }
    }
}

impl DispatchSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            assistant_name: config.assistant.name.clone(),
            creator: config.assistant.creator.clone(),
            news_country: config.services.news_country.clone(),
            pacing: config.speech.pacing,
        }
    }
}

/// Executes classified intents
pub struct Dispatcher {
    memory: SessionMemory,
    speaker: Arc<Speaker>,
    services: Services,
    reminders: ReminderScheduler,
    navigator: Arc<dyn Navigator>,
    clock: Arc<dyn Clock>,
    settings: DispatchSettings,
    last: Option<Utterance>,
}

impl Dispatcher {
    /// Create a dispatcher with empty session memory
    #[must_use]
    pub fn new(
        speaker: Arc<Speaker>,
        services: Services,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            memory: SessionMemory::new(),
            reminders: ReminderScheduler::new(Arc::clone(&speaker)),
            speaker,
            services,
            navigator,
            clock,
            settings,
            last: None,
        }
    }

    /// Session memory
    #[must_use]
    pub const fn memory(&self) -> &SessionMemory {
        &self.memory
    }

    /// Pending reminders
    #[must_use]
    pub const fn reminders(&self) -> &ReminderScheduler {
        &self.reminders
    }

    /// The shared speech channel
    #[must_use]
    pub const fn speaker(&self) -> &Arc<Speaker> {
        &self.speaker
    }

    /// Speak the time-of-day greeting
    pub fn greet_on_start(&mut self) {
        let greeting = responses::greeting(self.clock.now(), self.memory.name());
        self.say(&greeting);
    }

    /// Ask the user to repeat a command that was not understood
    pub fn apologize(&mut self) {
        self.say(responses::NOT_CAUGHT);
    }

    /// Classify and act on one transcript
    pub async fn handle(&mut self, transcript: &str) -> Intent {
        let intent = intent::classify(transcript);
        self.dispatch(intent.clone()).await;
        intent
    }

    /// Wait for the most recent utterance this dispatcher started
    pub async fn finish_speaking(&mut self) -> Option<UtteranceEnd> {
        match self.last.take() {
            Some(utterance) => Some(utterance.finished().await),
            None => None,
        }
    }

    /// Act on a classified intent
    pub async fn dispatch(&mut self, intent: Intent) {
        tracing::info!(intent = intent.name(), "dispatching");

        match intent {
            Intent::Greet => self.say(responses::GREET),
            Intent::WhoAreYou { question } => {
                let reply = match question {
                    IdentityQuestion::Creator => responses::creator(&self.settings.creator),
                    IdentityQuestion::Name => responses::own_name(&self.settings.assistant_name),
                };
                self.say(&reply);
            }
            Intent::Introduce { name } => match name {
                Some(raw) => {
                    let name = self.memory.set_name(&raw);
                    self.say(&responses::nice_to_meet(&name));
                }
                None => self.say(responses::INTRODUCE_EMPTY),
            },
            Intent::RecallName => {
                let reply = self
                    .memory
                    .name()
                    .map_or_else(|| responses::NAME_UNKNOWN.to_string(), responses::your_name_is);
                self.say(&reply);
            }
            Intent::OpenSite { site } => {
                self.say(&responses::opening(&site));
                self.open(navigation::site_url(&site));
            }
            Intent::GetTime => self.say(&responses::time(self.clock.now())),
            Intent::GetDate => self.say(&responses::date(self.clock.now())),
            Intent::GetWeather { city } => self.weather(city).await,
            Intent::SetReminder { request } => self.set_reminder(request),
            Intent::TellJoke => {
                let joke = responses::JOKES
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or(responses::JOKES[0]);
                self.say(joke);
            }
            Intent::GetNews => self.news().await,
            Intent::StopSpeaking => {
                self.last = None;
                let stopped = self.speaker.stop();
                tracing::debug!(stopped, "stop requested");
            }
            Intent::ChangeLanguage { language } => match language {
                Some(language) => {
                    let locale = locale_for(&language);
                    self.speaker.set_language(locale);
                    self.say_in(&responses::changing_language(&language), locale);
                }
                None => self.say(responses::LANGUAGE_USAGE),
            },
            Intent::PlayOnVideoSite { query } => match query {
                Some(query) => {
                    self.say(&responses::playing(&query));
                    self.open(navigation::video_search_url(&query));
                }
                None => self.say(responses::PLAY_USAGE),
            },
            Intent::Lookup { query } => self.lookup(query).await,
            Intent::Remember { fact } => {
                let reply = match fact.as_deref().map(|f| self.memory.add_fact(f)) {
                    Some(Ok(())) => responses::REMEMBERED,
                    Some(Err(_)) | None => responses::REMEMBER_USAGE,
                };
                self.say(reply);
            }
            Intent::RecallFacts => self.recall_facts().await,
            Intent::Translate { request } => self.translate(request).await,
            Intent::DeviceToggle { on, device } => match device {
                Some(device) => self.say(&responses::device(on, &device)),
                None => self.say(responses::DEVICE_USAGE),
            },
            Intent::Locate => self.locate().await,
            Intent::Navigate { place } => match place {
                Some(place) => {
                    self.say(&responses::navigating(&place));
                    self.open(navigation::directions_url(&place));
                }
                None => self.say(responses::NAVIGATE_USAGE),
            },
            Intent::Help => {
                let lines = std::iter::once(responses::HELP_INTRO)
                    .chain(responses::HELP_LINES.iter().copied());
                self.speak_paced(lines).await;
            }
            Intent::WebSearchFallback { query } => {
                self.say(&responses::searching(&query));
                self.open(navigation::web_search_url(&query));
            }
        }
    }

    fn say(&mut self, text: &str) {
        self.last = self.speaker.speak(text);
    }

    fn say_in(&mut self, text: &str, locale: &str) {
        self.last = self.speaker.speak_in(text, locale);
    }

    fn open(&self, url: Option<url::Url>) {
        match url {
            Some(url) => self.navigator.open(&url),
            None => tracing::warn!("could not build link"),
        }
    }

    /// Speak lines one after another
    ///
    /// Each line gets at least the pacing gap. A line cut off by another
    /// utterance (a reminder going off) is repeated once that utterance has
    /// played, and the sequence carries on.
    async fn speak_paced<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            let line = line.as_ref();
            let gap = tokio::time::sleep(self.settings.pacing);
            let Some(utterance) = self.speaker.speak(line) else {
                gap.await;
                continue;
            };

            let (end, ()) = tokio::join!(utterance.finished(), gap);
            if end == UtteranceEnd::Interrupted {
                tracing::debug!(line, "paced line interrupted, repeating");
                self.speaker.idle().await;
                if let Some(again) = self.speaker.speak(line) {
                    tokio::join!(again.finished(), tokio::time::sleep(self.settings.pacing));
                }
            }
        }
        self.last = None;
    }

    async fn weather(&mut self, city: Option<String>) {
        let Some(city) = city else {
            self.say(responses::WEATHER_NO_CITY);
            return;
        };

        self.say(&responses::fetching_weather(&city));
        let result = self.services.weather.current(&city).await;
        self.finish_speaking().await;

        match result {
            Ok(report) => self.say(&responses::weather(&city, &report)),
            Err(ServiceError::Empty) => self.say(&responses::weather_not_found(&city)),
            Err(e) => {
                tracing::warn!(error = %e, %city, "weather lookup failed");
                self.say(responses::WEATHER_FAILED);
            }
        }
    }

    fn set_reminder(&mut self, request: Option<ReminderRequest>) {
        let Some(ReminderRequest { when, task }) = request else {
            self.say(responses::REMINDER_USAGE);
            return;
        };

        let now = self.clock.now();
        match reminder_deadline(&when, now) {
            Ok((fire_at, spoken_time)) => match self.reminders.schedule(&task, fire_at, now) {
                Ok(_) => self.say(&responses::reminder_set(&spoken_time, &task)),
                Err(e) => {
                    tracing::debug!(error = %e, "reminder not scheduled");
                    self.say(responses::REMINDER_PASSED);
                }
            },
            Err(InvalidTime::Passed) => self.say(responses::REMINDER_PASSED),
            Err(InvalidTime::Unparseable(phrase)) => {
                tracing::debug!(%phrase, "reminder time rejected");
                self.say(responses::REMINDER_INVALID);
            }
        }
    }

    async fn news(&mut self) {
        self.say(responses::NEWS_INTRO);
        let result = self.services.news.headlines(&self.settings.news_country).await;
        self.finish_speaking().await;

        match result {
            Ok(titles) => {
                let lines: Vec<String> = titles
                    .iter()
                    .take(MAX_HEADLINES)
                    .enumerate()
                    .map(|(i, title)| responses::headline(i, title))
                    .collect();
                self.speak_paced(lines).await;
            }
            Err(ServiceError::Empty) => self.say(responses::NEWS_EMPTY),
            Err(e) => {
                tracing::warn!(error = %e, "news fetch failed");
                self.say(responses::NEWS_FAILED);
            }
        }
    }

    async fn lookup(&mut self, query: Option<String>) {
        let Some(query) = query else {
            self.say(responses::LOOKUP_EMPTY);
            return;
        };

        match self.services.encyclopedia.summary(&query).await {
            Ok(extract) => self.say(&extract),
            Err(ServiceError::Empty) => self.say(responses::LOOKUP_NOT_FOUND),
            Err(e) => {
                tracing::warn!(error = %e, %query, "encyclopedia lookup failed");
                self.say(responses::LOOKUP_FAILED);
            }
        }
    }

    async fn recall_facts(&mut self) {
        if self.memory.facts().is_empty() {
            self.say(responses::FACTS_EMPTY);
            return;
        }

        let lines: Vec<String> = std::iter::once(responses::FACTS_INTRO.to_string())
            .chain(
                self.memory
                    .facts()
                    .iter()
                    .enumerate()
                    .map(|(i, fact)| responses::fact(i, fact)),
            )
            .collect();
        self.speak_paced(lines).await;
    }

    async fn translate(&mut self, request: Option<TranslateRequest>) {
        let Some(TranslateRequest { text, language }) = request else {
            self.say(responses::TRANSLATE_USAGE);
            return;
        };

        let locale = locale_for(&language);
        let target = language_code(locale);
        match self
            .services
            .translator
            .translate(&text, SOURCE_LANGUAGE, target)
            .await
        {
            Ok(translated) => self.say_in(&responses::translation(&translated), locale),
            Err(ServiceError::Empty) => self.say(responses::TRANSLATE_EMPTY),
            Err(e) => {
                tracing::warn!(error = %e, %text, target, "translation failed");
                self.say(responses::TRANSLATE_FAILED);
            }
        }
    }

    async fn locate(&mut self) {
        match self.services.geolocator.locate().await {
            Ok(at) => {
                self.say(&responses::located(at));
                self.open(navigation::map_url(at.latitude, at.longitude));
            }
            Err(ServiceError::Unsupported(reason)) => {
                tracing::debug!(%reason, "geolocation unavailable");
                self.say(responses::LOCATE_UNSUPPORTED);
            }
            Err(e) => {
                tracing::warn!(error = %e, "geolocation failed");
                self.say(responses::LOCATE_FAILED);
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("memory", &self.memory)
            .field("reminders", &self.reminders)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// When a reminder fires, and how to read that time back
fn reminder_deadline(
    when: &ReminderWhen,
    now: DateTime<Local>,
) -> Result<(DateTime<Local>, String), InvalidTime> {
    match when {
        ReminderWhen::At(phrase) => {
            let time = parse_clock_time(phrase)
                .ok_or_else(|| InvalidTime::Unparseable(phrase.clone()))?;
            Ok((resolve_today(now, time)?, phrase.clone()))
        }
        ReminderWhen::In(offset) => {
            let offset = chrono::Duration::from_std(*offset)
                .map_err(|_| InvalidTime::Unparseable(format!("{offset:?}")))?;
            let fire_at = now
                .checked_add_signed(offset)
                .ok_or_else(|| InvalidTime::Unparseable(offset.to_string()))?;
            Ok((fire_at, fire_at.format("%I:%M %p").to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ten_am() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).single().unwrap()
    }

    #[test]
    fn test_clock_deadline() {
        let (fire_at, spoken) =
            reminder_deadline(&ReminderWhen::At("6:30 pm".to_string()), ten_am()).unwrap();
        assert_eq!(fire_at - ten_am(), chrono::Duration::minutes(510));
        assert_eq!(spoken, "6:30 pm");
    }

    #[test]
    fn test_relative_deadline() {
        let (fire_at, spoken) =
            reminder_deadline(&ReminderWhen::In(Duration::from_secs(300)), ten_am()).unwrap();
        assert_eq!(fire_at - ten_am(), chrono::Duration::minutes(5));
        assert_eq!(spoken, "10:05 AM");
    }

    #[test]
    fn test_rejected_deadlines() {
        assert_eq!(
            reminder_deadline(&ReminderWhen::At("9 am".to_string()), ten_am()),
            Err(InvalidTime::Passed)
        );
        assert!(matches!(
            reminder_deadline(&ReminderWhen::At("99:99".to_string()), ten_am()),
            Err(InvalidTime::Unparseable(_))
        ));
    }
}
