//! External information services
//!
//! Each capability sits behind a small trait so the dispatcher only sees
//! "a value", "nothing found" or "the call failed". HTTP implementations
//! live in the submodules; tests substitute their own.

mod geolocation;
mod news;
mod translation;
mod weather;
mod wikipedia;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use geolocation::IpGeolocator;
pub use news::NewsApi;
pub use translation::MyMemoryTranslator;
pub use weather::WttrWeather;
pub use wikipedia::WikipediaSummaries;

use crate::config::ServicesConfig;
use crate::Result;

/// Outcome of a failed external query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The call succeeded but carried no usable content
    #[error("no data")]
    Empty,

    /// The capability is not available here
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Transport, status or parse failure
    #[error("service failure: {0}")]
    Failure(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        Self::Failure(e.to_string())
    }
}

/// Result type for external queries
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Top headlines for a country
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch headline titles, most important first
    async fn headlines(&self, country: &str) -> ServiceResult<Vec<String>>;
}

/// Encyclopedia article summaries
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Fetch the summary extract for a title
    async fn summary(&self, title: &str) -> ServiceResult<String>;
}

/// Text translation
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` between two language codes ("en" -> "es")
    async fn translate(&self, text: &str, source: &str, target: &str) -> ServiceResult<String>;
}

/// Current weather for a city
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch current conditions
    async fn current(&self, city: &str) -> ServiceResult<WeatherReport>;
}

/// One-shot device position
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Resolve the current position
    async fn locate(&self) -> ServiceResult<Coordinates>;
}

/// Current conditions in a city
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// Short description, e.g. "Partly cloudy"
    pub description: String,
    /// Temperature in degrees Celsius
    pub temperature_c: f64,
}

/// A latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// The set of adapters the dispatcher calls into
#[derive(Clone)]
pub struct Services {
    /// News headlines
    pub news: Arc<dyn NewsSource>,
    /// Encyclopedia summaries
    pub encyclopedia: Arc<dyn Encyclopedia>,
    /// Translation
    pub translator: Arc<dyn Translator>,
    /// Weather
    pub weather: Arc<dyn WeatherSource>,
    /// Geolocation
    pub geolocator: Arc<dyn Geolocator>,
}

impl Services {
    /// Build the HTTP-backed adapters from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed
    pub fn from_config(config: &ServicesConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("yova/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            news: Arc::new(NewsApi::new(
                client.clone(),
                &config.news_url,
                config.news_api_key.clone(),
            )),
            encyclopedia: Arc::new(WikipediaSummaries::new(client.clone(), &config.wikipedia_url)),
            translator: Arc::new(MyMemoryTranslator::new(client.clone(), &config.translate_url)),
            weather: Arc::new(WttrWeather::new(client.clone(), &config.weather_url)),
            geolocator: Arc::new(IpGeolocator::new(client, config.geolocation_url.as_deref())),
        })
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// Strip a trailing slash so paths can be appended with `format!`
pub(crate) fn base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
