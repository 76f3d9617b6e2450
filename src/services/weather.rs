//! Current conditions via wttr.in

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{ServiceError, ServiceResult, WeatherReport, WeatherSource};

#[derive(Debug, Deserialize)]
struct WttrResponse {
    #[serde(default)]
    current_condition: Vec<CurrentCondition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentCondition {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(default)]
    weather_desc: Vec<DescValue>,
}

#[derive(Debug, Deserialize)]
struct DescValue {
    value: String,
}

/// wttr.in JSON client
pub struct WttrWeather {
    client: reqwest::Client,
    base_url: String,
}

impl WttrWeather {
    /// Create a client against `base_url` (e.g. `https://wttr.in`)
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: super::base_url(base_url),
        }
    }
}

#[async_trait]
impl WeatherSource for WttrWeather {
    async fn current(&self, city: &str) -> ServiceResult<WeatherReport> {
        let url = format!("{}/{}", self.base_url, urlencoding::encode(city));

        let response = self
            .client
            .get(&url)
            .query(&[("format", "j1")])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ServiceError::Empty);
        }

        let body: WttrResponse = response.error_for_status()?.json().await?;
        let condition = body.current_condition.into_iter().next().ok_or(ServiceError::Empty)?;

        let temperature_c = condition
            .temp_c
            .trim()
            .parse::<f64>()
            .map_err(|e| ServiceError::Failure(format!("bad temperature: {e}")))?;
        let description = condition
            .weather_desc
            .into_iter()
            .map(|d| d.value.trim().to_string())
            .find(|d| !d.is_empty())
            .unwrap_or_else(|| "unknown conditions".to_string());

        Ok(WeatherReport {
            description,
            temperature_c,
        })
    }
}
