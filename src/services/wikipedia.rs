//! Article summaries via the Wikipedia REST API

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{Encyclopedia, ServiceError, ServiceResult};

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    extract: Option<String>,
}

/// Wikipedia page-summary client
pub struct WikipediaSummaries {
    client: reqwest::Client,
    base_url: String,
}

impl WikipediaSummaries {
    /// Create a client against `base_url` (e.g. `https://en.wikipedia.org`)
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: super::base_url(base_url),
        }
    }
}

#[async_trait]
impl Encyclopedia for WikipediaSummaries {
    async fn summary(&self, title: &str) -> ServiceResult<String> {
        let url = format!(
            "{}/api/rest_v1/page/summary/{}",
            self.base_url,
            urlencoding::encode(title)
        );

        let response = self.client.get(&url).send().await?;

        // Unknown titles come back as 404 with a problem document
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(title, "no encyclopedia entry");
            return Err(ServiceError::Empty);
        }

        let body: SummaryResponse = response.error_for_status()?.json().await?;

        match body.extract.map(|e| e.trim().to_string()) {
            Some(extract) if !extract.is_empty() => Ok(extract),
            _ => Err(ServiceError::Empty),
        }
    }
}
