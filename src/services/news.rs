//! Top headlines via NewsAPI

use async_trait::async_trait;
use serde::Deserialize;

use super::{NewsSource, ServiceError, ServiceResult};

/// NewsAPI top-headlines response
#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Option<Vec<Article>>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
}

/// NewsAPI client
pub struct NewsApi {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl NewsApi {
    /// Create a client against `base_url` (e.g. `https://newsapi.org`)
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: super::base_url(base_url),
            api_key,
        }
    }
}

#[async_trait]
impl NewsSource for NewsApi {
    async fn headlines(&self, country: &str) -> ServiceResult<Vec<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::Failure("NEWS_API_KEY not configured".to_string()))?;

        let response = self
            .client
            .get(format!("{}/v2/top-headlines", self.base_url))
            .query(&[("country", country), ("apiKey", api_key)])
            .send()
            .await?
            .error_for_status()?;

        let body: HeadlinesResponse = response.json().await?;

        let titles: Vec<String> = body
            .articles
            .unwrap_or_default()
            .into_iter()
            .filter_map(|a| a.title)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        tracing::debug!(country, count = titles.len(), "fetched headlines");

        if titles.is_empty() {
            Err(ServiceError::Empty)
        } else {
            Ok(titles)
        }
    }
}
