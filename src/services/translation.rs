//! Translation via the MyMemory API

use async_trait::async_trait;
use serde::Deserialize;

use super::{ServiceError, ServiceResult, Translator};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    response_data: Option<ResponseData>,
    /// Numeric status, sometimes sent as a string
    #[serde(default)]
    response_status: Option<serde_json::Value>,
    #[serde(default)]
    response_details: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

/// MyMemory translation client
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl MyMemoryTranslator {
    /// Create a client against `base_url` (e.g. `https://api.mymemory.translated.net`)
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: super::base_url(base_url),
        }
    }
}

/// Read MyMemory's `responseStatus`, which may be a number or a string
fn status_code(value: &serde_json::Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> ServiceResult<String> {
        let langpair = format!("{source}|{target}");

        let response = self
            .client
            .get(format!("{}/get", self.base_url))
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body: TranslateResponse = response.json().await?;

        if let Some(status) = body.response_status.as_ref().and_then(status_code) {
            if status != 200 {
                return Err(ServiceError::Failure(format!(
                    "translation status {status}: {}",
                    body.response_details.unwrap_or_default()
                )));
            }
        }

        match body
            .response_data
            .and_then(|d| d.translated_text)
            .map(|t| t.trim().to_string())
        {
            Some(translated) if !translated.is_empty() => Ok(translated),
            _ => Err(ServiceError::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_number_or_string() {
        assert_eq!(status_code(&serde_json::json!(200)), Some(200));
        assert_eq!(status_code(&serde_json::json!("403")), Some(403));
        assert_eq!(status_code(&serde_json::json!(null)), None);
    }
}
