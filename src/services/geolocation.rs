//! Approximate position from the public IP address

use async_trait::async_trait;
use serde::Deserialize;

use super::{Coordinates, Geolocator, ServiceError, ServiceResult};

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// ip-api.com client
///
/// Without a base URL the capability is reported as unsupported.
pub struct IpGeolocator {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl IpGeolocator {
    /// Create a locator; `None` disables geolocation
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: Option<&str>) -> Self {
        Self {
            client,
            base_url: base_url.map(super::base_url),
        }
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> ServiceResult<Coordinates> {
        let Some(base_url) = &self.base_url else {
            return Err(ServiceError::Unsupported("geolocation disabled".to_string()));
        };

        let body: IpApiResponse = self
            .client
            .get(format!("{base_url}/json"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if body.status != "success" {
            return Err(ServiceError::Failure(
                body.message.unwrap_or_else(|| "lookup failed".to_string()),
            ));
        }

        match (body.lat, body.lon) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(ServiceError::Empty),
        }
    }
}
