use std::time::Duration;

use anyhow::Context as _;
use serde::Deserialize;

use crate::domain::repository::GeoLookupPort;
use crate::domain::types::GeoLocation;
use crate::error::RegistryServiceError;

/// HTTP client implementing `GeoLookupPort` against an ipapi.co-style
/// endpoint (`GET {base}/{ip}/json/`).
#[derive(Clone)]
pub struct HttpGeoLookup {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct GeoResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    country_name: Option<String>,
}

impl HttpGeoLookup {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("build reqwest client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl GeoLookupPort for HttpGeoLookup {
    async fn resolve(&self, ip: &str) -> Result<Option<GeoLocation>, RegistryServiceError> {
        let url = format!("{}/{}/json/", self.base_url, ip);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("geolocation request")?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let geo: GeoResponse = response.json().await.context("geolocation body")?;
        Ok(Some(GeoLocation {
            latitude: geo.latitude,
            longitude: geo.longitude,
            city: geo.city,
            country: geo.country_name,
        }))
    }
}
