use crate::{
    Config, LookupError,
    model::{Location, RawCurrentWeather, RawForecast},
    provider::{nominatim::NominatimGeocoder, open_meteo::OpenMeteoProvider},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::{convert::TryFrom, fmt::Debug, time::Duration};
use tracing::debug;

pub mod nominatim;
pub mod open_meteo;

/// Upstream services the core talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Nominatim,
    OpenMeteo,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::Nominatim => "nominatim",
            ServiceId::OpenMeteo => "open-meteo",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ServiceId::Nominatim => "https://nominatim.openstreetmap.org",
            ServiceId::OpenMeteo => "https://api.open-meteo.com/v1",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[ServiceId::Nominatim, ServiceId::OpenMeteo]
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "nominatim" => Ok(ServiceId::Nominatim),
            "open-meteo" | "openmeteo" => Ok(ServiceId::OpenMeteo),
            _ => Err(anyhow::anyhow!(
                "Unknown service '{value}'. Supported services: nominatim, open-meteo."
            )),
        }
    }
}

/// Resolves free-text place names to coordinates.
#[async_trait]
pub trait GeocodingProvider: Send + Sync + Debug {
    /// Best match for `query`, or `None` when nothing matches.
    async fn geocode(&self, query: &str) -> Result<Option<Location>, LookupError>;
}

/// Supplies raw weather data for coordinates. Returned series are sorted
/// ascending by time.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_current(&self, latitude: f64, longitude: f64)
    -> Result<RawCurrentWeather, LookupError>;

    async fn get_forecast(&self, latitude: f64, longitude: f64)
    -> Result<RawForecast, LookupError>;
}

/// The pair of providers a search needs.
#[derive(Debug)]
pub struct Providers {
    pub geocoder: Box<dyn GeocodingProvider>,
    pub weather: Box<dyn WeatherProvider>,
}

/// Construct both providers from config, sharing one HTTP client.
pub fn providers_from_config(config: &Config) -> anyhow::Result<Providers> {
    let http = Client::builder()
        .timeout(Duration::from_secs(config.http.timeout_secs))
        .user_agent(config.http.user_agent.as_str())
        .build()
        .context("Failed to build HTTP client")?;

    Ok(Providers {
        geocoder: Box::new(NominatimGeocoder::new(
            config.service_base_url(ServiceId::Nominatim),
            http.clone(),
        )),
        weather: Box::new(OpenMeteoProvider::new(
            config.service_base_url(ServiceId::OpenMeteo),
            http,
        )),
    })
}

/// GET `url` and decode a JSON body, mapping every failure to a fetch error.
pub(crate) async fn get_json<T, Q>(
    http: &Client,
    service: ServiceId,
    url: &str,
    query: &Q,
) -> Result<T, LookupError>
where
    T: DeserializeOwned,
    Q: serde::Serialize + ?Sized,
{
    debug!(%service, url, "Sending request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| LookupError::fetch(service, format!("request failed: {e}")))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| LookupError::fetch(service, format!("failed to read body: {e}")))?;

    if !status.is_success() {
        return Err(LookupError::fetch(
            service,
            format!("status {}: {}", status, truncate_body(&body)),
        ));
    }

    serde_json::from_str(&body)
        .map_err(|e| LookupError::fetch(service, format!("failed to parse JSON: {e}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
