use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{LookupError, model::Location};

use super::{GeocodingProvider, ServiceId, get_json};

/// Forward geocoding through the OpenStreetMap Nominatim search API.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string(), http }
    }
}

#[derive(Debug, Deserialize)]
struct NmPlace {
    lat: String,
    lon: String,
    display_name: String,
    address: Option<NmAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NmAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    county: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
}

impl NmPlace {
    fn into_location(self) -> Result<Location, LookupError> {
        let latitude = parse_coordinate(&self.lat)?;
        let longitude = parse_coordinate(&self.lon)?;
        let address = self.address.unwrap_or_default();

        let name = address
            .city
            .or(address.town)
            .or(address.village)
            .or(address.county)
            .unwrap_or_else(|| first_segment(&self.display_name));
        let country = address.country.unwrap_or_else(|| last_segment(&self.display_name));
        let country_code = address.country_code.map(|c| c.to_uppercase()).unwrap_or_default();

        Ok(Location { name, country, country_code, latitude, longitude })
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, LookupError> {
    raw.trim().parse().map_err(|_| {
        LookupError::fetch(ServiceId::Nominatim, format!("invalid coordinate '{raw}'"))
    })
}

fn first_segment(display_name: &str) -> String {
    display_name.split(',').next().unwrap_or_default().trim().to_string()
}

fn last_segment(display_name: &str) -> String {
    display_name.split(',').next_back().unwrap_or_default().trim().to_string()
}

#[async_trait]
impl GeocodingProvider for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Option<Location>, LookupError> {
        let url = format!("{}/search", self.base_url);

        let places: Vec<NmPlace> = get_json(
            &self.http,
            ServiceId::Nominatim,
            &url,
            &[("format", "json"), ("addressdetails", "1"), ("limit", "1"), ("q", query)],
        )
        .await?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let location = place.into_location()?;
        info!(location = %location.label(), "Resolved location");
        Ok(Some(location))
    }
}
