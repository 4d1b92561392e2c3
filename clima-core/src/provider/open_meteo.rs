use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    LookupError,
    model::{DailyRecord, HourlyObservation, HourlyRecord, RawCurrentWeather, RawForecast},
};

use super::{ServiceId, WeatherProvider, get_json};

const CURRENT_DAILY: &str = "sunrise,sunset";
const CURRENT_HOURLY: &str =
    "temperature_2m,relativehumidity_2m,windspeed_10m,precipitation,weathercode";
const FORECAST_DAILY: &str = "weathercode,temperature_2m_max,temperature_2m_min";
const FORECAST_HOURLY: &str = "temperature_2m,weathercode";

/// Current conditions and forecasts from the Open-Meteo `/forecast` endpoint.
///
/// Every request asks for `timezone=auto`, so all timestamps come back as
/// naive local times of the queried place.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    base_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string(), http }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        latitude: f64,
        longitude: f64,
        extra: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let url = format!("{}/forecast", self.base_url);
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();

        let mut query = vec![
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("timezone", "auto"),
        ];
        query.extend_from_slice(extra);

        get_json(&self.http, ServiceId::OpenMeteo, &url, &query).await
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    time: String,
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
}

#[derive(Debug, Deserialize)]
struct OmSunDaily {
    #[serde(default)]
    sunrise: Vec<String>,
    #[serde(default)]
    sunset: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentHourly {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    relativehumidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    windspeed_10m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    weathercode: Vec<Option<i32>>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentResponse {
    current_weather: OmCurrentWeather,
    daily: OmSunDaily,
    hourly: OmCurrentHourly,
}

#[derive(Debug, Deserialize)]
struct OmForecastDaily {
    time: Vec<String>,
    weathercode: Vec<Option<i32>>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmForecastHourly {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    weathercode: Vec<Option<i32>>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    daily: OmForecastDaily,
    hourly: OmForecastHourly,
}

fn parse_time(raw: &str) -> Result<NaiveDateTime, LookupError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| LookupError::fetch(ServiceId::OpenMeteo, format!("invalid time '{raw}': {e}")))
}

fn parse_date(raw: &str) -> Result<NaiveDate, LookupError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| LookupError::fetch(ServiceId::OpenMeteo, format!("invalid date '{raw}': {e}")))
}

/// Value `i` of a column that every row must have.
fn required<T: Copy>(column: &[Option<T>], i: usize, name: &str) -> Result<T, LookupError> {
    column.get(i).copied().flatten().ok_or_else(|| {
        LookupError::fetch(ServiceId::OpenMeteo, format!("missing {name} at row {i}"))
    })
}

/// Value `i` of a column that may be short or contain nulls.
fn optional<T: Copy>(column: &[Option<T>], i: usize) -> Option<T> {
    column.get(i).copied().flatten()
}

impl OmCurrentResponse {
    fn into_raw(self) -> Result<RawCurrentWeather, LookupError> {
        let current = self.current_weather;
        let hourly = &self.hourly;

        let observations = hourly
            .time
            .iter()
            .enumerate()
            .map(|(i, time)| {
                Ok(HourlyObservation {
                    time: parse_time(time)?,
                    temperature_c: required(&hourly.temperature_2m, i, "temperature_2m")?,
                    relative_humidity_pct: optional(&hourly.relativehumidity_2m, i),
                    wind_speed_kmh: optional(&hourly.windspeed_10m, i),
                    precipitation_mm: optional(&hourly.precipitation, i),
                    weather_code: required(&hourly.weathercode, i, "weathercode")?,
                })
            })
            .collect::<Result<Vec<_>, LookupError>>()?;

        Ok(RawCurrentWeather {
            time: parse_time(&current.time)?,
            temperature_c: current.temperature,
            wind_speed_kmh: current.windspeed,
            weather_code: current.weathercode,
            sunrise: self.daily.sunrise.iter().map(|s| parse_time(s)).collect::<Result<_, _>>()?,
            sunset: self.daily.sunset.iter().map(|s| parse_time(s)).collect::<Result<_, _>>()?,
            hourly: observations,
        })
    }
}

impl OmForecastResponse {
    fn into_raw(self) -> Result<RawForecast, LookupError> {
        let daily = &self.daily;
        let hourly = &self.hourly;

        let days = daily
            .time
            .iter()
            .enumerate()
            .map(|(i, date)| {
                Ok(DailyRecord {
                    date: parse_date(date)?,
                    weather_code: required(&daily.weathercode, i, "weathercode")?,
                    temperature_max_c: required(
                        &daily.temperature_2m_max,
                        i,
                        "temperature_2m_max",
                    )?,
                    temperature_min_c: required(
                        &daily.temperature_2m_min,
                        i,
                        "temperature_2m_min",
                    )?,
                })
            })
            .collect::<Result<Vec<_>, LookupError>>()?;

        let hours = hourly
            .time
            .iter()
            .enumerate()
            .map(|(i, time)| {
                Ok(HourlyRecord {
                    time: parse_time(time)?,
                    temperature_c: required(&hourly.temperature_2m, i, "temperature_2m")?,
                    weather_code: required(&hourly.weathercode, i, "weathercode")?,
                })
            })
            .collect::<Result<Vec<_>, LookupError>>()?;

        Ok(RawForecast { daily: days, hourly: hours })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[instrument(skip(self))]
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<RawCurrentWeather, LookupError> {
        let parsed: OmCurrentResponse = self
            .fetch(
                latitude,
                longitude,
                &[
                    ("current_weather", "true"),
                    ("daily", CURRENT_DAILY),
                    ("hourly", CURRENT_HOURLY),
                ],
            )
            .await?;

        let raw = parsed.into_raw()?;
        debug!(time = %raw.time, code = raw.weather_code, "Fetched current weather");
        Ok(raw)
    }

    #[instrument(skip(self))]
    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<RawForecast, LookupError> {
        let parsed: OmForecastResponse = self
            .fetch(latitude, longitude, &[("daily", FORECAST_DAILY), ("hourly", FORECAST_HOURLY)])
            .await?;

        let raw = parsed.into_raw()?;
        debug!(days = raw.daily.len(), hours = raw.hourly.len(), "Fetched forecast");
        Ok(raw)
    }
}
