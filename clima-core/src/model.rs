use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A geocoded place. Produced once per search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// Upper-cased ISO 3166-1 alpha-2 code, empty when the geocoder omits it.
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Location shown before the first search completes.
    pub fn sao_paulo() -> Self {
        Self {
            name: "São Paulo".to_string(),
            country: "Brasil".to_string(),
            country_code: "BR".to_string(),
            latitude: -23.5505,
            longitude: -46.6333,
        }
    }

    /// Label in the `"{name}, {countryCode}"` form.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country_code)
    }
}

/// One hour of the series that accompanies current conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyObservation {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub relative_humidity_pct: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub weather_code: i32,
}

/// Current conditions, all values in canonical metric units and local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCurrentWeather {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub weather_code: i32,
    /// Daily sunrise times; index 0 is today.
    pub sunrise: Vec<NaiveDateTime>,
    pub sunset: Vec<NaiveDateTime>,
    pub hourly: Vec<HourlyObservation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temperature_max_c: f64,
    pub temperature_min_c: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub weather_code: i32,
}

/// Multi-day forecast. Both series are sorted ascending by time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawForecast {
    pub daily: Vec<DailyRecord>,
    pub hourly: Vec<HourlyRecord>,
}
