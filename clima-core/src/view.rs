//! Presentation-ready view models built from raw provider data.
//!
//! Every builder here is a pure function of raw data, unit preferences and
//! day selection. Callers only invoke them once data has been fetched; the
//! "no data yet" case is expressed by [`crate::Session::render`] returning
//! `None`.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::{
    condition::{ConditionCategory, classify, is_day},
    locale,
    model::{Location, RawCurrentWeather, RawForecast},
    units::{UnitPreferences, convert_precipitation, convert_temperature, convert_wind_speed},
    window::select_day_hours,
};

/// Number of forecast days shown by default.
pub const DEFAULT_DAY_COUNT: usize = 7;

/// Shown in place of a missing humidity reading.
pub const MISSING_VALUE: &str = "--";

/// Icon and description resolved for one condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionView {
    pub category: ConditionCategory,
    pub icon: String,
    pub description: &'static str,
}

impl From<ConditionCategory> for ConditionView {
    fn from(category: ConditionCategory) -> Self {
        Self { category, icon: category.icon(), description: category.describe() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    pub location_label: String,
    pub date_label: String,
    pub condition: ConditionView,
    pub temperature: i64,
    pub temperature_unit: &'static str,
    /// Same as `temperature`: the upstream free tier has no apparent temperature.
    pub feels_like: i64,
    pub humidity: String,
    pub wind_speed: i64,
    pub wind_unit: &'static str,
    /// One decimal place.
    pub precipitation: String,
    pub precipitation_unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub label: String,
    pub condition: ConditionView,
    pub max: i64,
    pub min: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTab {
    pub index: usize,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyItem {
    pub label: String,
    pub condition: ConditionView,
    pub temperature: i64,
}

/// Display knobs that are not unit choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    pub day_count: usize,
    pub hourly_stride: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { day_count: DEFAULT_DAY_COUNT, hourly_stride: crate::window::DEFAULT_STRIDE }
    }
}

impl DisplaySettings {
    /// Both knobs are at least 1; zero would leave nothing to select or step by.
    pub fn new(day_count: usize, hourly_stride: usize) -> Self {
        Self { day_count: day_count.max(1), hourly_stride: hourly_stride.max(1) }
    }
}

/// Everything a presentation layer needs for one screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub current: CurrentView,
    pub daily: Vec<DailySummary>,
    pub days: Vec<DayTab>,
    pub selected_day: usize,
    pub hourly: Vec<HourlyItem>,
}

/// Round half up, matching the usual display convention (`-0.5` becomes `0`).
pub fn round_display(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn build_current_view(
    raw: &RawCurrentWeather,
    location: &Location,
    prefs: &UnitPreferences,
) -> CurrentView {
    let daytime = match (raw.sunrise.first(), raw.sunset.first()) {
        (Some(sunrise), Some(sunset)) => is_day(raw.time, *sunrise, *sunset),
        // No sun schedule: assume daytime, as the forecast strips do.
        _ => true,
    };
    let category = classify(raw.weather_code, daytime);

    // The hourly series starts at local midnight, so the hour is also the index.
    let hour = raw.time.hour() as usize;
    let observation = raw.hourly.get(hour);

    let temperature = round_display(convert_temperature(raw.temperature_c, prefs.temperature));
    let precipitation_mm = observation.and_then(|o| o.precipitation_mm).unwrap_or(0.0);
    let humidity = observation
        .and_then(|o| o.relative_humidity_pct)
        .map(|h| round_display(h).to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string());

    CurrentView {
        location_label: location.label(),
        date_label: locale::long_date(raw.time),
        condition: category.into(),
        temperature,
        temperature_unit: prefs.temperature.label(),
        feels_like: temperature,
        humidity,
        wind_speed: round_display(convert_wind_speed(raw.wind_speed_kmh, prefs.wind)),
        wind_unit: prefs.wind.label(),
        precipitation: format!(
            "{:.1}",
            convert_precipitation(precipitation_mm, prefs.precipitation)
        ),
        precipitation_unit: prefs.precipitation.label(),
    }
}

/// Up to `count` daily summaries. Icons always use the day variant.
pub fn build_daily_summaries(
    forecast: &RawForecast,
    prefs: &UnitPreferences,
    count: usize,
) -> Vec<DailySummary> {
    forecast
        .daily
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, day)| DailySummary {
            label: locale::day_label(i, day.date),
            condition: classify(day.weather_code, true).into(),
            max: round_display(convert_temperature(day.temperature_max_c, prefs.temperature)),
            min: round_display(convert_temperature(day.temperature_min_c, prefs.temperature)),
        })
        .collect()
}

pub fn build_day_selector(forecast: &RawForecast, selected: usize, count: usize) -> Vec<DayTab> {
    forecast
        .daily
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, day)| DayTab {
            index: i,
            label: locale::day_label(i, day.date),
            active: i == selected,
        })
        .collect()
}

/// Sampled hours of the selected day. Icons always use the day variant, even
/// for night hours. An out-of-range day yields an empty strip.
pub fn build_hourly_view(
    forecast: &RawForecast,
    selected_day: usize,
    prefs: &UnitPreferences,
    stride: usize,
) -> Vec<HourlyItem> {
    let Some(day) = forecast.daily.get(selected_day) else {
        return Vec::new();
    };
    let day_start = day.date.and_time(NaiveTime::MIN);

    select_day_hours(&forecast.hourly, day_start, stride)
        .into_iter()
        .map(|hour| HourlyItem {
            label: locale::hour_label(hour.time),
            condition: classify(hour.weather_code, true).into(),
            temperature: round_display(convert_temperature(hour.temperature_c, prefs.temperature)),
        })
        .collect()
}
