use tracing::{info, instrument};

use crate::{
    LookupError,
    model::{Location, RawCurrentWeather, RawForecast},
    provider::{GeocodingProvider, WeatherProvider},
};

/// Everything fetched by one successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub location: Location,
    pub current: RawCurrentWeather,
    pub forecast: RawForecast,
}

/// Geocode `query`, then fetch current weather, then the forecast.
///
/// Each call completes before the next starts; the first failure aborts the
/// rest.
#[instrument(skip(geocoder, weather))]
pub async fn search(
    geocoder: &dyn GeocodingProvider,
    weather: &dyn WeatherProvider,
    query: &str,
) -> Result<SearchOutcome, LookupError> {
    let location = geocoder
        .geocode(query)
        .await?
        .ok_or_else(|| LookupError::NotFound(query.to_string()))?;

    let current = weather.get_current(location.latitude, location.longitude).await?;
    let forecast = weather.get_forecast(location.latitude, location.longitude).await?;

    info!(
        location = %location.label(),
        days = forecast.daily.len(),
        "Search complete"
    );

    Ok(SearchOutcome { location, current, forecast })
}
