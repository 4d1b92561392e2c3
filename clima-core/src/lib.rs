//! Core library for the `clima` weather lookup tool.
//!
//! This crate defines:
//! - Unit conversion and WMO weather-code classification
//! - Selection of a day's hours from an hourly series
//! - View-model builders and explicit session state
//! - Geocoding and weather provider abstractions, with Nominatim and
//!   Open-Meteo implementations
//! - Configuration handling
//!
//! It is used by `clima-cli`, but can also be reused by other front ends.

pub mod condition;
pub mod config;
pub mod error;
pub mod locale;
pub mod model;
pub mod provider;
pub mod search;
pub mod session;
pub mod units;
pub mod view;
pub mod window;

pub use condition::{ConditionCategory, classify, is_day};
pub use config::Config;
pub use error::LookupError;
pub use model::{
    DailyRecord, HourlyObservation, HourlyRecord, Location, RawCurrentWeather, RawForecast,
};
pub use provider::{GeocodingProvider, Providers, ServiceId, WeatherProvider, providers_from_config};
pub use search::{SearchOutcome, search};
pub use session::{SearchApplied, SearchStatus, SearchTicket, Session};
pub use units::{PrecipitationUnit, TemperatureUnit, UnitPreferences, WindUnit};
pub use view::{DisplaySettings, WeatherView};
pub use window::select_day_hours;
