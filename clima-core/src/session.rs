//! Explicit state for one user session.
//!
//! Network results, unit choices and the selected day all live here; the
//! view is recomputed from them on every [`Session::render`].

use tracing::{debug, warn};

use crate::{
    LookupError,
    model::{Location, RawCurrentWeather, RawForecast},
    search::SearchOutcome,
    units::{PrecipitationUnit, TemperatureUnit, UnitPreferences, WindUnit},
    view::{
        DisplaySettings, WeatherView, build_current_view, build_daily_summaries,
        build_day_selector, build_hourly_view,
    },
};

/// Shown for every failed search, whatever the cause.
pub const SEARCH_ERROR_MESSAGE: &str =
    "Não foi possível obter os dados do clima. Verifique o local e tente novamente.";

/// Query used when a session starts without one.
pub const DEFAULT_QUERY: &str = "São Paulo, BR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Proof that a search was started; only the newest ticket may apply results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Whether [`Session::finish_search`] used the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchApplied {
    Fresh,
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    current: RawCurrentWeather,
    forecast: RawForecast,
}

#[derive(Debug, Clone)]
pub struct Session {
    location: Location,
    snapshot: Option<Snapshot>,
    units: UnitPreferences,
    selected_day: usize,
    display: DisplaySettings,
    status: SearchStatus,
    latest_seq: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DisplaySettings::default())
    }
}

impl Session {
    pub fn new(display: DisplaySettings) -> Self {
        Self {
            location: Location::sao_paulo(),
            snapshot: None,
            units: UnitPreferences::default(),
            selected_day: 0,
            display: DisplaySettings::new(display.day_count, display.hourly_stride),
            status: SearchStatus::Idle,
            latest_seq: 0,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn units(&self) -> UnitPreferences {
        self.units
    }

    pub fn selected_day(&self) -> usize {
        self.selected_day
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn has_data(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Start a search for `query`. A blank query does nothing.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.latest_seq += 1;
        self.status = SearchStatus::Loading;
        debug!(seq = self.latest_seq, query, "Search started");

        Some(SearchTicket { seq: self.latest_seq, query: query.to_string() })
    }

    /// Apply the result of the search identified by `ticket`.
    ///
    /// Results from anything but the most recent search are dropped. Applying
    /// always leaves the loading state.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<SearchOutcome, LookupError>,
    ) -> SearchApplied {
        if ticket.seq != self.latest_seq {
            warn!(seq = ticket.seq, latest = self.latest_seq, "Discarding stale search result");
            return SearchApplied::Stale;
        }

        match outcome {
            Ok(outcome) => {
                self.location = outcome.location;
                self.snapshot =
                    Some(Snapshot { current: outcome.current, forecast: outcome.forecast });
                self.selected_day = self.clamp_day(self.selected_day);
                self.status = SearchStatus::Ready;
            }
            Err(err) => {
                warn!(query = %ticket.query, error = %err, "Search failed");
                self.status = SearchStatus::Failed(SEARCH_ERROR_MESSAGE.to_string());
            }
        }

        SearchApplied::Fresh
    }

    pub fn set_units(&mut self, units: UnitPreferences) {
        self.units = units;
    }

    pub fn set_temperature_unit(&mut self, unit: TemperatureUnit) {
        self.units.temperature = unit;
    }

    pub fn set_wind_unit(&mut self, unit: WindUnit) {
        self.units.wind = unit;
    }

    pub fn set_precipitation_unit(&mut self, unit: PrecipitationUnit) {
        self.units.precipitation = unit;
    }

    /// Select a forecast day, clamped into the available range. Returns the
    /// index actually selected.
    pub fn select_day(&mut self, index: usize) -> usize {
        self.selected_day = self.clamp_day(index);
        self.selected_day
    }

    /// Number of days that can currently be selected.
    pub fn day_count(&self) -> usize {
        self.snapshot
            .as_ref()
            .map_or(self.display.day_count, |s| s.forecast.daily.len().min(self.display.day_count))
    }

    fn clamp_day(&self, index: usize) -> usize {
        index.min(self.day_count().saturating_sub(1))
    }

    /// The full view, or `None` until a search has succeeded and while the
    /// latest search is loading or failed.
    pub fn render(&self) -> Option<WeatherView> {
        if self.status != SearchStatus::Ready {
            return None;
        }
        let snapshot = self.snapshot.as_ref()?;
        let count = self.display.day_count;

        let hourly = if self.selected_day < self.day_count() {
            build_hourly_view(
                &snapshot.forecast,
                self.selected_day,
                &self.units,
                self.display.hourly_stride,
            )
        } else {
            Vec::new()
        };

        Some(WeatherView {
            current: build_current_view(&snapshot.current, &self.location, &self.units),
            daily: build_daily_summaries(&snapshot.forecast, &self.units, count),
            days: build_day_selector(&snapshot.forecast, self.selected_day, count),
            selected_day: self.selected_day,
            hourly,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{DailyRecord, HourlyRecord},
        provider::ServiceId,
    };
    use chrono::{Duration, NaiveDate};

    fn outcome(name: &str, days: u32) -> SearchOutcome {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        let midnight = start.and_hms_opt(0, 0, 0).expect("valid time");

        let daily = (0..days)
            .map(|i| DailyRecord {
                date: start + Duration::days(i64::from(i)),
                weather_code: 0,
                temperature_max_c: 25.0,
                temperature_min_c: 15.0,
            })
            .collect();
        let hourly = (0..i64::from(days) * 24)
            .map(|h| HourlyRecord {
                time: midnight + Duration::hours(h),
                temperature_c: 20.0,
                weather_code: 3,
            })
            .collect();

        SearchOutcome {
            location: Location {
                name: name.to_string(),
                country: "Brasil".to_string(),
                country_code: "BR".to_string(),
                latitude: 0.0,
                longitude: 0.0,
            },
            current: RawCurrentWeather {
                time: midnight + Duration::hours(12),
                temperature_c: 20.0,
                wind_speed_kmh: 10.0,
                weather_code: 0,
                sunrise: vec![midnight + Duration::hours(6)],
                sunset: vec![midnight + Duration::hours(18)],
                hourly: Vec::new(),
            },
            forecast: RawForecast { daily, hourly },
        }
    }

    #[test]
    fn new_session_has_default_location_and_no_view() {
        let session = Session::default();
        assert_eq!(session.location().label(), "São Paulo, BR");
        assert_eq!(session.status(), &SearchStatus::Idle);
        assert!(session.render().is_none());
    }

    #[test]
    fn blank_query_is_a_no_op() {
        let mut session = Session::default();
        assert!(session.begin_search("   ").is_none());
        assert_eq!(session.status(), &SearchStatus::Idle);
    }

    #[test]
    fn successful_search_renders() {
        let mut session = Session::default();
        let ticket = session.begin_search(" Recife ").unwrap();
        assert_eq!(ticket.query(), "Recife");
        assert_eq!(session.status(), &SearchStatus::Loading);

        let applied = session.finish_search(ticket, Ok(outcome("Recife", 7)));
        assert_eq!(applied, SearchApplied::Fresh);

        let view = session.render().unwrap();
        assert_eq!(view.current.location_label, "Recife, BR");
        assert_eq!(view.daily.len(), 7);
        assert_eq!(view.hourly.len(), 8);
        assert_eq!(session.status(), &SearchStatus::Ready);
    }

    #[test]
    fn failure_clears_loading_and_hides_view() {
        let mut session = Session::default();
        let ticket = session.begin_search("Nowhere").unwrap();
        session.finish_search(ticket, Err(LookupError::NotFound("Nowhere".into())));

        assert_eq!(session.status(), &SearchStatus::Failed(SEARCH_ERROR_MESSAGE.to_string()));
        assert!(session.render().is_none());
    }

    #[test]
    fn fetch_and_not_found_share_one_message() {
        let mut a = Session::default();
        let t = a.begin_search("x").unwrap();
        a.finish_search(t, Err(LookupError::fetch(ServiceId::OpenMeteo, "status 500")));

        let mut b = Session::default();
        let t = b.begin_search("x").unwrap();
        b.finish_search(t, Err(LookupError::NotFound("x".into())));

        assert_eq!(a.status(), b.status());
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut session = Session::default();
        let first = session.begin_search("Lisboa").unwrap();
        let second = session.begin_search("Porto").unwrap();

        let newest = session.finish_search(second, Ok(outcome("Porto", 7)));
        let older = session.finish_search(first, Ok(outcome("Lisboa", 7)));
        assert_eq!(newest, SearchApplied::Fresh);
        assert_eq!(older, SearchApplied::Stale);

        assert_eq!(session.location().name, "Porto");
    }

    #[test]
    fn unit_change_rerenders_without_new_data() {
        let mut session = Session::default();
        let ticket = session.begin_search("Recife").unwrap();
        session.finish_search(ticket, Ok(outcome("Recife", 7)));

        assert_eq!(session.render().unwrap().current.temperature, 20);

        session.set_temperature_unit(TemperatureUnit::Fahrenheit);
        let view = session.render().unwrap();
        assert_eq!(view.current.temperature, 68);
        assert_eq!(view.daily[0].max, 77);
    }

    #[test]
    fn day_selection_is_clamped_to_fetched_range() {
        let mut session = Session::default();
        let ticket = session.begin_search("Recife").unwrap();
        session.finish_search(ticket, Ok(outcome("Recife", 5)));

        assert_eq!(session.select_day(3), 3);
        assert_eq!(session.select_day(9), 4);

        let view = session.render().unwrap();
        assert_eq!(view.selected_day, 4);
        assert!(view.days[4].active);
    }

    #[test]
    fn zero_day_count_still_offers_today() {
        let mut session = Session::new(DisplaySettings { day_count: 0, hourly_stride: 0 });
        let ticket = session.begin_search("Recife").unwrap();
        session.finish_search(ticket, Ok(outcome("Recife", 7)));

        let view = session.render().unwrap();
        assert_eq!(session.day_count(), 1);
        assert_eq!(view.daily.len(), 1);
        assert_eq!(view.days.len(), 1);
        assert!(view.days[0].active);
        assert_eq!(view.selected_day, 0);
        assert_eq!(view.hourly.len(), 24);
    }

    #[test]
    fn empty_forecast_has_no_hourly_strip() {
        let mut session = Session::default();
        let ticket = session.begin_search("Recife").unwrap();
        session.finish_search(ticket, Ok(outcome("Recife", 0)));

        let view = session.render().unwrap();
        assert_eq!(session.day_count(), 0);
        assert!(view.days.is_empty());
        assert!(view.hourly.is_empty());
        assert_eq!(view.selected_day, 0);
    }

    #[test]
    fn new_search_keeps_selection_within_bounds() {
        let mut session = Session::default();
        let t = session.begin_search("A").unwrap();
        session.finish_search(t, Ok(outcome("A", 7)));
        session.select_day(6);

        let t = session.begin_search("B").unwrap();
        session.finish_search(t, Ok(outcome("B", 3)));
        assert_eq!(session.selected_day(), 2);
    }
}
