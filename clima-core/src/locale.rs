//! pt-BR calendar labels.

use chrono::{Locale, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const LOCALE: Locale = Locale::pt_BR;

/// Label used for the first forecast day, whatever its weekday.
pub const TODAY: &str = "Hoje";

/// Long date, e.g. `segunda, 15 de janeiro de 2024`.
pub fn long_date(time: NaiveDateTime) -> String {
    // Local wall time; the zone only satisfies the formatter and is never printed.
    Utc.from_utc_datetime(&time)
        .format_localized("%A, %-d de %B de %Y", LOCALE)
        .to_string()
}

/// Abbreviated weekday, e.g. `seg`.
pub fn short_weekday(date: NaiveDate) -> String {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
        .format_localized("%a", LOCALE)
        .to_string()
}

/// Tab label for the `index`-th forecast day.
pub fn day_label(index: usize, date: NaiveDate) -> String {
    if index == 0 { TODAY.to_string() } else { short_weekday(date) }
}

/// 24-hour clock label, e.g. `09:00`.
pub fn hour_label(time: NaiveDateTime) -> String {
    time.format("%H:00").to_string()
}
