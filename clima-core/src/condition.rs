//! Classification of WMO weather-interpretation codes into display categories.
//!
//! See <https://open-meteo.com/en/docs> for the code table.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

const ICON_DIR: &str = "./assets/images";

/// Fallback text for tags that do not name any category.
pub const UNKNOWN_DESCRIPTION: &str = "Desconhecido";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionCategory {
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Overcast,
    Rain,
    Drizzle,
    Snow,
    Fog,
    Wind,
    Thunderstorm,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown condition category '{0}'")]
pub struct CategoryParseError(String);

impl ConditionCategory {
    pub const fn all() -> &'static [ConditionCategory] {
        &[
            ConditionCategory::ClearDay,
            ConditionCategory::ClearNight,
            ConditionCategory::PartlyCloudyDay,
            ConditionCategory::PartlyCloudyNight,
            ConditionCategory::Cloudy,
            ConditionCategory::Overcast,
            ConditionCategory::Rain,
            ConditionCategory::Drizzle,
            ConditionCategory::Snow,
            ConditionCategory::Fog,
            ConditionCategory::Wind,
            ConditionCategory::Thunderstorm,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionCategory::ClearDay => "clear-day",
            ConditionCategory::ClearNight => "clear-night",
            ConditionCategory::PartlyCloudyDay => "partly-cloudy-day",
            ConditionCategory::PartlyCloudyNight => "partly-cloudy-night",
            ConditionCategory::Cloudy => "cloudy",
            ConditionCategory::Overcast => "overcast",
            ConditionCategory::Rain => "rain",
            ConditionCategory::Drizzle => "drizzle",
            ConditionCategory::Snow => "snow",
            ConditionCategory::Fog => "fog",
            ConditionCategory::Wind => "wind",
            ConditionCategory::Thunderstorm => "thunderstorm",
        }
    }

    /// Localized (pt-BR) description shown under the icon.
    pub fn describe(&self) -> &'static str {
        match self {
            ConditionCategory::ClearDay | ConditionCategory::ClearNight => "Céu limpo",
            ConditionCategory::PartlyCloudyDay | ConditionCategory::PartlyCloudyNight => {
                "Parcialmente nublado"
            }
            ConditionCategory::Cloudy => "Nublado",
            ConditionCategory::Overcast => "Encoberto",
            ConditionCategory::Rain => "Chuva",
            ConditionCategory::Drizzle => "Garoa",
            ConditionCategory::Snow => "Neve",
            ConditionCategory::Fog => "Neblina",
            ConditionCategory::Wind => "Ventoso",
            ConditionCategory::Thunderstorm => "Tempestade",
        }
    }

    /// Icon asset file name. Night variants reuse the day artwork.
    pub fn icon_file(&self) -> &'static str {
        match self {
            ConditionCategory::ClearDay
            | ConditionCategory::ClearNight
            | ConditionCategory::Wind => "icon-sunny.webp",
            ConditionCategory::PartlyCloudyDay | ConditionCategory::PartlyCloudyNight => {
                "icon-partly-cloudy.webp"
            }
            ConditionCategory::Cloudy | ConditionCategory::Overcast => "icon-overcast.webp",
            ConditionCategory::Rain => "icon-rain.webp",
            ConditionCategory::Drizzle => "icon-drizzle.webp",
            ConditionCategory::Snow => "icon-snow.webp",
            ConditionCategory::Fog => "icon-fog.webp",
            ConditionCategory::Thunderstorm => "icon-storm.webp",
        }
    }

    /// Icon asset path relative to the presentation root.
    pub fn icon(&self) -> String {
        format!("{ICON_DIR}/{}", self.icon_file())
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionCategory {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ConditionCategory::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| CategoryParseError(value.to_string()))
    }
}

/// Map a WMO code to its category. Unknown codes fall back to clear sky.
pub fn classify(code: i32, is_day: bool) -> ConditionCategory {
    match code {
        0 => clear(is_day),
        1..=3 => {
            if is_day {
                ConditionCategory::PartlyCloudyDay
            } else {
                ConditionCategory::PartlyCloudyNight
            }
        }
        45 | 48 => ConditionCategory::Fog,
        51 | 53 | 55 | 56 | 57 => ConditionCategory::Drizzle,
        61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => ConditionCategory::Rain,
        71 | 73 | 75 | 77 | 85 | 86 => ConditionCategory::Snow,
        95 | 96 | 99 => ConditionCategory::Thunderstorm,
        _ => clear(is_day),
    }
}

fn clear(is_day: bool) -> ConditionCategory {
    if is_day { ConditionCategory::ClearDay } else { ConditionCategory::ClearNight }
}

/// `true` when `time` falls within `[sunrise, sunset]`, both ends inclusive.
pub fn is_day(time: NaiveDateTime, sunrise: NaiveDateTime, sunset: NaiveDateTime) -> bool {
    time >= sunrise && time <= sunset
}

/// Description lookup by raw tag, for callers holding a serialized category.
pub fn describe_tag(tag: &str) -> &'static str {
    tag.parse::<ConditionCategory>()
        .map(|c| c.describe())
        .unwrap_or(UNKNOWN_DESCRIPTION)
}

/// Icon lookup by raw tag; unknown tags get the clear-day icon.
pub fn icon_for_tag(tag: &str) -> String {
    tag.parse::<ConditionCategory>()
        .unwrap_or(ConditionCategory::ClearDay)
        .icon()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .expect("valid test time")
    }

    #[test]
    fn clear_sky_has_day_and_night_variants() {
        assert_eq!(classify(0, true), ConditionCategory::ClearDay);
        assert_eq!(classify(0, false), ConditionCategory::ClearNight);
    }

    #[test]
    fn partly_cloudy_codes() {
        for code in [1, 2, 3] {
            assert_eq!(classify(code, true), ConditionCategory::PartlyCloudyDay);
            assert_eq!(classify(code, false), ConditionCategory::PartlyCloudyNight);
        }
    }

    #[test]
    fn drizzle_ignores_time_of_day() {
        for code in [51, 53, 55, 56, 57] {
            assert_eq!(classify(code, true), ConditionCategory::Drizzle);
            assert_eq!(classify(code, false), ConditionCategory::Drizzle);
        }
    }

    #[test]
    fn precipitation_and_storm_codes() {
        let table: &[(&[i32], ConditionCategory)] = &[
            (&[45, 48], ConditionCategory::Fog),
            (&[61, 63, 65, 66, 67, 80, 81, 82], ConditionCategory::Rain),
            (&[71, 73, 75, 77, 85, 86], ConditionCategory::Snow),
            (&[95, 96, 99], ConditionCategory::Thunderstorm),
        ];

        for (codes, expected) in table {
            for code in *codes {
                assert_eq!(classify(*code, true), *expected, "code {code}");
                assert_eq!(classify(*code, false), *expected, "code {code}");
            }
        }
    }

    #[test]
    fn unknown_codes_fall_back_to_clear() {
        for code in [999, 4, 50, -1] {
            assert_eq!(classify(code, true), ConditionCategory::ClearDay);
            assert_eq!(classify(code, false), ConditionCategory::ClearNight);
        }
    }

    #[test]
    fn is_day_bounds_are_inclusive() {
        let sunrise = at(6, 0);
        let sunset = at(18, 0);

        assert!(is_day(at(12, 0), sunrise, sunset));
        assert!(is_day(sunrise, sunrise, sunset));
        assert!(is_day(sunset, sunrise, sunset));
        assert!(!is_day(at(5, 59), sunrise, sunset));
        assert!(!is_day(at(18, 1), sunrise, sunset));
    }

    #[test]
    fn every_category_has_description_and_icon() {
        for category in ConditionCategory::all() {
            assert_ne!(category.describe(), UNKNOWN_DESCRIPTION);
            assert!(category.icon().ends_with(".webp"));
            assert_eq!(category.as_str().parse(), Ok(*category));
        }
        assert_eq!(ConditionCategory::all().len(), 12);
    }

    #[test]
    fn tag_lookups_fall_back_for_unknown_tags() {
        assert_eq!(describe_tag("rain"), "Chuva");
        assert_eq!(describe_tag("hail"), UNKNOWN_DESCRIPTION);
        assert_eq!(icon_for_tag("fog"), "./assets/images/icon-fog.webp");
        assert_eq!(icon_for_tag("hail"), "./assets/images/icon-sunny.webp");
    }

    #[test]
    fn category_serializes_as_kebab_tag() {
        let json = serde_json::to_string(&ConditionCategory::PartlyCloudyNight).unwrap();
        assert_eq!(json, "\"partly-cloudy-night\"");
    }
}
