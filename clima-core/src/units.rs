//! Unit conversion between the canonical metric storage units and the
//! user-selectable display units.
//!
//! Raw provider data is always stored in °C, km/h and mm. Conversions are
//! pure and total; rounding for display happens later, in the view layer.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

const MPH_PER_KMH: f64 = 0.621371;
const INCHES_PER_MM: f64 = 0.0393701;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} unit '{value}'. Supported units: {accepted}.")]
pub struct UnitParseError {
    kind: &'static str,
    value: String,
    accepted: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindUnit {
    #[default]
    Kmh,
    Mph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationUnit {
    #[default]
    Mm,
    Inches,
}

/// Display units chosen for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitPreferences {
    pub temperature: TemperatureUnit,
    pub wind: WindUnit,
    pub precipitation: PrecipitationUnit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
    }
}

impl WindUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindUnit::Kmh => "kmh",
            WindUnit::Mph => "mph",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WindUnit::Kmh => "km/h",
            WindUnit::Mph => "mph",
        }
    }

    pub const fn all() -> &'static [WindUnit] {
        &[WindUnit::Kmh, WindUnit::Mph]
    }
}

impl PrecipitationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrecipitationUnit::Mm => "mm",
            PrecipitationUnit::Inches => "inches",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrecipitationUnit::Mm => "mm",
            PrecipitationUnit::Inches => "in",
        }
    }

    pub const fn all() -> &'static [PrecipitationUnit] {
        &[PrecipitationUnit::Mm, PrecipitationUnit::Inches]
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WindUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PrecipitationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = UnitParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "celsius" | "c" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" | "f" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(UnitParseError {
                kind: "temperature",
                value: value.to_string(),
                accepted: "celsius, fahrenheit",
            }),
        }
    }
}

impl FromStr for WindUnit {
    type Err = UnitParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "kmh" | "km/h" => Ok(WindUnit::Kmh),
            "mph" => Ok(WindUnit::Mph),
            _ => Err(UnitParseError {
                kind: "wind speed",
                value: value.to_string(),
                accepted: "kmh, mph",
            }),
        }
    }
}

impl FromStr for PrecipitationUnit {
    type Err = UnitParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "mm" => Ok(PrecipitationUnit::Mm),
            "inches" | "in" => Ok(PrecipitationUnit::Inches),
            _ => Err(UnitParseError {
                kind: "precipitation",
                value: value.to_string(),
                accepted: "mm, inches",
            }),
        }
    }
}

pub fn convert_temperature(celsius: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    }
}

pub fn convert_wind_speed(kmh: f64, unit: WindUnit) -> f64 {
    match unit {
        WindUnit::Kmh => kmh,
        WindUnit::Mph => kmh * MPH_PER_KMH,
    }
}

pub fn convert_precipitation(mm: f64, unit: PrecipitationUnit) -> f64 {
    match unit {
        PrecipitationUnit::Mm => mm,
        PrecipitationUnit::Inches => mm * INCHES_PER_MM,
    }
}

/// Inverse of [`convert_temperature`].
pub fn to_celsius(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => value,
        TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
    }
}

/// Inverse of [`convert_wind_speed`].
pub fn to_kmh(value: f64, unit: WindUnit) -> f64 {
    match unit {
        WindUnit::Kmh => value,
        WindUnit::Mph => value / MPH_PER_KMH,
    }
}

/// Inverse of [`convert_precipitation`].
pub fn to_mm(value: f64, unit: PrecipitationUnit) -> f64 {
    match unit {
        PrecipitationUnit::Mm => value,
        PrecipitationUnit::Inches => value / INCHES_PER_MM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn fahrenheit_fixed_points() {
        assert_eq!(convert_temperature(0.0, TemperatureUnit::Fahrenheit), 32.0);
        assert_eq!(convert_temperature(100.0, TemperatureUnit::Fahrenheit), 212.0);
    }

    #[test]
    fn canonical_units_are_identity() {
        for x in [-40.0, -0.5, 0.0, 12.34, 1e6] {
            assert_eq!(convert_temperature(x, TemperatureUnit::Celsius), x);
            assert_eq!(convert_wind_speed(x, WindUnit::Kmh), x);
            assert_eq!(convert_precipitation(x, PrecipitationUnit::Mm), x);
        }
    }

    #[test]
    fn wind_and_precipitation_factors() {
        assert!((convert_wind_speed(100.0, WindUnit::Mph) - 62.1371).abs() < EPS);
        assert!((convert_precipitation(25.4, PrecipitationUnit::Inches) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn conversions_round_trip() {
        for x in [-40.0, -3.3, 0.0, 7.25, 35.0, 250.0] {
            for unit in TemperatureUnit::all() {
                let back = to_celsius(convert_temperature(x, *unit), *unit);
                assert!((back - x).abs() < EPS, "{unit}: {x} -> {back}");
            }
            for unit in WindUnit::all() {
                let back = to_kmh(convert_wind_speed(x, *unit), *unit);
                assert!((back - x).abs() < EPS, "{unit}: {x} -> {back}");
            }
            for unit in PrecipitationUnit::all() {
                let back = to_mm(convert_precipitation(x, *unit), *unit);
                assert!((back - x).abs() < EPS, "{unit}: {x} -> {back}");
            }
        }
    }

    #[test]
    fn units_parse_from_tags_and_aliases() {
        assert_eq!("fahrenheit".parse(), Ok(TemperatureUnit::Fahrenheit));
        assert_eq!("C".parse(), Ok(TemperatureUnit::Celsius));
        assert_eq!("mph".parse(), Ok(WindUnit::Mph));
        assert_eq!("in".parse(), Ok(PrecipitationUnit::Inches));

        for unit in TemperatureUnit::all() {
            assert_eq!(unit.as_str().parse(), Ok(*unit));
        }
    }

    #[test]
    fn unknown_unit_error_lists_accepted_values() {
        let err = "kelvin".parse::<TemperatureUnit>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("kelvin"));
        assert!(msg.contains("celsius, fahrenheit"));
    }

    #[test]
    fn labels() {
        assert_eq!(TemperatureUnit::Fahrenheit.label(), "F");
        assert_eq!(WindUnit::Kmh.label(), "km/h");
        assert_eq!(PrecipitationUnit::Inches.label(), "in");
    }
}
