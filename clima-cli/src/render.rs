//! Plain-text rendering of the weather view.

use std::fmt::Write;

use clima_core::{WeatherView, view::MISSING_VALUE};

pub fn weather(view: &WeatherView) -> String {
    let mut out = String::new();
    let c = &view.current;

    let _ = writeln!(out, "{}", c.location_label);
    let _ = writeln!(out, "{}", c.date_label);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {}°{}  {}  [{}]",
        c.temperature, c.temperature_unit, c.condition.description, c.condition.category
    );
    let _ = writeln!(out, "  Sensação térmica  {}°{}", c.feels_like, c.temperature_unit);
    if c.humidity == MISSING_VALUE {
        let _ = writeln!(out, "  Umidade           {MISSING_VALUE}");
    } else {
        let _ = writeln!(out, "  Umidade           {}%", c.humidity);
    }
    let _ = writeln!(out, "  Vento             {} {}", c.wind_speed, c.wind_unit);
    let _ = writeln!(out, "  Precipitação      {} {}", c.precipitation, c.precipitation_unit);
    let _ = writeln!(out);

    let _ = writeln!(out, "Previsão diária");
    for day in &view.daily {
        let _ = writeln!(
            out,
            "  {:<6} {:>4}° {:>4}°  {}",
            day.label, day.max, day.min, day.condition.description
        );
    }
    let _ = writeln!(out);

    let tabs: Vec<String> = view
        .days
        .iter()
        .map(|t| if t.active { format!("[{}]", t.label) } else { t.label.clone() })
        .collect();
    let _ = writeln!(out, "Previsão por hora  {}", tabs.join(" "));
    if view.hourly.is_empty() {
        let _ = writeln!(out, "  (sem dados)");
    }
    for hour in &view.hourly {
        let _ = writeln!(
            out,
            "  {}  {:>4}°  {}",
            hour.label, hour.temperature, hour.condition.description
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clima_core::{
        ConditionCategory,
        view::{ConditionView, CurrentView, DailySummary, DayTab, HourlyItem},
    };

    fn sample() -> WeatherView {
        WeatherView {
            current: CurrentView {
                location_label: "Recife, BR".into(),
                date_label: "segunda, 15 de janeiro de 2024".into(),
                condition: ConditionCategory::Rain.into(),
                temperature: 27,
                temperature_unit: "C",
                feels_like: 27,
                humidity: "--".into(),
                wind_speed: 12,
                wind_unit: "km/h",
                precipitation: "0.4".into(),
                precipitation_unit: "mm",
            },
            daily: vec![DailySummary {
                label: "Hoje".into(),
                condition: ConditionView::from(ConditionCategory::ClearDay),
                max: 31,
                min: 23,
            }],
            days: vec![
                DayTab { index: 0, label: "Hoje".into(), active: false },
                DayTab { index: 1, label: "ter".into(), active: true },
            ],
            selected_day: 1,
            hourly: vec![HourlyItem {
                label: "03:00".into(),
                condition: ConditionCategory::Fog.into(),
                temperature: 22,
            }],
        }
    }

    #[test]
    fn renders_all_sections() {
        let text = weather(&sample());

        assert!(text.starts_with("Recife, BR\n"));
        assert!(text.contains("27°C  Chuva  [rain]"));
        assert!(text.contains("Umidade           --\n"));
        assert!(text.contains("Hoje     31°   23°  Céu limpo"));
        assert!(text.contains("Hoje [ter]"));
        assert!(text.contains("03:00    22°  Neblina"));
    }

    #[test]
    fn known_humidity_has_percent_sign() {
        let mut view = sample();
        view.current.humidity = "70".into();
        assert!(weather(&view).contains("Umidade           70%\n"));
    }

    #[test]
    fn empty_hourly_strip_is_marked() {
        let mut view = sample();
        view.hourly.clear();
        assert!(weather(&view).contains("(sem dados)"));
    }
}
