//! Terminal table for a weather reading.

use chrono::{Local, NaiveDateTime};
use colored::Colorize;
use std::fmt;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    glyph::{FALLBACK_GLYPH, icon_glyph},
    model::WeatherReading,
    units::{Unit, convert_kelvin},
};

const TITLE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub label: String,
    pub value: String,
}

impl DisplayRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

/// A reading laid out as (Field, Value) rows under a timestamped title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    title: String,
    rows: Vec<DisplayRow>,
}

impl WeatherReport {
    /// `location` is the text the user asked for, not the resolved coordinates.
    pub fn new(reading: &WeatherReading, location: &str, unit: Unit, at: NaiveDateTime) -> Self {
        let temp = |kelvin: f64| format!("{:.2} {}", convert_kelvin(kelvin, unit), unit.suffix());

        let condition = match reading.condition() {
            Some(c) => format!("{} {} : {}", icon_glyph(&c.icon), c.main, c.description),
            None => format!("{FALLBACK_GLYPH} Unknown"),
        };

        let pressure = reading
            .main
            .pressure
            .map(|p| format!("{p} hPa"))
            .unwrap_or_else(|| "n/a".to_string());

        let rows = vec![
            DisplayRow::new("📍 Location", location),
            DisplayRow::new("🌡️ Current Temperature", temp(reading.main.temp)),
            DisplayRow::new("🌬️ Current Wind Speed", format!("{} meter/sec", reading.wind.speed)),
            DisplayRow::new("💧 Current Humidity", format!("{} %", reading.main.humidity)),
            DisplayRow::new("🌤️ Current Condition", condition),
            DisplayRow::new(format!("📈 Max Temp {}", unit.suffix()), temp(reading.main.temp_max)),
            DisplayRow::new(format!("📉 Min Temp {}", unit.suffix()), temp(reading.main.temp_min)),
            DisplayRow::new("🧭 Pressure", pressure),
        ];

        Self {
            title: format!("CURRENT WEATHER | {}", at.format(TITLE_TIME_FORMAT)),
            rows,
        }
    }

    /// Same as [`WeatherReport::new`], stamped with the current local time.
    pub fn now(reading: &WeatherReading, location: &str, unit: Unit) -> Self {
        Self::new(reading, location, unit, Local::now().naive_local())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    /// The table with terminal colors. `colored` drops them when `NO_COLOR` is set.
    pub fn render_styled(&self) -> String {
        self.render(true)
    }

    fn render(&self, styled: bool) -> String {
        let label_w = self.rows.iter().map(|r| cell_width(&r.label)).chain([FIELD.width()]).max();
        let value_w = self.rows.iter().map(|r| cell_width(&r.value)).chain([VALUE.width()]).max();
        let (label_w, value_w) = (label_w.unwrap_or(0), value_w.unwrap_or(0));
        let total = (label_w + value_w + 4).max(self.title.width() + 2);

        let paint = |text: String, style: fn(String) -> String| {
            if styled { style(text) } else { text }
        };

        let mut out = String::new();
        let title = format!("{:^total$}", self.title);
        out.push_str(&paint(title, |t| t.bold().to_string()));
        out.push('\n');

        let line = |label: &str, value: &str| {
            (
                format!(" {}{}", label, " ".repeat(label_w - cell_width(label))),
                format!("  {value}"),
            )
        };

        let (field, value) = line(FIELD, VALUE);
        out.push_str(&paint(field, |t| t.yellow().bold().to_string()));
        out.push_str(&paint(value, |t| t.yellow().bold().to_string()));
        out.push('\n');
        out.push_str(&"━".repeat(total));
        out.push('\n');

        for row in &self.rows {
            let (label, value) = line(&row.label, &row.value);
            out.push_str(&paint(label, |t| t.green().bold().to_string()));
            out.push_str(&paint(value, |t| t.magenta().bold().to_string()));
            out.push('\n');
        }
        out.push_str(&"━".repeat(total));
        out.push('\n');

        out
    }
}

/// Terminal cells taken by `s`. A symbol followed by VS16 (U+FE0F) is drawn
/// as a two-cell emoji even when its bare form is narrow.
fn cell_width(s: &str) -> usize {
    let mut chars = s.chars().peekable();
    let mut width = 0;
    while let Some(c) = chars.next() {
        let w = c.width().unwrap_or(0);
        if chars.peek() == Some(&'\u{FE0F}') {
            chars.next();
            width += w.max(2);
        } else {
            width += w;
        }
    }
    width
}

const FIELD: &str = "Field";
const VALUE: &str = "Value";

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{Coordinates, LocationQuery},
        pipeline::{
            Lookup, lookup,
            tests::{FakeProvider, sample_reading},
        },
        units::normalize_unit,
    };
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(12, 5, 7).unwrap()
    }

    #[test]
    fn eight_rows_in_fixed_order() {
        let report = WeatherReport::new(&sample_reading(), "London", Unit::Celsius, noon());

        let labels: Vec<&str> = report.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "📍 Location",
                "🌡️ Current Temperature",
                "🌬️ Current Wind Speed",
                "💧 Current Humidity",
                "🌤️ Current Condition",
                "📈 Max Temp °C",
                "📉 Min Temp °C",
                "🧭 Pressure",
            ]
        );

        let values: Vec<&str> = report.rows().iter().map(|r| r.value.as_str()).collect();
        assert_eq!(
            values,
            [
                "London",
                "15.00 °C",
                "4.6 meter/sec",
                "72 %",
                "💨 Clouds : broken clouds",
                "17.35 °C",
                "11.85 °C",
                "1013 hPa",
            ]
        );
    }

    #[test]
    fn title_carries_timestamp() {
        let report = WeatherReport::new(&sample_reading(), "London", Unit::Kelvin, noon());
        assert_eq!(report.title(), "CURRENT WEATHER | 09/03/2024 12:05:07");
    }

    #[test]
    fn kelvin_values_are_not_converted() {
        let report = WeatherReport::new(&sample_reading(), "London", Unit::Kelvin, noon());
        assert_eq!(report.rows()[1].value, "288.15 K");
        assert_eq!(report.rows()[5].label, "📈 Max Temp K");
    }

    #[test]
    fn missing_pressure_and_condition() {
        let mut reading = sample_reading();
        reading.main.pressure = None;
        reading.weather.clear();

        let report = WeatherReport::new(&reading, "Oslo", Unit::Celsius, noon());
        assert_eq!(report.rows()[4].value, format!("{FALLBACK_GLYPH} Unknown"));
        assert_eq!(report.rows()[7].value, "n/a");
    }

    #[test]
    fn plain_render_contains_every_row() {
        let report = WeatherReport::new(&sample_reading(), "London", Unit::Celsius, noon());
        let text = report.to_string();

        assert!(text.contains("CURRENT WEATHER | 09/03/2024 12:05:07"));
        assert!(text.contains("Field"));
        assert!(text.contains("Value"));
        for row in report.rows() {
            assert!(text.contains(&row.label), "missing {}", row.label);
            assert!(text.contains(&row.value), "missing {}", row.value);
        }
        // title, header, two rules, eight rows
        assert_eq!(text.lines().count(), 12);
        assert!(!text.contains('\u{1b}'), "plain render must not carry escape codes");
    }

    #[test]
    fn vs16_emoji_count_two_cells() {
        let wide = cell_width("📍 Current Temperature");
        assert_eq!(cell_width("🌡️ Current Temperature"), wide);
        assert_eq!(cell_width("🌬️"), 2);
        assert_eq!(cell_width("🌤️"), 2);
        assert_eq!(cell_width("Value"), 5);
    }

    #[test]
    fn value_column_lines_up_on_every_row() {
        let report = WeatherReport::new(&sample_reading(), "London", Unit::Celsius, noon());
        let text = report.to_string();

        let offsets: Vec<usize> = report
            .rows()
            .iter()
            .map(|row| {
                let line = text
                    .lines()
                    .find(|l| l.starts_with(&format!(" {}", row.label)))
                    .expect("row line");
                let idx = line.rfind(&row.value).expect("value on line");
                cell_width(&line[..idx])
            })
            .collect();

        assert!(offsets.windows(2).all(|w| w[0] == w[1]), "offsets {offsets:?}");
    }

    #[tokio::test]
    async fn london_in_fahrenheit_end_to_end() {
        let provider = FakeProvider {
            coords: Some(Coordinates { lat: 51.5, lon: -0.13 }),
            reading: Some(sample_reading()),
            ..Default::default()
        };
        let unit = normalize_unit("F").unit;
        let query = LocationQuery::from_inputs(Some("London".into()), None).unwrap();

        let Lookup::Found(reading) = lookup(&provider, &query).await.unwrap() else {
            panic!("expected a reading");
        };
        let report = WeatherReport::new(&reading, query.label(), unit, noon());

        let rows = report.rows();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].value, "London");
        assert_eq!(rows[1].value, "59.00 °F");
        assert_eq!(rows[5].value, "63.23 °F");
        assert_eq!(rows[6].value, "53.33 °F");
    }
}
