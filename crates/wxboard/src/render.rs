use std::{collections::BTreeMap, fmt};
use time::{macros::format_description, OffsetDateTime};

use crate::{km_to_mi, kts_to_mph, round, JoinedHour, LiveObservation, Normalizer, UvRecord};

pub const FORECAST_TABLE: &str = "forecast";
pub const UV_TABLE: &str = "uv";

const FORECAST_COLUMNS: [&str; 8] = [
    "Hour", "Temp", "UV", "Wind", "Direction", "Precip %", "Forecast", "",
];
const UV_COLUMNS: [&str; 2] = ["Hour", "UV index"];

// (element id, label, unit suffix)
const LIVE_FIELDS: [(&str, &str, &str); 8] = [
    ("age", "Observed", "minutes ago"),
    ("time", "At", ""),
    ("temperature", "Temperature", "°F"),
    ("apparent", "Feels like", "°F"),
    ("humidity", "Humidity", "%"),
    ("wind_speed", "Wind", "mph"),
    ("wind_direction", "From", "°"),
    ("visibility", "Visibility", "mi"),
];

const NOT_AVAILABLE: &str = "n/a";
const NO_VALUE: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    /// Image reference by url.
    Image(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

/// Output surface addressed by stable element ids.
pub trait DisplaySink {
    fn set_text(&mut self, id: &str, text: String);
    fn clear_table(&mut self, id: &str);
    fn append_row(&mut self, id: &str, row: Vec<Cell>);
}

/// In-memory page that serializes to a standalone html document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlPage {
    title: String,
    refresh_secs: Option<u64>,
    texts: BTreeMap<String, String>,
    tables: BTreeMap<String, Vec<Vec<Cell>>>,
}

impl HtmlPage {
    pub fn new(title: &str) -> Self {
        HtmlPage {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Asks browsers viewing the file to reload it every `secs` seconds.
    pub fn with_refresh(mut self, secs: u64) -> Self {
        self.refresh_secs = Some(secs);
        self
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    pub fn rows(&self, id: &str) -> &[Vec<Cell>] {
        self.tables.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }

    fn write_table(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: &str,
        columns: &[&str],
    ) -> fmt::Result {
        writeln!(f, "<table id=\"{}\">", id)?;
        write!(f, "<thead><tr>")?;
        for column in columns {
            write!(f, "<th>{}</th>", escape(column))?;
        }
        writeln!(f, "</tr></thead>")?;
        writeln!(f, "<tbody>")?;
        for row in self.rows(id) {
            write!(f, "<tr>")?;
            for cell in row {
                match cell {
                    Cell::Text(text) => write!(f, "<td>{}</td>", escape(text))?,
                    Cell::Image(url) => write!(f, "<td><img src=\"{}\" alt=\"\"></td>", escape(url))?,
                }
            }
            writeln!(f, "</tr>")?;
        }
        writeln!(f, "</tbody>")?;
        writeln!(f, "</table>")
    }
}

impl DisplaySink for HtmlPage {
    fn set_text(&mut self, id: &str, text: String) {
        self.texts.insert(id.to_string(), text);
    }

    fn clear_table(&mut self, id: &str) {
        self.tables.insert(id.to_string(), Vec::new());
    }

    fn append_row(&mut self, id: &str, row: Vec<Cell>) {
        self.tables.entry(id.to_string()).or_default().push(row);
    }
}

impl fmt::Display for HtmlPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html>")?;
        writeln!(f, "<head>")?;
        writeln!(f, "<meta charset=\"utf-8\">")?;
        if let Some(secs) = self.refresh_secs {
            writeln!(f, "<meta http-equiv=\"refresh\" content=\"{}\">", secs)?;
        }
        writeln!(f, "<title>{}</title>", escape(&self.title))?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<h1>{}</h1>", escape(&self.title))?;

        writeln!(f, "<h2>Current conditions</h2>")?;
        writeln!(f, "<ul>")?;
        for (id, label, unit) in LIVE_FIELDS {
            writeln!(
                f,
                "<li>{}: <span id=\"{}\">{}</span> {}</li>",
                label,
                id,
                escape(self.text(id).unwrap_or(NOT_AVAILABLE)),
                unit
            )?;
        }
        writeln!(f, "</ul>")?;

        writeln!(f, "<h2>Next hours</h2>")?;
        self.write_table(f, FORECAST_TABLE, &FORECAST_COLUMNS)?;
        writeln!(f, "<h2>UV index</h2>")?;
        self.write_table(f, UV_TABLE, &UV_COLUMNS)?;

        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn number(value: Option<f64>, places: i32, missing: &str) -> String {
    value
        .map(|value| {
            let rounded = round(value, places);
            // -0.0 prints as "-0"
            let rounded = if rounded == 0.0 { 0.0 } else { rounded };
            rounded.to_string()
        })
        .unwrap_or_else(|| missing.to_string())
}

fn text_or(value: Option<&str>, missing: &str) -> String {
    value.unwrap_or(missing).to_string()
}

/// Replaces the forecast table, one row per hour in forecast order.
pub fn render_forecast<S: DisplaySink + ?Sized>(sink: &mut S, joined: &[JoinedHour]) {
    sink.clear_table(FORECAST_TABLE);
    for entry in joined {
        let hour = &entry.hour;
        let icon = match &hour.icon {
            Some(url) => Cell::Image(url.clone()),
            None => Cell::text(NO_VALUE),
        };
        sink.append_row(
            FORECAST_TABLE,
            vec![
                Cell::text(hour.stamp.label()),
                Cell::text(number(hour.temperature, 0, NO_VALUE)),
                Cell::text(number(entry.uv, 1, NO_VALUE)),
                Cell::text(text_or(hour.wind_speed.as_deref(), NO_VALUE)),
                Cell::text(text_or(hour.wind_direction.as_deref(), NO_VALUE)),
                Cell::text(
                    hour.precipitation_chance
                        .map(|chance| chance.to_string())
                        .unwrap_or_else(|| NO_VALUE.to_string()),
                ),
                Cell::text(text_or(hour.short_forecast.as_deref(), NO_VALUE)),
                icon,
            ],
        );
    }
}

pub fn render_uv<S: DisplaySink + ?Sized>(sink: &mut S, readings: &[UvRecord]) {
    sink.clear_table(UV_TABLE);
    for reading in readings {
        sink.append_row(
            UV_TABLE,
            vec![
                Cell::text(reading.stamp.label()),
                Cell::text(number(Some(reading.uv_value), 1, NO_VALUE)),
            ],
        );
    }
}

/// Whole minutes between the observation and `now`.
pub fn age_minutes(observed_at: OffsetDateTime, now: OffsetDateTime) -> i64 {
    ((now - observed_at).as_seconds_f64() / 60.0).round() as i64
}

pub fn render_live<S: DisplaySink + ?Sized>(
    sink: &mut S,
    observation: &LiveObservation,
    now: OffsetDateTime,
    normalizer: &Normalizer,
) {
    let (age, time) = match observation.observed_at {
        Some(observed_at) => (
            age_minutes(observed_at, now).to_string(),
            normalizer
                .local(observed_at)
                .format(format_description!("[hour]:[minute]"))
                .unwrap_or_else(|_| NOT_AVAILABLE.to_string()),
        ),
        None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
    };
    sink.set_text("age", age);
    sink.set_text("time", time);
    sink.set_text(
        "wind_speed",
        number(observation.wind_speed_kt.map(kts_to_mph), 1, NOT_AVAILABLE),
    );
    sink.set_text(
        "wind_direction",
        number(observation.wind_direction_deg, 0, NOT_AVAILABLE),
    );
    sink.set_text(
        "temperature",
        number(observation.temperature_f, 1, NOT_AVAILABLE),
    );
    sink.set_text("humidity", number(observation.humidity_pct, 0, NOT_AVAILABLE));
    sink.set_text("apparent", number(observation.apparent_f, 1, NOT_AVAILABLE));
    sink.set_text(
        "visibility",
        number(observation.visibility_km.map(km_to_mi), 1, NOT_AVAILABLE),
    );
}
