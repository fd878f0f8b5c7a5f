//! Per-day card derivation and banner selection.

use crate::{
    date::DayLabel,
    model::{DatasetEntry, WeatherRecord},
};

/// Rain probability at or above which the rain banner is shown.
pub const RAIN_THRESHOLD: f64 = 0.5;

pub const RAIN_IMAGE: &str = "/static/rain.jpg";
pub const SUNNY_IMAGE: &str = "/static/sunny.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Rain,
    Sunny,
}

impl Banner {
    pub fn for_rain_probability(rain_drizzle: f64) -> Self {
        if rain_drizzle >= RAIN_THRESHOLD {
            Banner::Rain
        } else {
            Banner::Sunny
        }
    }

    pub fn image_src(&self) -> &'static str {
        match self {
            Banner::Rain => RAIN_IMAGE,
            Banner::Sunny => SUNNY_IMAGE,
        }
    }
}

/// Display strings for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    pub temperature: String,
    pub low: String,
    pub high: String,
    pub chance_of_rain: String,
}

impl Metrics {
    pub fn from_record(record: &WeatherRecord) -> Self {
        Self {
            temperature: degrees(record.temp),
            low: degrees(record.min),
            high: degrees(record.max),
            chance_of_rain: format!("{}%", whole(record.rain_drizzle * 100.0)),
        }
    }
}

/// One day of the card body: its label and metrics, derived from the same entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCard {
    pub key: String,
    pub label: DayLabel,
    pub metrics: Metrics,
}

impl DayCard {
    pub fn from_entry(entry: &DatasetEntry) -> Self {
        Self {
            key: entry.key.clone(),
            label: DayLabel::from_key(&entry.key),
            metrics: Metrics::from_record(&entry.record),
        }
    }

    pub fn label_html(&self) -> String {
        format!("<p><strong>Date</strong>: {}</p>", self.label.value_text())
    }

    pub fn metrics_html(&self) -> String {
        let m = &self.metrics;
        format!(
            "<p><strong>Temperature</strong>: {} <br>\
             <strong>Low Temp</strong>: {} <br>\
             <strong>High Temp</strong>: {} <br>\
             <strong>Chance of Rain</strong>: {}</p>",
            m.temperature, m.low, m.high, m.chance_of_rain
        )
    }

    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"col-md-2 col-sm-6\">{}{}</div>",
            self.label_html(),
            self.metrics_html()
        )
    }
}

fn degrees(value: f64) -> String {
    format!("{}°", whole(value))
}

/// Round half away from zero, without ever printing `-0`.
fn whole(value: f64) -> String {
    let rounded = value.round();
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded:.0}")
    }
}
