use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FetchError;

/// One day's weather as produced by the dataset endpoint.
///
/// `temp`, `min`, `max` and `rain_drizzle` are required. The remaining fields
/// are companion metrics the producer emits alongside them and are kept when
/// present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub temp: f64,
    pub min: f64,
    pub max: f64,
    /// Probability of rain or drizzle, nominally in `[0, 1]`.
    pub rain_drizzle: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dewp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visib: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wdsp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fog: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow_ice_pellets: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hail: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thunder: Option<f64>,
}

impl WeatherRecord {
    pub fn new(temp: f64, min: f64, max: f64, rain_drizzle: f64) -> Self {
        Self {
            temp,
            min,
            max,
            rain_drizzle,
            dewp: None,
            slp: None,
            visib: None,
            wdsp: None,
            fog: None,
            snow_ice_pellets: None,
            hail: None,
            thunder: None,
        }
    }
}

/// A date key paired with its record.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetEntry {
    pub key: String,
    pub record: WeatherRecord,
}

/// Date-keyed weather records in the order the endpoint listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherDataset {
    entries: Vec<DatasetEntry>,
}

impl WeatherDataset {
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, WeatherRecord)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, record)| DatasetEntry { key: key.into(), record })
                .collect(),
        }
    }

    /// Parse and validate a dataset body.
    ///
    /// Key order is preserved exactly as it appears in the JSON object. Any
    /// entry that does not carry the required numeric fields rejects the whole
    /// dataset.
    pub fn from_json_str(body: &str) -> Result<Self, FetchError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| FetchError::InvalidJson(e.to_string()))?;

        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(FetchError::InvalidJson(format!(
                    "expected an object keyed by date, got {}",
                    json_kind(&other)
                )));
            }
        };

        let mut entries = Vec::with_capacity(map.len());
        for (key, raw) in map {
            let record = serde_json::from_value::<WeatherRecord>(raw).map_err(|e| {
                FetchError::InvalidRecord { key: key.clone(), reason: e.to_string() }
            })?;
            entries.push(DatasetEntry { key, record });
        }

        Ok(Self { entries })
    }

    pub fn first(&self) -> Option<&DatasetEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetEntry> {
        self.entries.iter()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
