use crate::{
    Config, WeatherDataset,
    error::FetchError,
    source::http::HttpSource,
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod file;
pub mod http;

/// Datasets served by the dashboard backend. Both share the same JSON shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetId {
    /// Model prediction for the coming days.
    Model,
    /// Upstream provider forecast for the same days.
    Forecast,
}

impl DatasetId {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetId::Model => "model",
            DatasetId::Forecast => "forecast",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            DatasetId::Model => "/model_data",
            DatasetId::Forecast => "/forecast_data",
        }
    }

    pub const fn all() -> &'static [DatasetId] {
        &[DatasetId::Model, DatasetId::Forecast]
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DatasetId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "model" => Ok(DatasetId::Model),
            "forecast" => Ok(DatasetId::Forecast),
            _ => Err(anyhow::anyhow!(
                "Unknown dataset '{value}'. Supported datasets: model, forecast."
            )),
        }
    }
}

#[async_trait]
pub trait DatasetSource: Send + Sync + Debug {
    async fn fetch(&self) -> Result<WeatherDataset, FetchError>;

    /// Where the data comes from, for log lines.
    fn describe(&self) -> String;
}

/// Construct an HTTP source for `id` from config.
pub fn source_from_config(id: DatasetId, config: &Config) -> anyhow::Result<HttpSource> {
    let url = config.endpoint_for(id);
    HttpSource::new(url.clone(), config.timeout())
        .map_err(|e| anyhow::anyhow!("Could not set up HTTP client for '{url}': {e}"))
}
