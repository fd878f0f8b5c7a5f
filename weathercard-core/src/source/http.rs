use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{error::FetchError, model::WeatherDataset};

use super::DatasetSource;

/// Reads a dataset from the dashboard backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
    http: Client,
}

impl HttpSource {
    pub fn new(url: String, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self { url, timeout, http })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<WeatherDataset, FetchError> {
        let res = self
            .http
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| self.map_reqwest_error(e))?;

        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        let dataset = WeatherDataset::from_json_str(&body)?;
        debug!(entries = dataset.len(), "Fetched weather dataset");

        Ok(dataset)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
