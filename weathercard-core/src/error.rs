use std::time::Duration;

use thiserror::Error;

/// Failures while acquiring or validating a dataset.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connection refused, DNS, TLS, ...).
    #[error("Request failed: {0}")]
    Request(String),

    /// The endpoint did not answer within the configured timeout.
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The endpoint answered with a non-success status.
    #[error("Endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body is not a JSON object keyed by date.
    #[error("Invalid dataset JSON: {0}")]
    InvalidJson(String),

    /// One entry does not match the weather record schema.
    #[error("Invalid record for date key '{key}': {reason}")]
    InvalidRecord { key: String, reason: String },

    #[error("Failed to read dataset: {0}")]
    Io(String),
}

/// Failures of a render pass.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Dataset contains no entries")]
    EmptyDataset,

    #[error("Display was already rendered")]
    AlreadyRendered,
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Page template compilation failed: {0}")]
    Compile(String),

    #[error("Page rendering failed: {0}")]
    Render(String),

    #[error("Failed to read page template: {0}")]
    Io(String),
}
