//! Core library for the `weathercard` dashboard renderer.
//!
//! This crate defines:
//! - The weather dataset model and its validation at the fetch boundary
//! - Dataset sources (dashboard backend over HTTP, saved files)
//! - Day label and metric derivation, banner selection
//! - The visualization display and the host page it is written into
//! - Configuration handling
//!
//! It is used by `weathercard-cli`, but can also be reused by other binaries or services.

pub mod card;
pub mod config;
pub mod date;
pub mod error;
pub mod model;
pub mod page;
pub mod renderer;
pub mod source;

pub use card::{Banner, DayCard, Metrics};
pub use config::Config;
pub use date::DayLabel;
pub use error::{FetchError, PageError, RenderError};
pub use model::{DatasetEntry, WeatherDataset, WeatherRecord};
pub use page::{DisplayTarget, PageTemplate, VizDisplay};
pub use renderer::{RenderOutcome, RenderState, RenderSummary, WeatherCardRenderer, render_dataset};
pub use source::{DatasetId, DatasetSource, file::FileSource, http::HttpSource};
