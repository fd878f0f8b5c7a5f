use std::{fs, path::PathBuf, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use tracing::info;
use weathercard_core::{
    Config, DatasetId, DatasetSource, FileSource, HttpSource, PageTemplate, VizDisplay,
    WeatherCardRenderer, source::source_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathercard", version, about = "Weather card dashboard renderer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the dashboard backend and defaults.
    Configure,

    /// Fetch a dataset and render the dashboard page.
    Render {
        /// Dataset to render, "model" or "forecast"; defaults to the configured one.
        #[arg(long)]
        dataset: Option<String>,

        /// Full dataset URL, overriding the configured backend.
        #[arg(long, conflicts_with = "input")]
        endpoint: Option<String>,

        /// Render a saved dataset JSON file instead of fetching.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Request timeout in seconds.
        #[arg(long)]
        timeout: Option<u64>,

        /// Host page template to use instead of the built-in page.
        #[arg(long)]
        template: Option<PathBuf>,

        /// Write the page here instead of stdout.
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Render { dataset, endpoint, input, timeout, template, out } => {
                let mut config = Config::load()?;
                if let Some(secs) = timeout {
                    config.timeout_secs = Some(secs);
                }

                let page = match template.or_else(|| config.template.clone()) {
                    Some(path) => PageTemplate::from_file(&path)?,
                    None => PageTemplate::embedded()?,
                };

                let source: Box<dyn DatasetSource> = match (input, endpoint) {
                    (Some(path), _) => Box::new(FileSource::new(path)),
                    (None, Some(url)) => Box::new(HttpSource::new(url, config.timeout())?),
                    (None, None) => {
                        let id = match dataset {
                            Some(d) => DatasetId::try_from(d.as_str())?,
                            None => config.default_dataset_id()?,
                        };
                        Box::new(source_from_config(id, &config)?)
                    }
                };

                render(source, &page, out).await
            }
        }
    }
}

async fn render(
    source: Box<dyn DatasetSource>,
    page: &PageTemplate,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut renderer = WeatherCardRenderer::new(source);
    let mut display = VizDisplay::new();

    let result = renderer.run(&mut display).await;

    // The page is written either way; on failure it carries the placeholder.
    let html = page.render(&display)?;
    match &out {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("Failed to write page: {}", path.display()))?;
            info!(path = %path.display(), "Wrote dashboard page");
        }
        None => print!("{html}"),
    }

    let summary = result.context("Weather render failed")?;
    if summary.unparsed_dates > 0 {
        info!(count = summary.unparsed_dates, "Some days were rendered without a weekday");
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let base_url = Text::new("Dashboard backend URL:")
        .with_default(config.base_url())
        .prompt()
        .context("Configuration aborted")?;

    let current = config.default_dataset_id().unwrap_or(DatasetId::Model);
    let start = DatasetId::all().iter().position(|id| *id == current).unwrap_or(0);
    let dataset = Select::new("Default dataset:", DatasetId::all().to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Configuration aborted")?;

    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout().as_secs())
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Configuration aborted")?;

    config.base_url = Some(base_url.trim().to_string());
    config.set_default_dataset(dataset);
    config.timeout_secs = Some(timeout_secs);
    config.save()?;

    println!(
        "Saved configuration to {} (timeout {:?}).",
        Config::config_file_path()?.display(),
        Duration::from_secs(timeout_secs)
    );

    Ok(())
}
