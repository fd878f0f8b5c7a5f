//! One fetch, one render pass.
//!
//! [`WeatherCardRenderer`] starts `Pending` and moves to `Rendered` after its
//! first run, whether that run displayed the cards or failed. A rendered
//! renderer never touches the display again.

use tracing::{error, info, warn};

use crate::{
    card::{Banner, DayCard},
    error::RenderError,
    model::WeatherDataset,
    page::DisplayTarget,
    source::DatasetSource,
};

pub const FETCH_FAILED_MESSAGE: &str = "Weather data is currently unavailable.";
pub const EMPTY_DATASET_MESSAGE: &str = "No weather data to display.";

/// What a successful render pass wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub days: usize,
    pub banner: Banner,
    /// Entries whose date key could not be parsed.
    pub unparsed_dates: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Displayed(RenderSummary),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    Pending,
    Rendered(RenderOutcome),
}

/// Write the banner and one card per entry into `target`.
///
/// All cards are derived before anything is written, so an empty dataset
/// leaves the target exactly as it was.
pub fn render_dataset<T>(
    dataset: &WeatherDataset,
    target: &mut T,
) -> Result<RenderSummary, RenderError>
where
    T: DisplayTarget + ?Sized,
{
    let first = dataset.first().ok_or(RenderError::EmptyDataset)?;
    let banner = Banner::for_rain_probability(first.record.rain_drizzle);

    let cards: Vec<DayCard> = dataset.iter().map(DayCard::from_entry).collect();

    let mut unparsed_dates = 0;
    for card in cards.iter().filter(|c| !c.label.is_parsed()) {
        warn!(key = %card.key, "Date key is not a valid timestamp; rendering without weekday");
        unparsed_dates += 1;
    }

    target.set_banner(banner);
    for card in &cards {
        target.append_card(card);
    }

    Ok(RenderSummary { days: cards.len(), banner, unparsed_dates })
}

#[derive(Debug)]
pub struct WeatherCardRenderer {
    source: Box<dyn DatasetSource>,
    state: RenderState,
}

impl WeatherCardRenderer {
    pub fn new(source: Box<dyn DatasetSource>) -> Self {
        Self { source, state: RenderState::Pending }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Fetch the dataset and render it into `target`.
    ///
    /// Fetch failures and empty datasets leave the image and card body alone
    /// and put a placeholder message on the display instead.
    pub async fn run<T>(&mut self, target: &mut T) -> Result<RenderSummary, RenderError>
    where
        T: DisplayTarget + ?Sized,
    {
        if matches!(self.state, RenderState::Rendered(_)) {
            return Err(RenderError::AlreadyRendered);
        }

        let result = match self.source.fetch().await {
            Ok(dataset) => render_dataset(&dataset, target),
            Err(e) => Err(RenderError::from(e)),
        };

        match &result {
            Ok(summary) => {
                info!(
                    source = %self.source.describe(),
                    days = summary.days,
                    banner = ?summary.banner,
                    "Rendered weather cards"
                );
                self.state = RenderState::Rendered(RenderOutcome::Displayed(*summary));
            }
            Err(e) => {
                error!(source = %self.source.describe(), error = %e, "Weather render failed");
                let message = match e {
                    RenderError::EmptyDataset => EMPTY_DATASET_MESSAGE,
                    _ => FETCH_FAILED_MESSAGE,
                };
                target.show_placeholder(message);
                self.state = RenderState::Rendered(RenderOutcome::Failed(e.to_string()));
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{
        error::FetchError,
        model::WeatherRecord,
        page::VizDisplay,
    };

    #[derive(Debug)]
    struct StaticSource(Result<WeatherDataset, String>);

    #[async_trait]
    impl DatasetSource for StaticSource {
        async fn fetch(&self) -> Result<WeatherDataset, FetchError> {
            self.0.clone().map_err(FetchError::Request)
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    fn record(rain_drizzle: f64) -> WeatherRecord {
        WeatherRecord::new(72.4, 60.2, 81.7, rain_drizzle)
    }

    fn labels(display: &VizDisplay) -> Vec<String> {
        display
            .card_body()
            .iter()
            .map(|html| {
                let start = html.find("</strong>: ").expect("label caption") + "</strong>: ".len();
                let end = html[start..].find("</p>").expect("label end") + start;
                html[start..end].to_string()
            })
            .collect()
    }

    #[test]
    fn one_label_and_one_metrics_block_per_entry() {
        let dataset = WeatherDataset::from_entries([
            ("1609459200000", record(0.1)),
            ("1609545600000", record(0.2)),
            ("1609632000000", record(0.3)),
        ]);
        let mut display = VizDisplay::new();

        let summary = render_dataset(&dataset, &mut display).expect("render succeeds");

        assert_eq!(summary.days, 3);
        let html = display.card_body().concat();
        assert_eq!(html.matches("<strong>Date</strong>").count(), 3);
        assert_eq!(html.matches("<strong>Temperature</strong>").count(), 3);
    }

    #[test]
    fn banner_follows_first_entry_only() {
        let rainy_first = WeatherDataset::from_entries([
            ("1609459200000", record(0.5)),
            ("1609545600000", record(0.0)),
        ]);
        let sunny_first = WeatherDataset::from_entries([
            ("1609459200000", record(0.49999)),
            ("1609545600000", record(1.0)),
        ]);

        let mut display = VizDisplay::new();
        render_dataset(&rainy_first, &mut display).unwrap();
        assert_eq!(display.banner_src(), Some("/static/rain.jpg"));

        let mut display = VizDisplay::new();
        render_dataset(&sunny_first, &mut display).unwrap();
        assert_eq!(display.banner_src(), Some("/static/sunny.jpg"));
    }

    #[test]
    fn empty_dataset_does_not_touch_display() {
        let mut display = VizDisplay::new();

        let err = render_dataset(&WeatherDataset::default(), &mut display).unwrap_err();

        assert!(matches!(err, RenderError::EmptyDataset));
        assert!(display.is_untouched());
        assert_eq!(display.placeholder(), None);
    }

    #[test]
    fn malformed_key_keeps_metrics() {
        let dataset = WeatherDataset::from_entries([
            ("1609459200000", record(0.1)),
            ("not-a-number", WeatherRecord::new(72.4, 60.0, 80.0, 0.666)),
        ]);
        let mut display = VizDisplay::new();

        let summary = render_dataset(&dataset, &mut display).unwrap();

        assert_eq!(summary.unparsed_dates, 1);
        assert_eq!(labels(&display), ["Fri, Jan 1", ""]);
        let second = &display.card_body()[1];
        assert!(second.contains("<strong>Temperature</strong>: 72°"));
        assert!(second.contains("<strong>Low Temp</strong>: 60°"));
        assert!(second.contains("<strong>High Temp</strong>: 80°"));
        assert!(second.contains("<strong>Chance of Rain</strong>: 67%"));
    }

    #[test]
    fn keeps_dataset_order_without_sorting() {
        let dataset = WeatherDataset::from_entries([
            ("1609632000000", WeatherRecord::new(3.0, 0.0, 0.0, 0.0)),
            ("1609459200000", WeatherRecord::new(1.0, 0.0, 0.0, 0.0)),
            ("1609545600000", WeatherRecord::new(2.0, 0.0, 0.0, 0.0)),
        ]);
        let mut display = VizDisplay::new();

        render_dataset(&dataset, &mut display).unwrap();

        assert_eq!(labels(&display), ["Sun, Jan 3", "Fri, Jan 1", "Sat, Jan 2"]);
        let temps: Vec<bool> = display
            .card_body()
            .iter()
            .zip(["3°", "1°", "2°"])
            .map(|(html, t)| html.contains(&format!("<strong>Temperature</strong>: {t}")))
            .collect();
        assert_eq!(temps, [true, true, true]);
    }

    #[tokio::test]
    async fn run_renders_once_then_stays_rendered() {
        let dataset = WeatherDataset::from_entries([("1609459200000", record(0.7))]);
        let mut renderer = WeatherCardRenderer::new(Box::new(StaticSource(Ok(dataset))));
        let mut display = VizDisplay::new();

        assert_eq!(renderer.state(), &RenderState::Pending);

        let summary = renderer.run(&mut display).await.expect("first run renders");
        assert_eq!(summary.banner, Banner::Rain);
        assert_eq!(
            renderer.state(),
            &RenderState::Rendered(RenderOutcome::Displayed(summary))
        );

        let err = renderer.run(&mut display).await.unwrap_err();
        assert!(matches!(err, RenderError::AlreadyRendered));
        assert_eq!(display.card_body().len(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_shows_placeholder_only() {
        let mut renderer =
            WeatherCardRenderer::new(Box::new(StaticSource(Err("connection refused".into()))));
        let mut display = VizDisplay::new();

        let err = renderer.run(&mut display).await.unwrap_err();

        assert!(matches!(err, RenderError::Fetch(FetchError::Request(_))));
        assert!(display.is_untouched());
        assert_eq!(display.placeholder(), Some(FETCH_FAILED_MESSAGE));
        assert!(matches!(renderer.state(), RenderState::Rendered(RenderOutcome::Failed(_))));
    }

    #[tokio::test]
    async fn empty_dataset_shows_placeholder_only() {
        let mut renderer =
            WeatherCardRenderer::new(Box::new(StaticSource(Ok(WeatherDataset::default()))));
        let mut display = VizDisplay::new();

        let err = renderer.run(&mut display).await.unwrap_err();

        assert!(matches!(err, RenderError::EmptyDataset));
        assert!(display.is_untouched());
        assert_eq!(display.placeholder(), Some(EMPTY_DATASET_MESSAGE));
    }
}
