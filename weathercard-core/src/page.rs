//! The visualization display: the container the renderer writes into, and the
//! host page it is serialized into.
//!
//! [`DisplayTarget`] is the seam between the render pass and whatever holds
//! the banner image and card body. [`VizDisplay`] is the in-memory version
//! used by the CLI and the tests; [`PageTemplate`] turns it into an HTML page.

use std::{fs, path::Path};

use tera::{Context, Tera};

use crate::{
    card::{Banner, DayCard},
    error::PageError,
};

const PAGE_TEMPLATE_NAME: &str = "weather_viz.html";

const DEFAULT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{ title }}</title>
</head>
<body>
  <div class="viz_display card">
    <img class="card-img-top" src="{{ banner_src | safe }}" alt="Weather banner">
    {% if placeholder %}<p class="viz_status">{{ placeholder }}</p>{% endif %}
    <div class="card-body row">
{% for card in cards %}      {{ card | safe }}
{% endfor %}    </div>
  </div>
</body>
</html>
"#;

/// Something holding a banner image and a card body.
pub trait DisplayTarget {
    fn set_banner(&mut self, banner: Banner);

    fn append_card(&mut self, card: &DayCard);

    /// Show a status message outside the image and the card body.
    fn show_placeholder(&mut self, message: &str);
}

#[derive(Debug, Clone, Default)]
pub struct VizDisplay {
    banner_src: Option<String>,
    card_body: Vec<String>,
    placeholder: Option<String>,
}

impl VizDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn banner_src(&self) -> Option<&str> {
        self.banner_src.as_deref()
    }

    /// Markup of each child appended to the card body, in order.
    pub fn card_body(&self) -> &[String] {
        &self.card_body
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// True while neither the image nor the card body has been written.
    pub fn is_untouched(&self) -> bool {
        self.banner_src.is_none() && self.card_body.is_empty()
    }
}

impl DisplayTarget for VizDisplay {
    fn set_banner(&mut self, banner: Banner) {
        self.banner_src = Some(banner.image_src().to_string());
    }

    fn append_card(&mut self, card: &DayCard) {
        self.card_body.push(card.to_html());
    }

    fn show_placeholder(&mut self, message: &str) {
        self.placeholder = Some(message.to_string());
    }
}

/// Host page template.
///
/// A custom template sees `title`, `banner_src`, `placeholder` (empty when
/// there is nothing to report) and `cards`, a list of ready-made markup
/// fragments. `banner_src` and `cards` must be emitted with the `safe` filter.
#[derive(Debug)]
pub struct PageTemplate {
    tera: Tera,
    title: String,
}

impl PageTemplate {
    pub fn embedded() -> Result<Self, PageError> {
        Self::from_source(DEFAULT_PAGE)
    }

    pub fn from_file(path: &Path) -> Result<Self, PageError> {
        let source = fs::read_to_string(path)
            .map_err(|e| PageError::Io(format!("{}: {e}", path.display())))?;
        Self::from_source(&source)
    }

    fn from_source(source: &str) -> Result<Self, PageError> {
        let mut tera = Tera::default();
        tera.add_raw_template(PAGE_TEMPLATE_NAME, source)
            .map_err(|e| PageError::Compile(e.to_string()))?;

        Ok(Self { tera, title: "Weather".to_string() })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn render(&self, display: &VizDisplay) -> Result<String, PageError> {
        let mut ctx = Context::new();
        ctx.insert("title", &self.title);
        ctx.insert("banner_src", display.banner_src().unwrap_or_default());
        ctx.insert("placeholder", display.placeholder().unwrap_or_default());
        ctx.insert("cards", display.card_body());

        self.tera
            .render(PAGE_TEMPLATE_NAME, &ctx)
            .map_err(|e| PageError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::model::{DatasetEntry, WeatherRecord};

    fn card(key: &str) -> DayCard {
        DayCard::from_entry(&DatasetEntry {
            key: key.into(),
            record: WeatherRecord::new(72.4, 60.0, 80.0, 0.666),
        })
    }

    #[test]
    fn fresh_display_is_untouched() {
        let mut display = VizDisplay::new();
        assert!(display.is_untouched());

        display.show_placeholder("Weather data is unavailable.");
        assert!(display.is_untouched());
        assert_eq!(display.placeholder(), Some("Weather data is unavailable."));
    }

    #[test]
    fn page_contains_banner_and_cards_unescaped() {
        let mut display = VizDisplay::new();
        display.set_banner(Banner::Rain);
        display.append_card(&card("1609459200000"));

        let html = PageTemplate::embedded().expect("embedded template").render(&display).unwrap();

        assert!(html.contains(r#"src="/static/rain.jpg""#));
        assert!(html.contains(r#"<div class="col-md-2 col-sm-6"><p><strong>Date</strong>: Fri, Jan 1</p>"#));
        assert!(!html.contains("viz_status"));
    }

    #[test]
    fn placeholder_is_escaped() {
        let mut display = VizDisplay::new();
        display.show_placeholder("<b>down</b>");

        let html = PageTemplate::embedded().unwrap().render(&display).unwrap();

        assert!(html.contains(r#"<p class="viz_status">&lt;b&gt;down&lt;&#x2F;b&gt;</p>"#));
        assert!(html.contains(r#"src="""#));
    }

    #[test]
    fn custom_template_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<h1>{{{{ title }}}}</h1><img src=\"{{{{ banner_src | safe }}}}\">{{% for c in cards %}}{{{{ c | safe }}}}{{% endfor %}}").unwrap();

        let mut display = VizDisplay::new();
        display.set_banner(Banner::Sunny);
        display.append_card(&card("1609459200000"));

        let html = PageTemplate::from_file(file.path())
            .unwrap()
            .with_title("Houston")
            .render(&display)
            .unwrap();

        assert!(html.starts_with("<h1>Houston</h1><img src=\"/static/sunny.jpg\"><div"));
    }

    #[test]
    fn broken_template_is_a_compile_error() {
        let err = PageTemplate::from_source("{% for %}").unwrap_err();
        assert!(matches!(err, PageError::Compile(_)));
    }

    #[test]
    fn missing_template_file_is_an_io_error() {
        let err = PageTemplate::from_file(Path::new("/nonexistent/page.html")).unwrap_err();
        assert!(matches!(err, PageError::Io(_)));
    }
}
