//! Built-in page templates using Tera template engine
//!
//! The landing page layout, stylesheet and widget scripts are embedded in the
//! binary so a generated page needs nothing but its snippet files.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::content::{Placeholder, Script};

/// Stylesheet written to `css/newtab.css`
pub const STYLESHEET: &str = include_str!("newtab/newtab.css");

/// Template renderer with the embedded landing page theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Card bodies are inserted with `| safe`; titles and config values
        // are escaped
        tera.autoescape_on(vec![".html"]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("newtab/layout.html")),
            (
                "partials/search.html",
                include_str!("newtab/partials/search.html"),
            ),
            (
                "partials/clock.html",
                include_str!("newtab/partials/clock.html"),
            ),
            (
                "partials/cards.html",
                include_str!("newtab/partials/cards.html"),
            ),
            (
                "partials/placeholder.html",
                include_str!("newtab/partials/placeholder.html"),
            ),
            (
                "partials/toggles.html",
                include_str!("newtab/partials/toggles.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the full landing page
    pub fn render_page(&self, page: &PageData) -> Result<String> {
        let mut context = Context::new();
        context.insert("page", page);
        self.render("layout.html", &context)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub title: String,
    pub language: String,
    /// `newtab` or `waterfall`
    pub layout: String,
    pub cards: Vec<CardData>,
    pub placeholder: Option<Placeholder>,
    pub styles: Vec<String>,
    pub scripts: Vec<Script>,
    pub search: Option<SearchData>,
    pub clock: Option<ClockData>,
    pub generator: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardData {
    pub id: String,
    pub title: String,
    pub html: String,
    /// CSS width, when the snippet sets one
    pub width: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClockData {
    /// Initial display value
    pub now: String,
    /// IANA timezone for the browser clock, browser local time if empty
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchData {
    /// Search URL template with `{query}`
    pub url: String,
    pub placeholder: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageData {
        PageData {
            title: "New Tab".to_string(),
            language: "en".to_string(),
            layout: "newtab".to_string(),
            cards: Vec::new(),
            placeholder: None,
            styles: Vec::new(),
            scripts: Vec::new(),
            search: None,
            clock: None,
            generator: "newtab-rs test".to_string(),
        }
    }

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_title_is_escaped_and_body_is_not() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut page = page();
        page.cards.push(CardData {
            id: "card-0".to_string(),
            title: "<b>Links</b>".to_string(),
            html: "<ul><li>x</li></ul>".to_string(),
            width: Some("100%".to_string()),
        });

        let html = renderer.render_page(&page).unwrap();
        assert!(html.contains("&lt;b&gt;Links&lt;&#x2F;b&gt;"));
        assert!(html.contains("<ul><li>x</li></ul>"));
        assert!(html.contains(r#"style="width: 100%""#));
    }

    #[test]
    fn test_widgets_optional() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render_page(&page()).unwrap();
        assert!(!html.contains("search-box"));
        assert!(!html.contains("current-time"));

        let mut with_widgets = page();
        with_widgets.search = Some(SearchData {
            url: "https://www.bing.com/search?q={query}".to_string(),
            placeholder: "Search".to_string(),
        });
        with_widgets.clock = Some(ClockData {
            now: "2024/01/15 09:05:03".to_string(),
            timezone: "Asia/Shanghai".to_string(),
        });
        let html = renderer.render_page(&with_widgets).unwrap();
        assert!(html.contains("search-box"));
        assert!(html.contains(r#"data-timezone="Asia&#x2F;Shanghai">2024&#x2F;01&#x2F;15 09:05:03</div>"#));
    }
}
