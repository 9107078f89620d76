//! Card model

use serde::Serialize;
use std::fmt;

use super::FrontMatter;

/// Width option from a snippet's front matter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum WidthHint {
    /// Natural width
    Auto,
    /// Full row
    Full,
    /// Any other value, used as the CSS width as written
    Custom(String),
}

impl WidthHint {
    pub fn parse(value: &str) -> Self {
        match value {
            "auto" => WidthHint::Auto,
            "full" => WidthHint::Full,
            other => WidthHint::Custom(other.to_string()),
        }
    }

    /// CSS value for the card's `width` style
    pub fn css(&self) -> &str {
        match self {
            WidthHint::Auto => "auto",
            WidthHint::Full => "100%",
            WidthHint::Custom(value) => value,
        }
    }
}

impl fmt::Display for WidthHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css())
    }
}

/// How a snippet body is turned into card markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Markdown,
    Html,
}

impl CardKind {
    /// `.html` files are inserted as markup, everything else is Markdown
    pub fn from_path(path: &str) -> Self {
        if path.to_lowercase().ends_with(".html") {
            CardKind::Html
        } else {
            CardKind::Markdown
        }
    }
}

/// A `<script>` lifted out of an HTML snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Script {
    /// External script, by `src`
    Src(String),
    /// Inline script text
    Inline(String),
}

/// One rendered manifest entry
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    /// Element id, `card-N` in load order
    pub id: String,

    /// Display title from the manifest
    pub title: String,

    /// Path as listed in the manifest
    pub source: String,

    pub kind: CardKind,

    /// Parsed front matter
    pub properties: FrontMatter,

    /// Width from the `width` property
    pub width: Option<WidthHint>,

    /// Rendered card body
    pub html: String,

    /// `<style>` contents hoisted into the page head
    pub styles: Vec<String>,

    /// Scripts appended to the end of the page body
    pub scripts: Vec<Script>,
}

impl Card {
    /// Create a card with no hoisted assets
    pub fn new(index: usize, title: String, source: String, properties: FrontMatter) -> Self {
        let width = properties.width();
        Self {
            id: format!("card-{}", index),
            title,
            kind: CardKind::from_path(&source),
            source,
            properties,
            width,
            html: String::new(),
            styles: Vec::new(),
            scripts: Vec::new(),
        }
    }
}
