//! Front-matter parsing

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::WidthHint;

lazy_static! {
    /// Opening `---` line, the block, the first closing `---` line, then the body.
    static ref FRONT_MATTER_RE: Regex =
        Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*\r?\n(.*)\z")
            .expect("front-matter pattern is valid");
}

/// Flat `key: value` properties from the head of a snippet file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    properties: IndexMap<String, String>,
}

impl FrontMatter {
    /// Split raw document text into front-matter properties and body.
    ///
    /// Text that doesn't open with a `---` line closed by a later `---` line
    /// comes back untouched with empty properties. This never fails.
    pub fn split(content: &str) -> (Self, &str) {
        match FRONT_MATTER_RE.captures(content) {
            Some(caps) => {
                let block = caps.get(1).map_or("", |m| m.as_str());
                let body = caps.get(2).map_or("", |m| m.as_str());
                (Self::parse_block(block), body)
            }
            None => (Self::default(), content),
        }
    }

    /// Parse the lines between the delimiters.
    ///
    /// Each line splits on its first colon only, so values such as
    /// `url: http://example.com` survive intact. Lines without a colon, or
    /// with an empty key or value, are skipped. Later keys overwrite earlier
    /// ones but keep the original position.
    pub fn parse_block(block: &str) -> Self {
        let mut properties = IndexMap::new();

        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                continue;
            }
            properties.insert(key.to_string(), value.to_string());
        }

        Self { properties }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Properties in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `width` option, if set
    pub fn width(&self) -> Option<WidthHint> {
        self.get("width").map(WidthHint::parse)
    }
}
