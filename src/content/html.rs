//! HTML snippet handling
//!
//! HTML snippets may carry their own `<style>` and `<script>` elements. Those
//! can't run from inside a card body, so they are lifted out and placed in
//! the page head and at the end of the page body instead.

use lazy_static::lazy_static;
use regex::Regex;

use super::card::Script;

lazy_static! {
    static ref STYLE_RE: Regex =
        Regex::new(r"(?is)<style\b[^>]*>(.*?)</style\s*>").expect("style pattern is valid");
    static ref SCRIPT_RE: Regex =
        Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").expect("script pattern is valid");
    static ref SRC_RE: Regex =
        Regex::new(r#"(?i)(?:^|\s)src\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
            .expect("src pattern is valid");
}

/// HTML snippet split into card markup and hoisted assets
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HtmlFragment {
    pub markup: String,
    pub styles: Vec<String>,
    pub scripts: Vec<Script>,
}

impl HtmlFragment {
    /// Pull `<style>` and `<script>` elements out of `html`
    pub fn extract(html: &str) -> Self {
        let styles = STYLE_RE
            .captures_iter(html)
            .map(|caps| caps[1].to_string())
            .collect();
        let without_styles = STYLE_RE.replace_all(html, "");

        let scripts = SCRIPT_RE
            .captures_iter(&without_styles)
            .map(|caps| match script_src(&caps[1]) {
                Some(src) => Script::Src(src),
                None => Script::Inline(caps[2].to_string()),
            })
            .collect();
        let markup = SCRIPT_RE.replace_all(&without_styles, "").into_owned();

        Self {
            markup,
            styles,
            scripts,
        }
    }
}

fn script_src(attrs: &str) -> Option<String> {
    let caps = SRC_RE.captures(attrs)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().to_string())
}
