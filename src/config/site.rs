//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Content
    /// Manifest location: a path under `source_dir`, or an http(s) URL
    pub manifest: String,
    /// Per-request timeout in seconds for http sources
    pub request_timeout: u64,
    pub layout: Layout,

    // Widgets
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "New Tab".to_string(),
            language: "zh-CN".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            manifest: "markdown/newtab.json".to_string(),
            request_timeout: 30,
            layout: Layout::default(),

            search: SearchConfig::default(),
            clock: ClockConfig::default(),
            highlight: HighlightConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Whether the manifest is fetched over http rather than read from disk
    pub fn remote_manifest(&self) -> bool {
        self.manifest.starts_with("http://") || self.manifest.starts_with("https://")
    }
}

/// Page layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Card waterfall with a toggle list of card titles beside it
    #[default]
    Newtab,
    /// Card waterfall only, each card headed by its title
    Waterfall,
}

/// Search box configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub enable: bool,
    /// Search URL with a `{query}` placeholder
    pub url: String,
    pub placeholder: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enable: true,
            url: "https://www.bing.com/search?q={query}".to_string(),
            placeholder: "Search".to_string(),
        }
    }
}

/// Clock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub enable: bool,
    /// IANA timezone for the initial server-rendered time, local time if empty
    pub timezone: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            enable: true,
            timezone: String::new(),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "New Tab");
        assert_eq!(config.manifest, "markdown/newtab.json");
        assert_eq!(config.layout, Layout::Newtab);
        assert!(config.search.url.contains("{query}"));
        assert!(!config.remote_manifest());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Home
manifest: https://example.com/markdown/root.json
layout: waterfall
search:
  url: https://duckduckgo.com/?q={query}
clock:
  timezone: Asia/Shanghai
homepage_owner: me
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Home");
        assert!(config.remote_manifest());
        assert_eq!(config.layout, Layout::Waterfall);
        assert_eq!(config.search.url, "https://duckduckgo.com/?q={query}");
        assert!(config.search.enable);
        assert_eq!(config.clock.timezone, "Asia/Shanghai");
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert!(config.extra.contains_key("homepage_owner"));
    }
}
