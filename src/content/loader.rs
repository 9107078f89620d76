//! Card loader - turns the manifest into rendered cards

use serde::Serialize;

use super::html::HtmlFragment;
use super::manifest::{Manifest, ManifestError};
use super::{Card, CardKind, FrontMatter, MarkdownRenderer};
use crate::source::{FetchError, Source};

/// A manifest entry that was skipped
#[derive(Debug)]
pub struct CardFailure {
    pub title: String,
    pub path: String,
    pub error: FetchError,
}

/// Cards that loaded, plus the entries that didn't
#[derive(Debug, Default)]
pub struct LoadReport {
    pub cards: Vec<Card>,
    pub failures: Vec<CardFailure>,
}

/// Shown in place of the cards when there is nothing to show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Placeholder {
    /// The manifest lists no files
    Empty,
    /// The manifest itself couldn't be loaded
    Failed(String),
}

/// Everything the page needs to render its card area
#[derive(Debug)]
pub enum Board {
    Cards(LoadReport),
    Placeholder(Placeholder),
}

/// Loads snippet files listed in a manifest
pub struct CardLoader<'a> {
    source: &'a Source,
    renderer: &'a MarkdownRenderer,
}

impl<'a> CardLoader<'a> {
    /// Create a new card loader
    pub fn new(source: &'a Source, renderer: &'a MarkdownRenderer) -> Self {
        Self { source, renderer }
    }

    /// Fetch and parse the manifest
    pub async fn load_manifest(&self) -> Result<Manifest, ManifestError> {
        let json = self.source.fetch_manifest().await?;
        let manifest = Manifest::from_json(&json)?;
        tracing::debug!(
            "Manifest {} lists {} files",
            self.source.manifest_location(),
            manifest.len()
        );
        Ok(manifest)
    }

    /// Load every card in manifest order.
    ///
    /// Files are fetched one at a time. A file that fails is logged and
    /// skipped; only a manifest failure or an empty manifest turns the whole
    /// board into a placeholder.
    pub async fn load(&self) -> Board {
        tracing::info!("Loading cards from {}", self.source.manifest_location());

        let manifest = match self.load_manifest().await {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::error!("Failed to load manifest: {}", e);
                return Board::Placeholder(Placeholder::Failed(e.to_string()));
            }
        };

        if manifest.is_empty() {
            tracing::warn!("Manifest lists no files");
            return Board::Placeholder(Placeholder::Empty);
        }

        let mut report = LoadReport::default();

        for (title, path) in manifest.iter() {
            tracing::debug!("Loading {} -> {}", title, path);
            match self.source.fetch(path).await {
                Ok(raw) => {
                    let card = self.build_card(report.cards.len(), title, path, &raw);
                    report.cards.push(card);
                }
                Err(error) => {
                    tracing::warn!("Skipping {} ({}): {}", title, path, error);
                    report.failures.push(CardFailure {
                        title: title.to_string(),
                        path: path.to_string(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            "Loaded {} cards ({} skipped)",
            report.cards.len(),
            report.failures.len()
        );

        Board::Cards(report)
    }

    /// Build a card from raw file text
    pub fn build_card(&self, index: usize, title: &str, path: &str, raw: &str) -> Card {
        tracing::debug!("{} is {} bytes", title, raw.len());

        let (properties, body) = FrontMatter::split(raw);
        if !properties.is_empty() {
            tracing::debug!("{} properties: {:?}", title, properties);
        }

        let mut card = Card::new(index, title.to_string(), path.to_string(), properties);
        match card.kind {
            CardKind::Markdown => card.html = self.renderer.render(body),
            CardKind::Html => {
                let fragment = HtmlFragment::extract(body);
                card.html = fragment.markup;
                card.styles = fragment.styles;
                card.scripts = fragment.scripts;
            }
        }

        card
    }
}
