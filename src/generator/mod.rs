//! Generator module - builds the landing page into the public directory

use anyhow::Result;
use chrono::Utc;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::{Board, CardLoader, MarkdownRenderer};
use crate::render::{render_board, PageTarget};
use crate::source::Source;
use crate::templates::{TemplateRenderer, STYLESHEET};
use crate::NewTab;

/// Output files the generator owns; source files never replace them
const GENERATED_FILES: [&str; 2] = ["index.html", "css/newtab.css"];

/// What one generation produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Cards on the page
    pub cards: usize,
    /// Manifest entries that were skipped
    pub skipped: usize,
    /// Whether the page shows a placeholder instead of cards
    pub placeholder: bool,
    /// Assets copied from the source directory
    pub assets: usize,
}

/// Static page generator using Tera templates
pub struct Generator {
    app: NewTab,
    source: Source,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &NewTab) -> Result<Self> {
        Ok(Self {
            app: app.clone(),
            source: app.source()?,
            templates: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::from_config(&app.config.highlight),
        })
    }

    /// Load the cards listed in the manifest
    pub async fn load(&self) -> Board {
        CardLoader::new(&self.source, &self.markdown).load().await
    }

    /// Render a loaded board into page HTML
    pub fn render(&self, board: &Board) -> Result<String> {
        let mut target = PageTarget::new(&self.app.config);
        render_board(board, &mut target)?;
        target.render(&self.templates, Utc::now())
    }

    /// Generate the whole site
    pub async fn generate(&self) -> Result<Summary> {
        let board = self.load().await;
        let html = self.render(&board)?;

        let public_dir = &self.app.public_dir;
        fs::create_dir_all(public_dir.join("css"))?;
        fs::write(public_dir.join("index.html"), html)?;
        fs::write(public_dir.join("css/newtab.css"), STYLESHEET)?;

        let assets = match &self.source {
            Source::Local { .. } => self.copy_source_assets()?,
            Source::Http { .. } => 0,
        };

        let mut summary = Summary {
            assets,
            ..Summary::default()
        };
        match &board {
            Board::Cards(report) => {
                summary.cards = report.cards.len();
                summary.skipped = report.failures.len();
            }
            Board::Placeholder(_) => summary.placeholder = true,
        }

        Ok(summary)
    }

    /// Copy images and other assets that snippets may reference.
    ///
    /// Markdown snippets and the manifest are baked into the page and are
    /// not copied, nor is anything at a generated output path.
    fn copy_source_assets(&self) -> Result<usize> {
        let source_dir = &self.app.source_dir;
        if !source_dir.exists() {
            return Ok(0);
        }

        let manifest = source_dir.join(self.app.config.manifest.trim_start_matches('/'));
        let mut copied = 0;

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || path == manifest || is_markdown_file(path) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            if GENERATED_FILES.iter().any(|f| relative == Path::new(f)) {
                tracing::warn!("Not copying {:?} over the generated page", relative);
                continue;
            }
            let dest = self.app.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            tracing::debug!("Copied asset {:?}", relative);
            copied += 1;
        }

        Ok(copied)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}
