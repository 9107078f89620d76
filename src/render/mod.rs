//! Render targets - where loaded cards end up

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::config::{Layout, SiteConfig};
use crate::content::{Board, Card, Placeholder, Script};
use crate::helpers;
use crate::templates::{CardData, ClockData, PageData, SearchData, TemplateRenderer};

/// Receives the cards of a board, in order, and materializes them
pub trait RenderTarget {
    fn push_card(&mut self, card: &Card) -> Result<()>;

    fn push_placeholder(&mut self, placeholder: &Placeholder) -> Result<()>;
}

/// Feed a board to a target: either exactly one placeholder, or every card
/// in load order
pub fn render_board<T: RenderTarget + ?Sized>(board: &Board, target: &mut T) -> Result<()> {
    match board {
        Board::Placeholder(placeholder) => target.push_placeholder(placeholder),
        Board::Cards(report) => {
            for card in &report.cards {
                target.push_card(card)?;
            }
            Ok(())
        }
    }
}

/// Collects cards into the landing page
pub struct PageTarget<'a> {
    config: &'a SiteConfig,
    cards: Vec<CardData>,
    placeholder: Option<Placeholder>,
    styles: Vec<String>,
    scripts: Vec<Script>,
}

impl<'a> PageTarget<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            cards: Vec::new(),
            placeholder: None,
            styles: Vec::new(),
            scripts: Vec::new(),
        }
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Template data for the page as collected so far
    pub fn page_data(&self, now: DateTime<Utc>) -> PageData {
        let config = self.config;
        let layout = match config.layout {
            Layout::Newtab => "newtab",
            Layout::Waterfall => "waterfall",
        };

        PageData {
            title: config.title.clone(),
            language: config.language.clone(),
            layout: layout.to_string(),
            cards: self.cards.clone(),
            placeholder: self.placeholder.clone(),
            styles: self.styles.clone(),
            scripts: self.scripts.clone(),
            search: config.search.enable.then(|| SearchData {
                url: config.search.url.clone(),
                placeholder: config.search.placeholder.clone(),
            }),
            clock: config.clock.enable.then(|| ClockData {
                now: helpers::clock_in(now, &config.clock.timezone),
                timezone: config.clock.timezone.trim().to_string(),
            }),
            generator: format!("newtab-rs {}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Render the page HTML
    pub fn render(&self, renderer: &TemplateRenderer, now: DateTime<Utc>) -> Result<String> {
        renderer.render_page(&self.page_data(now))
    }
}

impl RenderTarget for PageTarget<'_> {
    fn push_card(&mut self, card: &Card) -> Result<()> {
        self.cards.push(CardData {
            id: card.id.clone(),
            title: card.title.clone(),
            html: card.html.clone(),
            width: card.width.as_ref().map(|w| w.css().to_string()),
        });
        self.styles.extend(card.styles.iter().cloned());
        self.scripts.extend(card.scripts.iter().cloned());
        Ok(())
    }

    fn push_placeholder(&mut self, placeholder: &Placeholder) -> Result<()> {
        self.placeholder = Some(placeholder.clone());
        Ok(())
    }
}
