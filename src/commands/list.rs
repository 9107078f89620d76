//! List manifest entries

use anyhow::Result;
use std::fmt::Write;

use crate::content::{Board, CardLoader, MarkdownRenderer, Placeholder};
use crate::NewTab;

/// Print every card with its front-matter properties, and the entries that
/// failed to load
pub async fn run(app: &NewTab) -> Result<()> {
    let source = app.source()?;
    let renderer = MarkdownRenderer::from_config(&app.config.highlight);
    let board = CardLoader::new(&source, &renderer).load().await;

    print!("{}", describe(&board));

    Ok(())
}

/// Text listing of a loaded board
pub fn describe(board: &Board) -> String {
    let mut out = String::new();

    match board {
        Board::Placeholder(Placeholder::Empty) => {
            let _ = writeln!(out, "Cards (0): manifest lists no files");
        }
        Board::Placeholder(Placeholder::Failed(message)) => {
            let _ = writeln!(out, "Cards: manifest failed to load: {}", message);
        }
        Board::Cards(report) => {
            let _ = writeln!(out, "Cards ({}):", report.cards.len());
            for card in &report.cards {
                let _ = writeln!(out, "  {} [{}]", card.title, card.source);
                for (key, value) in card.properties.iter() {
                    let _ = writeln!(out, "    {}: {}", key, value);
                }
            }

            if !report.failures.is_empty() {
                let _ = writeln!(out, "Skipped ({}):", report.failures.len());
                for failure in &report.failures {
                    let _ = writeln!(
                        out,
                        "  {} [{}]: {}",
                        failure.title, failure.path, failure.error
                    );
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Card, CardFailure, FrontMatter, LoadReport};
    use crate::source::FetchError;

    #[test]
    fn test_describe_cards_and_failures() {
        let (properties, _) = FrontMatter::split("---\nwidth: full\nicon: star\n---\n");
        let board = Board::Cards(LoadReport {
            cards: vec![Card::new(
                0,
                "Links".to_string(),
                "/markdown/links.md".to_string(),
                properties,
            )],
            failures: vec![CardFailure {
                title: "Gone".to_string(),
                path: "/markdown/gone.md".to_string(),
                error: FetchError::Status {
                    url: "http://localhost/markdown/gone.md".to_string(),
                    status: 404,
                },
            }],
        });

        let text = describe(&board);
        assert_eq!(
            text,
            "Cards (1):\n  Links [/markdown/links.md]\n    width: full\n    icon: star\n\
             Skipped (1):\n  Gone [/markdown/gone.md]: HTTP 404 from http://localhost/markdown/gone.md\n"
        );
    }

    #[test]
    fn test_describe_placeholders() {
        assert!(describe(&Board::Placeholder(Placeholder::Empty)).contains("no files"));
        assert!(describe(&Board::Placeholder(Placeholder::Failed("boom".into())))
            .contains("failed to load: boom"));
    }
}
