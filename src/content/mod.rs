//! Content module - manifests, snippet files and card building

mod card;
mod frontmatter;
mod html;
pub mod loader;
mod manifest;
mod markdown;

pub use card::{Card, CardKind, Script, WidthHint};
pub use frontmatter::FrontMatter;
pub use html::HtmlFragment;
pub use loader::{Board, CardFailure, CardLoader, LoadReport, Placeholder};
pub use manifest::{Manifest, ManifestError};
pub use markdown::MarkdownRenderer;
