//! Helper functions shared by the page renderer, CLI and server

mod date;
mod url;

pub use date::*;
pub use url::*;
