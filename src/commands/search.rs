//! Open a web search from the command line

use anyhow::{bail, Result};

use crate::helpers::{open_browser, search_url};
use crate::NewTab;

/// Build the search URL for `terms` and open it in the browser.
///
/// Returns the URL that was opened.
pub fn run(app: &NewTab, terms: &[String], open: bool) -> Result<String> {
    let term = terms.join(" ");
    let Some(url) = search_url(&app.config.search.url, &term) else {
        bail!("Nothing to search for");
    };

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    Ok(url)
}
