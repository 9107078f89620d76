//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::NewTab;

/// Remove the generated page and copied assets
pub fn run(app: &NewTab) -> Result<()> {
    if app.public_dir.exists() {
        fs::remove_dir_all(&app.public_dir)?;
        tracing::info!("Deleted: {:?}", app.public_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", app.public_dir);
    }

    Ok(())
}
