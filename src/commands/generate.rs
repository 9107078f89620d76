//! Generate the landing page

use anyhow::Result;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::generator::{Generator, Summary};
use crate::NewTab;

/// Generate the page once
pub async fn run(app: &NewTab) -> Result<Summary> {
    let start = Instant::now();

    let generator = Generator::new(app)?;
    let summary = generator.generate().await?;

    if summary.placeholder {
        tracing::warn!("Generated a placeholder page, no cards to show");
    } else {
        tracing::info!(
            "Generated {} cards ({} skipped, {} assets)",
            summary.cards,
            summary.skipped,
            summary.assets
        );
    }
    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());

    Ok(summary)
}

/// A running watcher; changes stop being reported once it is dropped
pub type ChangeWatcher = Debouncer<RecommendedWatcher>;

/// How long the tree must stay quiet before a burst of changes is reported
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Watch the source directory and config file.
///
/// Each message is one settled burst of changed paths, sent after no
/// further events have arrived for `delay`.
pub fn watch_changes(
    app: &NewTab,
    delay: Duration,
) -> Result<(ChangeWatcher, mpsc::UnboundedReceiver<Vec<PathBuf>>)> {
    let (tx, rx) = mpsc::unbounded_channel();

    let mut debouncer = new_debouncer(delay, move |res: DebounceEventResult| match res {
        Ok(events) => {
            let changed: Vec<PathBuf> = events
                .into_iter()
                .map(|e| e.path)
                .filter(|path| is_relevant(path))
                .collect();
            if !changed.is_empty() {
                let _ = tx.send(changed);
            }
        }
        Err(e) => tracing::error!("Watch error: {:?}", e),
    })?;

    if app.source_dir.exists() {
        debouncer
            .watcher()
            .watch(&app.source_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", app.source_dir);
    }

    let config_path = app.config_path();
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    if app.config.remote_manifest() {
        tracing::warn!(
            "Manifest is remote ({}); only local changes trigger a rebuild",
            app.config.manifest
        );
    }

    Ok((debouncer, rx))
}

/// Editor and VCS noise
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git") && !path_str.contains(".DS_Store") && !path_str.ends_with('~')
}

/// Regenerate whenever the source directory or config file changes
pub async fn watch(app: &NewTab) -> Result<()> {
    let (_watcher, mut rx) = watch_changes(app, DEBOUNCE)?;

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    while let Some(changed) = rx.recv().await {
        for path in &changed {
            tracing::info!("File changed: {}", path.display());
        }

        if let Err(e) = reload(app).await {
            tracing::error!("Generation failed: {}", e);
        }
    }

    Ok(())
}

/// Re-read the config and regenerate
pub async fn reload(app: &NewTab) -> Result<Summary> {
    let app = NewTab::new(&app.base_dir)?;
    run(&app).await
}
