//! Create a new snippet card

use anyhow::{bail, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::Manifest;
use crate::NewTab;

/// Create a snippet file next to the manifest and list it in the manifest.
///
/// Returns the path of the new file.
pub fn create_snippet(
    app: &NewTab,
    title: &str,
    width: Option<&str>,
    html: bool,
) -> Result<PathBuf> {
    if app.config.remote_manifest() {
        bail!(
            "The manifest is served from {}; add snippets there instead",
            app.config.manifest
        );
    }

    let manifest_path = app
        .source_dir
        .join(app.config.manifest.trim_start_matches('/'));
    let mut manifest = if manifest_path.exists() {
        Manifest::from_json(&fs::read_to_string(&manifest_path)?)?
    } else {
        Manifest::default()
    };

    if let Some(existing) = manifest.get(title) {
        bail!("A card titled {:?} already exists: {}", title, existing);
    }

    let snippet_dir = manifest_path
        .parent()
        .unwrap_or(app.source_dir.as_path())
        .to_path_buf();
    fs::create_dir_all(&snippet_dir)?;

    let extension = if html { "html" } else { "md" };
    let stem = match slug::slugify(title) {
        s if s.is_empty() => "card".to_string(),
        s => s,
    };
    let file_path = unique_path(&snippet_dir, &stem, extension);

    fs::write(&file_path, scaffold(title, width, html))?;

    let manifest_entry = format!(
        "/{}",
        file_path
            .strip_prefix(&app.source_dir)?
            .to_string_lossy()
            .replace('\\', "/")
    );
    manifest.insert(title.to_string(), manifest_entry.clone());
    fs::write(&manifest_path, manifest.to_json()? + "\n")?;

    tracing::info!("Added {:?} -> {}", title, manifest_entry);

    Ok(file_path)
}

fn unique_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{}.{}", stem, extension));
    let mut n = 2;
    while candidate.exists() {
        candidate = dir.join(format!("{}-{}.{}", stem, n, extension));
        n += 1;
    }
    candidate
}

fn scaffold(title: &str, width: Option<&str>, html: bool) -> String {
    let mut content = String::new();
    if let Some(width) = width {
        content.push_str(&format!("---\nwidth: {}\n---\n", width.trim()));
    }
    if html {
        content.push_str("<div class=\"widget\"></div>\n");
    } else {
        content.push_str(&format!("\n## {}\n", title));
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::init_site;
    use crate::content::{FrontMatter, WidthHint};
    use tempfile::TempDir;

    #[test]
    fn test_create_snippet_appends_to_manifest() {
        let temp = TempDir::new().unwrap();
        init_site(temp.path()).unwrap();
        let app = NewTab::new(temp.path()).unwrap();

        let path = create_snippet(&app, "Daily Reading", Some("full"), false).unwrap();
        assert_eq!(path, app.source_dir.join("markdown/daily-reading.md"));

        let raw = fs::read_to_string(&path).unwrap();
        let (fm, body) = FrontMatter::split(&raw);
        assert_eq!(fm.width(), Some(WidthHint::Full));
        assert!(body.contains("## Daily Reading"));

        let manifest = fs::read_to_string(app.source_dir.join("markdown/newtab.json")).unwrap();
        let manifest = Manifest::from_json(&manifest).unwrap();
        assert_eq!(manifest.len(), 3);
        assert_eq!(
            manifest.iter().last(),
            Some(("Daily Reading", "/markdown/daily-reading.md"))
        );
    }

    #[test]
    fn test_create_snippet_rejects_duplicate_title() {
        let temp = TempDir::new().unwrap();
        init_site(temp.path()).unwrap();
        let app = NewTab::new(temp.path()).unwrap();

        assert!(create_snippet(&app, "Links", None, false).is_err());
    }

    #[test]
    fn test_create_html_snippet_without_manifest() {
        let temp = TempDir::new().unwrap();
        let app = NewTab::new(temp.path()).unwrap();

        let path = create_snippet(&app, "Weather", None, true).unwrap();
        assert_eq!(path, app.source_dir.join("markdown/weather.html"));
        assert!(fs::read_to_string(&path).unwrap().starts_with("<div"));

        // a second card whose slug collides gets a suffix
        let path = create_snippet(&app, "weather!", None, true).unwrap();
        assert_eq!(path, app.source_dir.join("markdown/weather-2.html"));
    }

    #[test]
    fn test_remote_manifest_is_refused() {
        let temp = TempDir::new().unwrap();
        let mut app = NewTab::new(temp.path()).unwrap();
        app.config.manifest = "https://example.com/markdown/newtab.json".to_string();

        assert!(create_snippet(&app, "Links", None, false).is_err());
    }
}
