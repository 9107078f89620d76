//! Initialize a new landing page site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const CONFIG: &str = r#"# newtab-rs configuration

# Site
title: New Tab
language: zh-CN

# Directory
source_dir: source
public_dir: public

# Content
## Path under source_dir, or an http(s) URL serving the manifest
manifest: markdown/newtab.json
## Seconds before an http fetch gives up
request_timeout: 30
## newtab: toggle list beside the cards; waterfall: cards only, with titles
layout: newtab

# Widgets
search:
  enable: true
  url: https://www.bing.com/search?q={query}
  placeholder: Search
clock:
  enable: true
  timezone: ''

highlight:
  theme: base16-ocean.dark
  line_number: true
"#;

const MANIFEST: &str = r#"{
  "Links": "/markdown/links.md",
  "Notes": "/markdown/notes.md"
}
"#;

const LINKS: &str = r#"---
width: auto
---

- [GitHub](https://github.com)
- [Rust](https://www.rust-lang.org)
- [docs.rs](https://docs.rs)
"#;

const NOTES: &str = r#"---
width: full
---

## Notes

Cards come from `source/markdown/newtab.json`, which maps a card title to a
snippet file. Each snippet may start with a front-matter block:

```yaml
---
width: full
---
```

`width` accepts `auto`, `full` or any CSS width such as `420px`.
"#;

/// Initialize a new site in the given directory.
///
/// Files that already exist are left alone.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("source/markdown"))?;

    let files = [
        (CONFIG_FILE, CONFIG),
        ("source/markdown/newtab.json", MANIFEST),
        ("source/markdown/links.md", LINKS),
        ("source/markdown/notes.md", NOTES),
    ];

    for (name, content) in files {
        let path = target_dir.join(name);
        if path.exists() {
            tracing::warn!("{:?} already exists, skipping", path);
            continue;
        }
        fs::write(&path, content)?;
        tracing::debug!("Created {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Manifest;
    use crate::NewTab;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_loadable_site() {
        let temp = TempDir::new().unwrap();
        init_site(temp.path()).unwrap();

        let app = NewTab::new(temp.path()).unwrap();
        assert_eq!(app.config.title, "New Tab");
        assert!(!app.config.remote_manifest());

        let manifest =
            fs::read_to_string(app.source_dir.join(&app.config.manifest)).unwrap();
        let manifest = Manifest::from_json(&manifest).unwrap();
        assert_eq!(manifest.len(), 2);
        for (_, path) in manifest.iter() {
            assert!(app.source_dir.join(path.trim_start_matches('/')).exists());
        }
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "title: Mine\n").unwrap();

        init_site(temp.path()).unwrap();

        let config = fs::read_to_string(temp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, "title: Mine\n");
        assert!(temp.path().join("source/markdown/links.md").exists());
    }
}
