//! Manifest of snippet files (title -> path)

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::FetchError;

/// Why the manifest couldn't be loaded
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to fetch manifest: {0}")]
    Fetch(#[from] FetchError),

    #[error("invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered mapping of display title to file path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: IndexMap<String, String>,
}

impl Manifest {
    /// Parse manifest JSON. `null` counts as an empty manifest.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let entries: Option<IndexMap<String, String>> = serde_json::from_str(json)?;
        Ok(Self {
            entries: entries.unwrap_or_default(),
        })
    }

    /// Pretty-printed JSON, entries in order
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.entries.get(title).map(String::as_str)
    }

    /// Add an entry at the end, or replace the path of an existing title in place
    pub fn insert(&mut self, title: String, path: String) -> Option<String> {
        self.entries.insert(title, path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_document_order() {
        let manifest = Manifest::from_json(
            r#"{"Zeta": "/markdown/z.md", "Alpha": "/markdown/a.md", "Mid": "m.html"}"#,
        )
        .unwrap();
        let titles: Vec<_> = manifest.iter().map(|(t, _)| t).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_empty_and_null() {
        assert!(Manifest::from_json("{}").unwrap().is_empty());
        assert!(Manifest::from_json("null").unwrap().is_empty());
    }

    #[test]
    fn test_insert_appends_and_round_trips() {
        let mut manifest = Manifest::from_json(r#"{"A": "a.md"}"#).unwrap();
        assert_eq!(manifest.insert("B".into(), "b.md".into()), None);
        assert_eq!(manifest.get("B"), Some("b.md"));

        let reparsed = Manifest::from_json(&manifest.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, manifest);
        assert_eq!(reparsed.iter().last(), Some(("B", "b.md")));
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(matches!(
            Manifest::from_json(r#"["a.md"]"#),
            Err(ManifestError::Parse(_))
        ));
        assert!(matches!(
            Manifest::from_json(r#"{"A": 1}"#),
            Err(ManifestError::Parse(_))
        ));
        assert!(Manifest::from_json("not json").is_err());
    }
}
