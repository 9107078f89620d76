//! Content sources - where the manifest and snippet files are read from

use anyhow::{Context, Result};
use reqwest::{Client, Url};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::config::SiteConfig;

/// A single manifest or snippet fetch that didn't produce text
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where snippets come from
#[derive(Debug, Clone)]
pub enum Source {
    /// Files under a local directory
    Local { root: PathBuf, manifest: String },
    /// Files served over http, resolved against the manifest URL
    Http { client: Client, manifest: Url },
}

impl Source {
    /// Local directory source
    pub fn local<P: AsRef<Path>>(root: P, manifest: &str) -> Self {
        Source::Local {
            root: root.as_ref().to_path_buf(),
            manifest: manifest.to_string(),
        }
    }

    /// Http source with the given per-request timeout
    pub fn http(manifest: &str, timeout: Duration) -> Result<Self> {
        let manifest =
            Url::parse(manifest).with_context(|| format!("Invalid manifest URL: {}", manifest))?;
        let client = Client::builder()
            .user_agent(concat!("newtab-rs/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Source::Http { client, manifest })
    }

    /// Pick the source described by the site configuration
    pub fn from_config(config: &SiteConfig, source_dir: &Path) -> Result<Self> {
        if config.remote_manifest() {
            Self::http(
                &config.manifest,
                Duration::from_secs(config.request_timeout),
            )
        } else {
            Ok(Self::local(source_dir, &config.manifest))
        }
    }

    /// Human-readable manifest location, for logs
    pub fn manifest_location(&self) -> String {
        match self {
            Source::Local { root, manifest } => resolve_local(root, manifest).display().to_string(),
            Source::Http { manifest, .. } => manifest.to_string(),
        }
    }

    /// Fetch the manifest text
    pub async fn fetch_manifest(&self) -> Result<String, FetchError> {
        match self {
            Source::Local { root, manifest } => read_local(&resolve_local(root, manifest)).await,
            Source::Http { client, manifest } => get_text(client, manifest.clone()).await,
        }
    }

    /// Fetch a snippet file by its manifest path
    pub async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        match self {
            Source::Local { root, .. } => read_local(&resolve_local(root, path)).await,
            Source::Http { client, manifest } => {
                let url = manifest
                    .join(path)
                    .map_err(|e| FetchError::InvalidUrl {
                        url: path.to_string(),
                        reason: e.to_string(),
                    })?;
                get_text(client, url).await
            }
        }
    }
}

/// Manifest paths are site-absolute (`/markdown/a.md`) or relative; both
/// resolve under the source root.
fn resolve_local(root: &Path, path: &str) -> PathBuf {
    root.join(path.trim_start_matches('/'))
}

/// Invalid UTF-8 is replaced rather than rejected, the same as
/// `Response::text` does for http sources.
async fn read_local(path: &Path) -> Result<String, FetchError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| FetchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

async fn get_text(client: &Client, url: Url) -> Result<String, FetchError> {
    let url_str = url.to_string();
    let http_err = |source| FetchError::Http {
        url: url_str.clone(),
        source,
    };

    let response = client.get(url).send().await.map_err(http_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url_str.clone(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(http_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_local_source_reads_relative_and_rooted_paths() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("markdown")).unwrap();
        fs::write(temp.path().join("markdown/newtab.json"), "{}").unwrap();
        fs::write(temp.path().join("markdown/links.md"), "# Links").unwrap();

        let source = Source::local(temp.path(), "markdown/newtab.json");
        assert_eq!(source.fetch_manifest().await.unwrap(), "{}");
        assert_eq!(source.fetch("/markdown/links.md").await.unwrap(), "# Links");
        assert_eq!(source.fetch("markdown/links.md").await.unwrap(), "# Links");
    }

    #[tokio::test]
    async fn test_local_source_reads_non_utf8_lossily() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("markdown")).unwrap();
        fs::write(temp.path().join("markdown/menu.md"), b"caf\xe9 menu\n").unwrap();

        let source = Source::local(temp.path(), "markdown/newtab.json");
        assert_eq!(
            source.fetch("/markdown/menu.md").await.unwrap(),
            "caf\u{FFFD} menu\n"
        );
    }

    #[tokio::test]
    async fn test_local_source_missing_file() {
        let temp = TempDir::new().unwrap();
        let source = Source::local(temp.path(), "markdown/newtab.json");
        assert!(matches!(
            source.fetch("/markdown/missing.md").await,
            Err(FetchError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_http_source_resolves_against_manifest_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/markdown/newtab.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/markdown/links.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# Links"))
            .mount(&server)
            .await;

        let manifest = format!("{}/markdown/newtab.json", server.uri());
        let source = Source::http(&manifest, Duration::from_secs(5)).unwrap();

        assert_eq!(source.fetch_manifest().await.unwrap(), "{}");
        assert_eq!(source.fetch("/markdown/links.md").await.unwrap(), "# Links");
        assert_eq!(source.fetch("links.md").await.unwrap(), "# Links");
    }

    #[tokio::test]
    async fn test_http_source_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/markdown/gone.md"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let manifest = format!("{}/markdown/newtab.json", server.uri());
        let source = Source::http(&manifest, Duration::from_secs(5)).unwrap();

        match source.fetch("gone.md").await {
            Err(FetchError::Status { status, url }) => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/markdown/gone.md"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_manifest_url() {
        assert!(Source::http("http://", Duration::from_secs(1)).is_err());
    }
}
