//! Retrieval of raw source bytes from the filesystem or over HTTP(S).

use std::{fmt, fs, path::PathBuf};

#[cfg(feature = "download")]
use std::time::Duration;

use anyhow::{Context, Result};
#[cfg(not(feature = "download"))]
use anyhow::bail;
#[cfg(feature = "download")]
use reqwest::{blocking::Client, redirect::Policy};
use serde::Deserialize;

/// Location of a source document: a local path or an `http(s)://` URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Source::Url(value)
        } else {
            Source::Path(value.into())
        }
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self { Source::from(value.to_string()) }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
        }
    }
}

/// Capability to read sources. Acquiring it is the first startup step and its only failure
/// point is building the HTTP client.
#[derive(Debug, Clone)]
pub struct Fetcher {
    #[cfg(feature = "download")]
    client: Client,
}

impl Fetcher {
    /// Acquire the fetch capability.
    pub fn acquire() -> Result<Self> {
        #[cfg(feature = "download")]
        let fetcher = Self {
            client: Client::builder()
                .user_agent(concat!("loanmap/", env!("CARGO_PKG_VERSION")))
                .redirect(Policy::limited(10))
                .timeout(Duration::from_secs(120))
                .build()
                .context("[io::fetch] Failed to initialize HTTP client")?,
        };

        #[cfg(not(feature = "download"))]
        let fetcher = Self {};

        Ok(fetcher)
    }

    /// Read the full contents of `source`.
    pub fn fetch(&self, source: &Source) -> Result<Vec<u8>> {
        let bytes = match source {
            Source::Path(path) => fs::read(path)
                .with_context(|| format!("[io::fetch] Failed to read {}", path.display()))?,
            Source::Url(url) => self.fetch_url(url)?,
        };
        log::info!("[io::fetch] {} bytes from {}", bytes.len(), source);
        Ok(bytes)
    }

    #[cfg(feature = "download")]
    fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.client.get(url).send()
            .with_context(|| format!("[io::fetch] GET {url}"))?
            .error_for_status()
            .with_context(|| format!("[io::fetch] GET {url} returned error status"))?;

        let bytes = resp.bytes()
            .with_context(|| format!("[io::fetch] Failed to read body of {url}"))?;
        Ok(bytes.to_vec())
    }

    #[cfg(not(feature = "download"))]
    fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        bail!("[io::fetch] Cannot fetch {url}: built without the `download` feature")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_sources() {
        assert_eq!(Source::from("https://cdn.example.com/a.json"), Source::Url("https://cdn.example.com/a.json".into()));
        assert_eq!(Source::from("data/a.csv"), Source::Path("data/a.csv".into()));
    }

    #[test]
    fn reads_local_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        fs::write(&path, b"hello").unwrap();

        let fetcher = Fetcher::acquire().unwrap();
        assert_eq!(fetcher.fetch(&Source::Path(path)).unwrap(), b"hello");
    }

    #[test]
    fn missing_file_is_an_error() {
        let fetcher = Fetcher::acquire().unwrap();
        let err = fetcher.fetch(&Source::from("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("[io::fetch]"));
    }
}
