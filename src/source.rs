//! Acquisition of the workspace JSON from a local file or an http(s) URL.

use crate::fs::FileSystem;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Unable to read Structurizr JSON file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to fetch Structurizr JSON from {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid JSON in Structurizr workspace {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Resolve a relative file source against `base_dir`.
pub fn resolve_path(source: &str, base_dir: Option<&Path>) -> PathBuf {
    let path = PathBuf::from(source);
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    }
}

/// Read and decode the workspace document named by `source`.
pub fn read_source(
    source: &str,
    base_dir: Option<&Path>,
    fs: &dyn FileSystem,
) -> Result<Value, SourceError> {
    if is_url(source) {
        fetch_url(source)
    } else {
        read_file(&resolve_path(source, base_dir), fs)
    }
}

fn read_file(path: &Path, fs: &dyn FileSystem) -> Result<Value, SourceError> {
    debug!(path = %path.display(), "reading workspace file");
    let content = fs.read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SourceError::Json {
        origin: path.display().to_string(),
        source,
    })
}

fn fetch_url(url: &str) -> Result<Value, SourceError> {
    debug!(url, "fetching workspace");
    let http_error = |source| SourceError::Http {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(http_error)?;
    let body = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(http_error)?;

    serde_json::from_str(&body).map_err(|source| SourceError::Json {
        origin: url.to_string(),
        source,
    })
}
