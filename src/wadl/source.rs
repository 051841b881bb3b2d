//! Where definition documents come from.
//!
//! [`DocumentSource`] is the only place the reconciler performs I/O. The
//! default [`UriSource`] reads local paths and `file://` URLs, and fetches
//! `http(s)://` URLs with a blocking client when the `remote` feature is on.
//! [`MemorySource`] serves documents from memory and counts fetches.

use std::cell::RefCell;
use std::collections::HashMap;

use url::Url;

use super::WadlError;
use super::model::DescriptionDocument;
use super::reader::read_wadl;

/// Fetches raw definition documents by URI.
pub trait DocumentSource {
    /// Retrieve the bytes of the document at `uri` (no fragment).
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, WadlError>;
}

/// Fetch and parse the document at `uri`.
pub fn load_document(
    source: &dyn DocumentSource,
    uri: &str,
) -> Result<DescriptionDocument, WadlError> {
    let bytes = source.fetch(uri)?;
    read_wadl(&bytes, Some(uri))
}

/// Reads filesystem paths, `file://` URLs and (with `remote`) HTTP URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriSource;

impl DocumentSource for UriSource {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, WadlError> {
        let Ok(url) = Url::parse(uri) else {
            tracing::debug!("Reading definition from path {uri}");
            return std::fs::read(uri).map_err(|e| WadlError::fetch(uri, e.to_string()));
        };

        match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| WadlError::fetch(uri, "not a local file URL"))?;
                tracing::debug!("Reading definition from {}", path.display());
                std::fs::read(&path).map_err(|e| WadlError::fetch(uri, e.to_string()))
            }
            "http" | "https" => fetch_http(uri),
            other => Err(WadlError::fetch(uri, format!("unsupported scheme '{other}'"))),
        }
    }
}

#[cfg(feature = "remote")]
fn fetch_http(uri: &str) -> Result<Vec<u8>, WadlError> {
    tracing::debug!("Fetching definition from {uri}");
    let response = reqwest::blocking::get(uri)
        .and_then(|response| response.error_for_status())
        .map_err(|e| WadlError::fetch(uri, e.to_string()))?;
    let bytes = response
        .bytes()
        .map_err(|e| WadlError::fetch(uri, e.to_string()))?;
    Ok(bytes.to_vec())
}

#[cfg(not(feature = "remote"))]
fn fetch_http(uri: &str) -> Result<Vec<u8>, WadlError> {
    Err(WadlError::fetch(
        uri,
        "HTTP fetching requires the 'remote' feature",
    ))
}

/// In-memory documents keyed by URI, with per-URI fetch counters.
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: HashMap<String, Vec<u8>>,
    fetches: RefCell<HashMap<String, usize>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under `uri`.
    pub fn with_document(mut self, uri: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(uri, content);
        self
    }

    pub fn insert(&mut self, uri: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.documents.insert(uri.into(), content.into());
    }

    /// How many times `uri` was fetched.
    pub fn fetch_count(&self, uri: &str) -> usize {
        self.fetches.borrow().get(uri).copied().unwrap_or(0)
    }

    /// Total fetches across all URIs.
    pub fn total_fetches(&self) -> usize {
        self.fetches.borrow().values().sum()
    }
}

impl DocumentSource for MemorySource {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, WadlError> {
        *self.fetches.borrow_mut().entry(uri.to_string()).or_insert(0) += 1;
        self.documents
            .get(uri)
            .cloned()
            .ok_or_else(|| WadlError::fetch(uri, "no such document"))
    }
}
