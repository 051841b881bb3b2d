//! Error types for definition reading and reference resolution.

use thiserror::Error;

/// Errors that can occur while loading or parsing a WADL document.
#[derive(Debug, Error)]
pub enum WadlError {
    /// XML syntax error.
    #[error("XML error: {0}")]
    Xml(String),

    /// The document is not a WADL application in a recognized namespace.
    #[error("Invalid definition: {0}")]
    Format(String),

    /// Remote or local document could not be retrieved.
    #[error("Failed to fetch {uri}: {message}")]
    Fetch { uri: String, message: String },

    /// An inline legacy fragment could not be re-read as a representation.
    #[error("Malformed {kind} fragment: {message}")]
    MalformedFragment { kind: &'static str, message: String },
}

impl WadlError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Create a fetch error for `uri`.
    pub fn fetch(uri: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            uri: uri.into(),
            message: message.into(),
        }
    }

    /// Create a malformed fault-fragment error.
    pub fn malformed_fault(message: impl Into<String>) -> Self {
        Self::MalformedFragment {
            kind: "fault",
            message: message.into(),
        }
    }
}
