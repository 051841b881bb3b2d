use serde::{Deserialize, Serialize};
use std::fmt;

/// A namespace-qualified XML name.
///
/// Displayed in Clark notation (`{namespace}local`), or just the local part
/// when no namespace is bound.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    /// Create a name without a namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    /// Create a name bound to `namespace`.
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local: local.into(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => write!(f, "{{{}}}{}", ns, self.local),
            _ => f.write_str(&self.local),
        }
    }
}
