use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::params::{ParamHolder, ParamProperty};
use crate::base::QName;

/// HTTP verb of a REST method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Trace,
    Patch,
    Propfind,
    Lock,
    Unlock,
    Copy,
    Purge,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 13] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Head,
        Self::Options,
        Self::Trace,
        Self::Patch,
        Self::Propfind,
        Self::Lock,
        Self::Unlock,
        Self::Copy,
        Self::Purge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Patch => "PATCH",
            Self::Propfind => "PROPFIND",
            Self::Lock => "LOCK",
            Self::Unlock => "UNLOCK",
            Self::Copy => "COPY",
            Self::Purge => "PURGE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verb that is not one of [`HttpMethod::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown HTTP method '{0}'")]
pub struct ParseHttpMethodError(pub String);

impl FromStr for HttpMethod {
    type Err = ParseHttpMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let verb = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(verb))
            .ok_or_else(|| ParseHttpMethodError(s.to_string()))
    }
}

/// Role of a representation on a method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RepresentationKind {
    Request,
    Response,
    Fault,
}

/// A media type a method accepts or produces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Representation {
    pub kind: RepresentationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<QName>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Representation {
    pub fn new(kind: RepresentationKind) -> Self {
        Self {
            kind,
            id: None,
            media_type: None,
            element: None,
            status: Vec::new(),
            description: None,
        }
    }
}

/// A saved request variant of a method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestRequest {
    pub name: String,
}

/// A REST method on a resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RestMethod {
    pub name: String,
    #[serde(default)]
    pub http_method: HttpMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "ParamHolder::is_empty")]
    pub params: ParamHolder,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub representations: Vec<Representation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requests: Vec<RestRequest>,
}

impl RestMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn property(&self, name: &str) -> Option<&ParamProperty> {
        self.params.get(name)
    }

    pub fn representations_of(
        &self,
        kind: RepresentationKind,
    ) -> impl Iterator<Item = &Representation> {
        self.representations.iter().filter(move |r| r.kind == kind)
    }

    /// Append a new empty representation of `kind`.
    pub fn add_representation(&mut self, kind: RepresentationKind) -> &mut Representation {
        self.representations.push(Representation::new(kind));
        let last = self.representations.len() - 1;
        &mut self.representations[last]
    }

    /// Remove every representation of `kind`, returning how many were removed.
    pub fn clear_representations(&mut self, kind: RepresentationKind) -> usize {
        let before = self.representations.len();
        self.representations.retain(|r| r.kind != kind);
        before - self.representations.len()
    }

    pub fn add_request(&mut self, name: impl Into<String>) -> &mut RestRequest {
        self.requests.push(RestRequest { name: name.into() });
        let last = self.requests.len() - 1;
        &mut self.requests[last]
    }
}
