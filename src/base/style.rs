use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a request parameter is placed on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParamStyle {
    #[default]
    Query,
    Template,
    Matrix,
    Header,
    Plain,
}

impl ParamStyle {
    /// Parse a style name, ignoring case. Unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "query" => Some(Self::Query),
            "template" => Some(Self::Template),
            "matrix" => Some(Self::Matrix),
            "header" => Some(Self::Header),
            "plain" => Some(Self::Plain),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "QUERY",
            Self::Template => "TEMPLATE",
            Self::Matrix => "MATRIX",
            Self::Header => "HEADER",
            Self::Plain => "PLAIN",
        }
    }
}

impl fmt::Display for ParamStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
