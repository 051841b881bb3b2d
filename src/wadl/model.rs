//! In-memory description graph of a WADL application.
//!
//! ```text
//! DescriptionDocument
//! ├── groups: Vec<ResourceGroup>          (<resources base="…">)
//! │   └── resources: Vec<ResourceDescriptor>
//! │       ├── params / methods / types
//! │       └── children (recursive)
//! ├── methods / params / representations  (top-level, referenced by id)
//! └── resource_types
//! ```
//!
//! The graph is immutable once read and lives for one reconciliation call.

use super::WadlError;
use super::reader::parse_status_strict;
use crate::base::{ParamStyle, QName};

/// Namespace of WADL 1.1 (2009/02) documents.
pub const WADL11_NS: &str = "http://wadl.dev.java.net/2009/02";

/// Namespace of the WADL 1.0 submission, the most common legacy variant.
pub const WADL10_NS: &str = "http://research.sun.com/wadl/2006/10";

/// Prefix shared by all legacy WADL namespaces.
pub const LEGACY_NS_PREFIX: &str = "http://research.sun.com/wadl";

/// Which WADL dialect a document was written in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WadlVersion {
    /// The current `2009/02` namespace.
    Wadl11,
    /// A legacy `research.sun.com` namespace, upgraded on read.
    Legacy(String),
}

impl WadlVersion {
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }

    /// Canonical namespace recorded on a service imported from this dialect.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::Wadl11 => WADL11_NS,
            Self::Legacy(_) => WADL10_NS,
        }
    }
}

/// `<doc>` element: optional title plus free text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Doc {
    pub title: Option<String>,
    pub lang: Option<String>,
    pub text: String,
}

impl Doc {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Return the first doc title with content, or `default`.
///
/// Precedence matters: it decides user-visible names across re-imports.
pub fn first_title<'a>(docs: &'a [Doc], default: Option<&'a str>) -> Option<&'a str> {
    docs.iter()
        .filter_map(|doc| doc.title.as_deref())
        .find(|title| !title.trim().is_empty())
        .or(default)
}

/// Root of a parsed WADL application.
#[derive(Clone, Debug)]
pub struct DescriptionDocument {
    /// Where the document was loaded from, if known.
    pub uri: Option<String>,
    pub version: WadlVersion,
    pub docs: Vec<Doc>,
    pub groups: Vec<ResourceGroup>,
    pub methods: Vec<MethodDescriptor>,
    pub params: Vec<ParamDescriptor>,
    pub representations: Vec<RepresentationDescriptor>,
    pub resource_types: Vec<ResourceTypeDescriptor>,
}

impl DescriptionDocument {
    pub fn new(version: WadlVersion) -> Self {
        Self {
            uri: None,
            version,
            docs: Vec::new(),
            groups: Vec::new(),
            methods: Vec::new(),
            params: Vec::new(),
            representations: Vec::new(),
            resource_types: Vec::new(),
        }
    }

    /// Find a top-level resource by path across all groups.
    pub fn find_resource(&self, path: &str) -> Option<&ResourceDescriptor> {
        self.groups
            .iter()
            .flat_map(|group| group.resources.iter())
            .find(|resource| resource.path.as_deref() == Some(path))
    }

    /// Find a group by its normalized base.
    pub fn find_group(&self, base: &str) -> Option<&ResourceGroup> {
        self.groups.iter().find(|group| group.base == base)
    }
}

/// `<resources base="…">`: one set of top-level resources.
#[derive(Clone, Debug, Default)]
pub struct ResourceGroup {
    /// Base URI with any trailing slash removed.
    pub base: String,
    pub docs: Vec<Doc>,
    pub resources: Vec<ResourceDescriptor>,
}

/// `<resource>`: a path segment with its params, methods and children.
#[derive(Clone, Debug, Default)]
pub struct ResourceDescriptor {
    pub id: Option<String>,
    /// `None` or empty for anonymous resources.
    pub path: Option<String>,
    pub docs: Vec<Doc>,
    pub params: Vec<ParamDescriptor>,
    pub methods: Vec<MethodDescriptor>,
    /// Resource-type references from the `type` attribute.
    pub types: Vec<String>,
    pub children: Vec<ResourceDescriptor>,
}

impl ResourceDescriptor {
    /// Path used as the matching key; `None` for anonymous resources.
    pub fn key(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    /// Display title: first doc title, else the path.
    pub fn title(&self) -> String {
        first_title(&self.docs, self.path.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    pub fn find_child(&self, path: &str) -> Option<&ResourceDescriptor> {
        self.children
            .iter()
            .find(|child| child.path.as_deref() == Some(path))
    }
}

/// `<resource_type>`: a reusable bundle of methods and params.
#[derive(Clone, Debug, Default)]
pub struct ResourceTypeDescriptor {
    pub id: Option<String>,
    pub docs: Vec<Doc>,
    pub params: Vec<ParamDescriptor>,
    pub methods: Vec<MethodDescriptor>,
}

/// `<method>`.
#[derive(Clone, Debug, Default)]
pub struct MethodDescriptor {
    pub id: Option<String>,
    /// HTTP verb, as written.
    pub name: Option<String>,
    pub href: Option<String>,
    pub docs: Vec<Doc>,
    pub request: Option<RequestDescriptor>,
    pub responses: Vec<ResponseDescriptor>,
}

impl MethodDescriptor {
    /// Name used to match an existing method in the tree.
    ///
    /// The first doc title (else the verb), suffixed with ` - <id>` when the
    /// id has content and differs from that title.
    pub fn display_name(&self) -> String {
        let mut name = first_title(&self.docs, self.name.as_deref())
            .unwrap_or_default()
            .to_string();
        if let Some(id) = self.id.as_deref() {
            if !id.trim().is_empty() && id.trim() != name.trim() {
                name.push_str(" - ");
                name.push_str(id);
            }
        }
        name
    }
}

/// `<request>`.
#[derive(Clone, Debug, Default)]
pub struct RequestDescriptor {
    pub docs: Vec<Doc>,
    pub params: Vec<ParamDescriptor>,
    pub representations: Vec<RepresentationDescriptor>,
}

/// `<response status="…">`.
#[derive(Clone, Debug, Default)]
pub struct ResponseDescriptor {
    pub status: Vec<u16>,
    pub docs: Vec<Doc>,
    pub params: Vec<ParamDescriptor>,
    pub representations: Vec<RepresentationDescriptor>,
    /// `<fault>` children of legacy documents, in document order.
    pub legacy_faults: Vec<LegacyFault>,
}

/// `<param>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamDescriptor {
    pub id: Option<String>,
    pub name: Option<String>,
    pub href: Option<String>,
    pub style: Option<ParamStyle>,
    pub required: bool,
    pub default: Option<String>,
    pub param_type: Option<QName>,
    pub options: Vec<String>,
    pub docs: Vec<Doc>,
}

/// `<representation>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RepresentationDescriptor {
    pub id: Option<String>,
    pub href: Option<String>,
    pub media_type: Option<String>,
    pub element: Option<QName>,
    /// Status codes carried on the representation itself (legacy dialect).
    pub status: Option<Vec<u16>>,
    pub docs: Vec<Doc>,
    pub params: Vec<ParamDescriptor>,
}

/// A `<fault>` element from a legacy response, kept as raw attributes.
///
/// Re-read as a representation during reconciliation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LegacyFault {
    pub attributes: Vec<(String, String)>,
    pub element: Option<QName>,
    pub docs: Vec<Doc>,
}

impl LegacyFault {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Re-read the fault as a representation.
    ///
    /// Fails when the `status` attribute is not a list of status codes.
    pub fn to_representation(&self) -> Result<RepresentationDescriptor, WadlError> {
        let status = self
            .attribute("status")
            .map(|value| {
                parse_status_strict(value)
                    .map_err(|e| WadlError::malformed_fault(format!("status '{value}': {e}")))
            })
            .transpose()?;
        Ok(RepresentationDescriptor {
            id: self.attribute("id").map(str::to_string),
            href: self.attribute("href").map(str::to_string),
            media_type: self.attribute("mediaType").map(str::to_string),
            element: self.element.clone(),
            status,
            docs: self.docs.clone(),
            params: Vec::new(),
        })
    }
}
