//! Streaming WADL reader.
//!
//! Builds a [`DescriptionDocument`] from WADL XML using a `quick-xml` event
//! loop and an explicit element stack. Each open WADL element is a [`Frame`];
//! when it closes, the finished descriptor is attached to its parent frame.
//!
//! ```xml
//! <application xmlns="http://wadl.dev.java.net/2009/02">
//!   <resources base="http://example.com/api/">
//!     <resource path="pets">
//!       <method name="GET" id="listPets"/>
//!     </resource>
//!   </resources>
//! </application>
//! ```
//!
//! Legacy documents (`http://research.sun.com/wadl/…`) are read as if they
//! were in the current namespace; the dialect is recorded on the document.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::WadlError;
use super::model::{
    DescriptionDocument, Doc, LEGACY_NS_PREFIX, LegacyFault, MethodDescriptor, ParamDescriptor,
    RepresentationDescriptor, RequestDescriptor, ResourceDescriptor, ResourceGroup,
    ResourceTypeDescriptor, ResponseDescriptor, WADL11_NS, WadlVersion,
};
use crate::base::uri::strip_trailing_slash;
use crate::base::{ParamStyle, QName};

/// Parse WADL bytes into a description graph.
pub fn read_wadl(input: &[u8], uri: Option<&str>) -> Result<DescriptionDocument, WadlError> {
    WadlReader::new().read(input, uri)
}

/// One open element on the reader stack.
#[derive(Debug)]
enum Frame {
    Application,
    Group(ResourceGroup),
    Resource(ResourceDescriptor),
    ResourceType(ResourceTypeDescriptor),
    Method(MethodDescriptor),
    Request(RequestDescriptor),
    Response(ResponseDescriptor),
    Param(ParamDescriptor),
    Representation(RepresentationDescriptor),
    Fault(LegacyFault),
    Doc(Doc),
    /// Foreign or unmodelled element; its whole subtree is ignored.
    Skip,
}

/// Element kind of a frame, used to pick which children are recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Application,
    Group,
    Resource,
    ResourceType,
    Method,
    Request,
    Response,
    Param,
    Representation,
    Fault,
    Doc,
    Skip,
}

impl Frame {
    fn kind(&self) -> Kind {
        match self {
            Frame::Application => Kind::Application,
            Frame::Group(_) => Kind::Group,
            Frame::Resource(_) => Kind::Resource,
            Frame::ResourceType(_) => Kind::ResourceType,
            Frame::Method(_) => Kind::Method,
            Frame::Request(_) => Kind::Request,
            Frame::Response(_) => Kind::Response,
            Frame::Param(_) => Kind::Param,
            Frame::Representation(_) => Kind::Representation,
            Frame::Fault(_) => Kind::Fault,
            Frame::Doc(_) => Kind::Doc,
            Frame::Skip => Kind::Skip,
        }
    }
}

/// Raw attributes of one start tag, keys with their prefix.
type Attributes = Vec<(String, String)>;

/// WADL document reader.
pub struct WadlReader {
    frames: Vec<Frame>,
    /// In-scope `xmlns` bindings per open element (prefix `""` is the default).
    scopes: Vec<Vec<(String, String)>>,
    /// Namespace the root element was declared in.
    wadl_ns: Option<String>,
    document: Option<DescriptionDocument>,
}

impl Default for WadlReader {
    fn default() -> Self {
        Self::new()
    }
}

impl WadlReader {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            scopes: Vec::new(),
            wadl_ns: None,
            document: None,
        }
    }

    pub fn read(
        mut self,
        input: &[u8],
        uri: Option<&str>,
    ) -> Result<DescriptionDocument, WadlError> {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    self.handle_start_element(e)?;
                }
                Ok(Event::Empty(ref e)) => {
                    self.handle_start_element(e)?;
                    self.handle_end_element();
                }
                Ok(Event::End(_)) => {
                    self.handle_end_element();
                }
                Ok(Event::Text(ref t)) => {
                    let text = t
                        .unescape()
                        .map_err(|e| WadlError::xml(format!("Text error: {e}")))?;
                    self.handle_text(&text);
                }
                Ok(Event::CData(ref c)) => {
                    let text = String::from_utf8_lossy(c).into_owned();
                    self.handle_text(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(WadlError::xml(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        let mut document = self
            .document
            .ok_or_else(|| WadlError::format("Document has no root element"))?;
        document.uri = uri.map(str::to_string);
        Ok(document)
    }

    fn handle_start_element(&mut self, e: &BytesStart<'_>) -> Result<(), WadlError> {
        let tag_name = std::str::from_utf8(e.name().as_ref())
            .map_err(|e| WadlError::xml(format!("Invalid tag name: {e}")))?
            .to_string();
        let attributes = collect_attributes(e)?;

        let bindings = attributes
            .iter()
            .filter_map(|(key, value)| {
                if key == "xmlns" {
                    Some((String::new(), value.clone()))
                } else {
                    key.strip_prefix("xmlns:")
                        .map(|prefix| (prefix.to_string(), value.clone()))
                }
            })
            .collect();
        self.scopes.push(bindings);

        let (prefix, local) = split_prefixed(&tag_name);
        let namespace = self.resolve_prefix(prefix.unwrap_or("")).map(str::to_string);

        if self.document.is_none() {
            let frame = self.open_root(local, namespace.as_deref())?;
            self.frames.push(frame);
            return Ok(());
        }

        let in_wadl = namespace.is_some() && namespace == self.wadl_ns;
        let frame = if in_wadl {
            self.open_child(local, &attributes)
        } else {
            Frame::Skip
        };
        self.frames.push(frame);
        Ok(())
    }

    fn open_root(&mut self, local: &str, namespace: Option<&str>) -> Result<Frame, WadlError> {
        let version = match namespace {
            Some(ns) if local == "application" && ns == WADL11_NS => WadlVersion::Wadl11,
            Some(ns) if local == "application" && ns.starts_with(LEGACY_NS_PREFIX) => {
                tracing::debug!("Upgrading legacy WADL namespace {ns}");
                WadlVersion::Legacy(ns.to_string())
            }
            _ => {
                return Err(WadlError::format(format!(
                    "Document is not a WADL application with {WADL11_NS} namespace"
                )));
            }
        };
        self.wadl_ns = namespace.map(str::to_string);
        self.document = Some(DescriptionDocument::new(version));
        Ok(Frame::Application)
    }

    fn is_legacy(&self) -> bool {
        self.document
            .as_ref()
            .is_some_and(|doc| doc.version.is_legacy())
    }

    fn open_child(&mut self, local: &str, attributes: &Attributes) -> Frame {
        let legacy = self.is_legacy();
        let Some(parent) = self.frames.last().map(Frame::kind) else {
            return Frame::Skip;
        };

        match (parent, local) {
            (Kind::Doc | Kind::Skip, _) => Frame::Skip,
            (_, "doc") => Frame::Doc(Doc {
                title: attr(attributes, "title").map(str::to_string),
                lang: attr(attributes, "xml:lang").map(str::to_string),
                text: String::new(),
            }),
            (Kind::Param, "option") => {
                if let (Some(Frame::Param(param)), Some(value)) =
                    (self.frames.last_mut(), attr(attributes, "value"))
                {
                    param.options.push(value.to_string());
                }
                Frame::Skip
            }
            (Kind::Application, "resources") => Frame::Group(ResourceGroup {
                base: attr(attributes, "base")
                    .map(|base| strip_trailing_slash(base).to_string())
                    .unwrap_or_default(),
                ..Default::default()
            }),
            (Kind::Application, "resource_type") => Frame::ResourceType(ResourceTypeDescriptor {
                id: attr(attributes, "id").map(str::to_string),
                ..Default::default()
            }),
            (Kind::Application, "fault") if legacy => {
                Frame::Representation(self.representation(attributes, true))
            }
            (Kind::Group | Kind::Resource, "resource") => Frame::Resource(ResourceDescriptor {
                id: attr(attributes, "id").map(str::to_string),
                path: attr(attributes, "path").map(str::to_string),
                types: attr(attributes, "type")
                    .map(|types| types.split_whitespace().map(str::to_string).collect())
                    .unwrap_or_default(),
                ..Default::default()
            }),
            (Kind::Application | Kind::Resource | Kind::ResourceType, "method") => {
                Frame::Method(MethodDescriptor {
                    id: attr(attributes, "id").map(str::to_string),
                    name: attr(attributes, "name").map(str::to_string),
                    href: attr(attributes, "href").map(str::to_string),
                    ..Default::default()
                })
            }
            (
                Kind::Application
                | Kind::Resource
                | Kind::ResourceType
                | Kind::Request
                | Kind::Response
                | Kind::Representation,
                "param",
            ) => Frame::Param(self.param(attributes)),
            (Kind::Method, "request") => Frame::Request(RequestDescriptor::default()),
            (Kind::Method, "response") => Frame::Response(ResponseDescriptor {
                status: attr(attributes, "status")
                    .map(parse_status_lenient)
                    .unwrap_or_default(),
                ..Default::default()
            }),
            (Kind::Application | Kind::Request | Kind::Response, "representation") => {
                Frame::Representation(self.representation(attributes, legacy))
            }
            (Kind::Response, "fault") if legacy => Frame::Fault(LegacyFault {
                element: attr(attributes, "element").and_then(|e| self.resolve_qname(e)),
                attributes: attributes.clone(),
                docs: Vec::new(),
            }),
            _ => Frame::Skip,
        }
    }

    fn param(&self, attributes: &Attributes) -> ParamDescriptor {
        let style = attr(attributes, "style").and_then(|style| {
            let parsed = ParamStyle::parse(style);
            if parsed.is_none() {
                tracing::warn!("Unknown parameter style '{style}', using default");
            }
            parsed
        });
        ParamDescriptor {
            id: attr(attributes, "id").map(str::to_string),
            name: attr(attributes, "name").map(str::to_string),
            href: attr(attributes, "href").map(str::to_string),
            style,
            required: attr(attributes, "required").is_some_and(parse_bool),
            default: attr(attributes, "default").map(str::to_string),
            param_type: attr(attributes, "type").and_then(|t| self.resolve_qname(t)),
            options: Vec::new(),
            docs: Vec::new(),
        }
    }

    fn representation(&self, attributes: &Attributes, legacy: bool) -> RepresentationDescriptor {
        RepresentationDescriptor {
            id: attr(attributes, "id").map(str::to_string),
            href: attr(attributes, "href").map(str::to_string),
            media_type: attr(attributes, "mediaType").map(str::to_string),
            element: attr(attributes, "element").and_then(|e| self.resolve_qname(e)),
            status: if legacy {
                attr(attributes, "status").map(parse_status_lenient)
            } else {
                None
            },
            docs: Vec::new(),
            params: Vec::new(),
        }
    }

    fn handle_end_element(&mut self) {
        self.scopes.pop();
        let Some(child) = self.frames.pop() else {
            return;
        };
        if let (Some(parent), Some(document)) = (self.frames.last_mut(), self.document.as_mut()) {
            attach(parent, document, child);
        }
    }

    fn handle_text(&mut self, text: &str) {
        let owner = self.frames.iter_mut().rev().find(|f| !matches!(f, Frame::Skip));
        if let Some(Frame::Doc(doc)) = owner {
            if !doc.text.is_empty() {
                doc.text.push(' ');
            }
            doc.text.push_str(text);
        }
    }

    fn resolve_prefix(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some("http://www.w3.org/XML/1998/namespace");
        }
        self.scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.iter())
            .find(|(bound, _)| bound == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Resolve a `prefix:local` attribute value against in-scope bindings.
    ///
    /// Unprefixed values are left without a namespace.
    fn resolve_qname(&self, value: &str) -> Option<QName> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match split_prefixed(value) {
            (Some(prefix), local) => match self.resolve_prefix(prefix) {
                Some(ns) => Some(QName::new(ns, local)),
                None => {
                    tracing::warn!("Unbound namespace prefix in '{value}'");
                    Some(QName::local(local))
                }
            },
            (None, local) => Some(QName::local(local)),
        }
    }
}

/// Attach a finished child frame to its parent.
fn attach(parent: &mut Frame, document: &mut DescriptionDocument, child: Frame) {
    match (parent, child) {
        (_, Frame::Skip | Frame::Application) => {}

        (Frame::Application, Frame::Doc(doc)) => document.docs.push(doc),
        (Frame::Application, Frame::Group(group)) => document.groups.push(group),
        (Frame::Application, Frame::ResourceType(rt)) => document.resource_types.push(rt),
        (Frame::Application, Frame::Method(m)) => document.methods.push(m),
        (Frame::Application, Frame::Param(p)) => document.params.push(p),
        (Frame::Application, Frame::Representation(r)) => document.representations.push(r),

        (Frame::Group(group), Frame::Doc(doc)) => group.docs.push(doc),
        (Frame::Group(group), Frame::Resource(r)) => group.resources.push(r),

        (Frame::Resource(res), Frame::Doc(doc)) => res.docs.push(doc),
        (Frame::Resource(res), Frame::Param(p)) => res.params.push(p),
        (Frame::Resource(res), Frame::Method(m)) => res.methods.push(m),
        (Frame::Resource(res), Frame::Resource(child)) => res.children.push(child),

        (Frame::ResourceType(rt), Frame::Doc(doc)) => rt.docs.push(doc),
        (Frame::ResourceType(rt), Frame::Param(p)) => rt.params.push(p),
        (Frame::ResourceType(rt), Frame::Method(m)) => rt.methods.push(m),

        (Frame::Method(m), Frame::Doc(doc)) => m.docs.push(doc),
        (Frame::Method(m), Frame::Request(req)) => m.request = Some(req),
        (Frame::Method(m), Frame::Response(resp)) => m.responses.push(resp),

        (Frame::Request(req), Frame::Doc(doc)) => req.docs.push(doc),
        (Frame::Request(req), Frame::Param(p)) => req.params.push(p),
        (Frame::Request(req), Frame::Representation(r)) => req.representations.push(r),

        (Frame::Response(resp), Frame::Doc(doc)) => resp.docs.push(doc),
        (Frame::Response(resp), Frame::Param(p)) => resp.params.push(p),
        (Frame::Response(resp), Frame::Representation(r)) => resp.representations.push(r),
        (Frame::Response(resp), Frame::Fault(f)) => resp.legacy_faults.push(f),

        (Frame::Param(p), Frame::Doc(doc)) => p.docs.push(doc),
        (Frame::Representation(r), Frame::Doc(doc)) => r.docs.push(doc),
        (Frame::Representation(r), Frame::Param(p)) => r.params.push(p),
        (Frame::Fault(f), Frame::Doc(doc)) => f.docs.push(doc),

        (_, child) => {
            tracing::trace!("Dropping unattached element {child:?}");
        }
    }
}

fn collect_attributes(e: &BytesStart<'_>) -> Result<Attributes, WadlError> {
    let mut attributes = Vec::new();
    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| WadlError::xml(format!("Attribute error: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| WadlError::xml(format!("Attribute key error: {e}")))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| WadlError::xml(format!("Attribute value error: {e}")))?
            .to_string();
        attributes.push((key, value));
    }
    Ok(attributes)
}

fn attr<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn split_prefixed(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}

/// Parse a whitespace-separated status list, skipping invalid codes.
fn parse_status_lenient(value: &str) -> Vec<u16> {
    value
        .split_whitespace()
        .filter_map(|code| match code.parse::<u16>() {
            Ok(code) => Some(code),
            Err(_) => {
                tracing::warn!("Ignoring invalid status code '{code}'");
                None
            }
        })
        .collect()
}

/// Parse a whitespace-separated status list, failing on the first bad code.
pub(crate) fn parse_status_strict(value: &str) -> Result<Vec<u16>, std::num::ParseIntError> {
    value.split_whitespace().map(str::parse::<u16>).collect()
}
