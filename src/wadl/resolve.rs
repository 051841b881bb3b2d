//! Href resolution across definition documents.
//!
//! Methods, params, representations and resource types may be declared once
//! at application level and referenced elsewhere with an `href`:
//!
//! - `#id` looks the id up in the document that contains the reference.
//! - `other.wadl#id` loads `other.wadl` (relative to the referencing
//!   document) and looks the id up there.
//! - `other.wadl` without a fragment loads the document, then falls back to
//!   matching the href text against the root document's ids.
//!
//! Loaded documents are cached by URI for the lifetime of the resolver, so a
//! document is fetched at most once per reconciliation. Load failures are
//! cached too and make every reference into that document unresolved.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::model::{
    DescriptionDocument, MethodDescriptor, ParamDescriptor, RepresentationDescriptor,
    ResourceTypeDescriptor,
};
use super::source::{DocumentSource, load_document};
use crate::base::uri::{resolve_document_uri, split_href};

/// Capabilities an element needs to take part in href resolution.
pub trait Referenceable: Clone {
    /// Human-readable element kind, for diagnostics.
    const KIND: &'static str;

    fn id(&self) -> Option<&str>;

    fn href(&self) -> Option<&str>;

    /// Document-level list this kind of element is declared in.
    fn pool(document: &DescriptionDocument) -> &[Self];

    /// What a reference resolves to when it cannot be followed.
    fn unresolved(original: &Self) -> Option<Self>;
}

impl Referenceable for MethodDescriptor {
    const KIND: &'static str = "method";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    fn pool(document: &DescriptionDocument) -> &[Self] {
        &document.methods
    }

    fn unresolved(original: &Self) -> Option<Self> {
        Some(original.clone())
    }
}

impl Referenceable for RepresentationDescriptor {
    const KIND: &'static str = "representation";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    fn pool(document: &DescriptionDocument) -> &[Self] {
        &document.representations
    }

    fn unresolved(original: &Self) -> Option<Self> {
        Some(original.clone())
    }
}

impl Referenceable for ParamDescriptor {
    const KIND: &'static str = "param";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    fn pool(document: &DescriptionDocument) -> &[Self] {
        &document.params
    }

    fn unresolved(_original: &Self) -> Option<Self> {
        None
    }
}

impl Referenceable for ResourceTypeDescriptor {
    const KIND: &'static str = "resource_type";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn href(&self) -> Option<&str> {
        None
    }

    fn pool(document: &DescriptionDocument) -> &[Self] {
        &document.resource_types
    }

    fn unresolved(_original: &Self) -> Option<Self> {
        None
    }
}

/// Document an href is interpreted against.
#[derive(Clone)]
enum Scope {
    Root,
    Loaded(Rc<DescriptionDocument>),
}

/// Resolves hrefs for one reconciliation call.
pub struct ReferenceResolver<'a> {
    root: &'a DescriptionDocument,
    source: &'a dyn DocumentSource,
    /// Normalized URI (no fragment) -> loaded document, `None` if loading failed.
    cache: HashMap<String, Option<Rc<DescriptionDocument>>>,
    follow_remote: bool,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(root: &'a DescriptionDocument, source: &'a dyn DocumentSource) -> Self {
        Self {
            root,
            source,
            cache: HashMap::new(),
            follow_remote: true,
        }
    }

    /// Whether hrefs into other documents are followed at all.
    pub fn with_remote(mut self, follow_remote: bool) -> Self {
        self.follow_remote = follow_remote;
        self
    }

    /// Number of distinct documents loaded (or attempted) so far.
    pub fn cached_documents(&self) -> usize {
        self.cache.len()
    }

    /// Resolve `element` to the element its href points at.
    ///
    /// Elements without an href resolve to themselves. When the reference
    /// cannot be followed the result is [`Referenceable::unresolved`].
    pub fn resolve<T: Referenceable>(&mut self, element: &T) -> Option<T> {
        let Some(href) = element.href().filter(|href| !href.trim().is_empty()) else {
            return Some(element.clone());
        };
        let mut visited = HashSet::new();
        match self.follow::<T>(href, Scope::Root, &mut visited) {
            Some(found) => Some(found),
            None => {
                tracing::debug!("Unresolved {} reference '{href}'", T::KIND);
                T::unresolved(element)
            }
        }
    }

    /// Resolve one token of a resource's `type` attribute.
    ///
    /// A bare id is matched against the root document first; anything else
    /// is treated as an href.
    pub fn resolve_type(&mut self, token: &str) -> Option<ResourceTypeDescriptor> {
        if !token.contains('#') {
            if let Some(found) = find_by_id(&self.root.resource_types, token) {
                return Some(found.clone());
            }
        }
        let mut visited = HashSet::new();
        let resolved = self.follow::<ResourceTypeDescriptor>(token, Scope::Root, &mut visited);
        if resolved.is_none() {
            tracing::debug!("Unresolved resource_type reference '{token}'");
        }
        resolved
    }

    fn follow<T: Referenceable>(
        &mut self,
        href: &str,
        scope: Scope,
        visited: &mut HashSet<(String, String)>,
    ) -> Option<T> {
        let (document_part, fragment) = split_href(href);

        let (found, found_scope) = if document_part.is_empty() {
            let id = fragment?;
            let found = find_by_id(T::pool(self.document(&scope)), id).cloned();
            (found, scope)
        } else {
            if !self.follow_remote {
                tracing::debug!("Not following external {} reference '{href}'", T::KIND);
                return None;
            }
            let uri = resolve_document_uri(self.document(&scope).uri.as_deref(), document_part);
            let loaded = self.load(&uri)?;
            match fragment {
                Some(id) => {
                    let found = find_by_id(T::pool(&loaded), id).cloned();
                    (found, Scope::Loaded(loaded))
                }
                None => (find_by_id(T::pool(self.root), href).cloned(), Scope::Root),
            }
        };

        let found = found?;
        let Some(next) = found.href().filter(|h| !h.trim().is_empty()) else {
            return Some(found);
        };

        let key = (
            self.document(&found_scope).uri.clone().unwrap_or_default(),
            found.id().unwrap_or_default().to_string(),
        );
        if !visited.insert(key) {
            tracing::warn!("Reference cycle detected while resolving {} '{href}'", T::KIND);
            return None;
        }
        let next = next.to_string();
        self.follow(&next, found_scope, visited)
    }

    fn document<'s>(&'s self, scope: &'s Scope) -> &'s DescriptionDocument {
        match scope {
            Scope::Root => self.root,
            Scope::Loaded(document) => document,
        }
    }

    /// Load a referenced document through the cache.
    fn load(&mut self, uri: &str) -> Option<Rc<DescriptionDocument>> {
        if let Some(cached) = self.cache.get(uri) {
            tracing::trace!("Reference cache hit for {uri}");
            return cached.clone();
        }

        let loaded = match load_document(self.source, uri) {
            Ok(document) => {
                tracing::debug!("Loaded referenced definition {uri}");
                Some(Rc::new(document))
            }
            Err(e) => {
                tracing::warn!("Failed to load referenced definition {uri}: {e}");
                None
            }
        };
        self.cache.insert(uri.to_string(), loaded.clone());
        loaded
    }
}

fn find_by_id<'d, T: Referenceable>(pool: &'d [T], id: &str) -> Option<&'d T> {
    pool.iter().find(|element| element.id() == Some(id))
}
