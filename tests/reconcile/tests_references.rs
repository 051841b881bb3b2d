//! Href resolution during reconciliation.

use wadlsync::reconcile::{ReconcileOptions, Reconciler};
use wadlsync::tree::{ResourceContainer, RestService};
use wadlsync::wadl::{MemorySource, MethodDescriptor, ReferenceResolver};

use crate::helpers::fixtures::{PETSTORE, REMOTE_REFS, SHARED, SHARED_URI};
use crate::helpers::{document, reconcile_with};

fn shared_source() -> MemorySource {
    MemorySource::new().with_document(SHARED_URI, SHARED)
}

#[test]
fn test_same_document_reference_needs_no_fetch() {
    let source = MemorySource::new();
    let mut service = RestService::new("Pet Store");
    reconcile_with(&mut service, PETSTORE, &source);

    assert_eq!(source.total_fetches(), 0);
    let pet = service
        .resource("pets")
        .and_then(|pets| pets.resource("{id}"))
        .unwrap();
    assert!(pet.method("Get Pet - getPet").is_some());
}

#[test]
fn test_each_document_is_fetched_once_per_run() {
    let source = shared_source();
    let mut service = RestService::new("Pets");
    reconcile_with(&mut service, REMOTE_REFS, &source);

    assert_eq!(source.fetch_count(SHARED_URI), 1);
    assert_eq!(
        source.fetch_count("http://api.example.com/defs/missing.wadl"),
        1
    );

    let pets = service.resource("pets").unwrap();
    assert_eq!(pets.property("limit").unwrap().value.as_deref(), Some("50"));
    assert!(pets.method("Get Pets - getPets").is_some());

    let owners = service.resource("owners").unwrap();
    assert!(owners.property("limit").is_some());
    assert!(owners.property("offset").is_none());
    assert_eq!(owners.params.len(), 1);
    assert!(owners.method("Get Owners - getOwners").is_some());
}

#[test]
fn test_cache_does_not_outlive_a_run() {
    let source = shared_source();
    let mut service = RestService::new("Pets");
    reconcile_with(&mut service, REMOTE_REFS, &source);
    reconcile_with(&mut service, REMOTE_REFS, &source);

    assert_eq!(source.fetch_count(SHARED_URI), 2);
}

#[test]
fn test_remote_references_can_be_disabled() {
    let source = shared_source();
    let document = document(PARAM_REF_ONLY);
    let options = ReconcileOptions {
        follow_remote_references: false,
        ..Default::default()
    };
    let mut service = RestService::new("Pets");
    Reconciler::new(&document, &source, &options)
        .apply(&mut service)
        .unwrap();

    assert_eq!(source.total_fetches(), 0);
    let pets = service.resource("pets").unwrap();
    assert!(pets.params.is_empty());
    assert!(pets.method("GET").is_some());
}

const PARAM_REF_ONLY: &str = r##"<application xmlns="http://wadl.dev.java.net/2009/02">
  <resources base="https://api.example.com/">
    <resource path="pets">
      <param href="common.wadl#limit"/>
      <method name="GET"/>
    </resource>
  </resources>
</application>"##;

#[test]
fn test_resolver_reuses_loaded_documents() {
    let source = shared_source();
    let root = document(REMOTE_REFS);
    let mut resolver = ReferenceResolver::new(&root, &source);

    let by_href = |href: &str| MethodDescriptor {
        href: Some(href.to_string()),
        ..Default::default()
    };
    let pets = resolver.resolve(&by_href("common.wadl#getPets")).unwrap();
    let owners = resolver.resolve(&by_href("common.wadl#getOwners")).unwrap();

    assert_eq!(pets.id.as_deref(), Some("getPets"));
    assert_eq!(owners.id.as_deref(), Some("getOwners"));
    assert_eq!(source.fetch_count(SHARED_URI), 1);
    assert_eq!(resolver.cached_documents(), 1);
}
