use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::changes::ChangeLog;
use super::prune::remove_obsolete;
use crate::tree::RestService;
use crate::wadl::{DescriptionDocument, DocumentSource, ReferenceResolver, WadlError};

/// Errors that abort a reconciliation.
///
/// Mutations applied before the error stay on the tree.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The definition could not be loaded or is not a WADL application.
    #[error(transparent)]
    Definition(#[from] WadlError),

    /// A method declares a verb that is not a known HTTP method.
    #[error("Unknown HTTP method '{verb}' for method '{method}'")]
    UnknownHttpMethod { verb: String, method: String },

    /// The service was never imported from a definition.
    #[error("Service '{0}' has no definition URL")]
    NoDefinition(String),
}

/// Tunables for one reconciliation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileOptions {
    /// Name of the request added to newly created methods.
    pub default_request_name: String,
    /// Whether hrefs into other documents are fetched.
    pub follow_remote_references: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            default_request_name: "Request 1".to_string(),
            follow_remote_references: true,
        }
    }
}

/// Result of [`reconcile_service`].
#[derive(Clone, Debug)]
pub struct Reconciliation {
    pub service: RestService,
    pub changes: ChangeLog,
}

/// Synchronizes a service's resource tree with a description document.
///
/// A reconciler is used for one call: the reference cache it owns starts
/// empty and is dropped with it.
pub struct Reconciler<'a> {
    pub(super) document: &'a DescriptionDocument,
    pub(super) resolver: ReferenceResolver<'a>,
    pub(super) options: &'a ReconcileOptions,
    pub(super) changes: ChangeLog,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        document: &'a DescriptionDocument,
        source: &'a dyn DocumentSource,
        options: &'a ReconcileOptions,
    ) -> Self {
        let resolver = ReferenceResolver::new(document, source)
            .with_remote(options.follow_remote_references);
        Self {
            document,
            resolver,
            options,
            changes: ChangeLog::new(),
        }
    }

    /// Prune obsolete resources, then merge the document into `service`.
    pub fn apply(mut self, service: &mut RestService) -> Result<ChangeLog, ReconcileError> {
        remove_obsolete(service, self.document, &mut self.changes);
        self.merge(service)?;

        tracing::info!(
            "Reconciled service '{}': {} added, {} deleted, {} documents referenced",
            service.name,
            self.changes.additions(),
            self.changes.deletions(),
            self.resolver.cached_documents()
        );
        Ok(self.changes)
    }
}

/// Reconcile a copy of `service`, leaving the original untouched.
pub fn reconcile_service(
    service: &RestService,
    document: &DescriptionDocument,
    source: &dyn DocumentSource,
    options: &ReconcileOptions,
) -> Result<Reconciliation, ReconcileError> {
    let mut service = service.clone();
    let changes = Reconciler::new(document, source, options).apply(&mut service)?;
    Ok(Reconciliation { service, changes })
}
