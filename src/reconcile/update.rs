//! "Update from WADL" action on a service.

use url::Url;

use super::changes::ChangeLog;
use super::engine::{ReconcileError, ReconcileOptions, Reconciler};
use crate::base::uri::strip_trailing_slash;
use crate::host::Presentation;
use crate::tree::RestService;
use crate::wadl::{DescriptionDocument, DocumentSource, first_title, load_document};

/// Title of the message reporting the changes of an update.
pub const UPDATE_REPORT_TITLE: &str = "Resource-Update-Actions";

/// Re-imports a service from its definition.
pub struct DefinitionUpdater<'a> {
    source: &'a dyn DocumentSource,
    options: ReconcileOptions,
}

impl<'a> DefinitionUpdater<'a> {
    pub fn new(source: &'a dyn DocumentSource) -> Self {
        Self {
            source,
            options: ReconcileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReconcileOptions) -> Self {
        self.options = options;
        self
    }

    /// Update `service` from its recorded definition URL and report the
    /// outcome through `presentation`.
    pub fn perform(
        &self,
        service: &mut RestService,
        presentation: &dyn Presentation,
    ) -> Result<ChangeLog, ReconcileError> {
        let result = match service.definition_url.clone() {
            Some(uri) => self.update_from_definition(service, &uri),
            None => Err(ReconcileError::NoDefinition(service.name.clone())),
        };
        match &result {
            Ok(changes) => presentation.show_info(&changes.to_string(), UPDATE_REPORT_TITLE),
            Err(e) => {
                tracing::error!("Updating service '{}' failed: {e}", service.name);
                presentation.show_error(&e.to_string());
            }
        }
        result
    }

    /// Load the definition at `uri` and reconcile `service` with it.
    pub fn update_from_definition(
        &self,
        service: &mut RestService,
        uri: &str,
    ) -> Result<ChangeLog, ReconcileError> {
        tracing::info!("Updating service '{}' from {uri}", service.name);
        let document = load_document(self.source, uri)?;
        apply_service_settings(service, &document, uri);
        Reconciler::new(&document, self.source, &self.options).apply(service)
    }
}

/// Copy service-level details (name, base path, endpoint, origin) from the
/// document.
fn apply_service_settings(service: &mut RestService, document: &DescriptionDocument, uri: &str) {
    if let Some(title) = first_title(&document.docs, None) {
        service.name = title.to_string();
    }

    let base = match document.groups.as_slice() {
        [group] => group.base.as_str(),
        _ => "",
    };
    match Url::parse(base) {
        Ok(url) => {
            service.base_path = Some(strip_trailing_slash(url.path()).to_string());
            if let Some(endpoint) = endpoint_of(&url) {
                service.add_endpoint(endpoint);
            }
        }
        Err(_) => service.base_path = Some(base.to_string()).filter(|b| !b.is_empty()),
    }

    service.definition_url = Some(uri.to_string());
    service.wadl_version = Some(document.version.namespace().to_string());
}

/// `scheme://host[:port]`, or `None` for URLs without a host.
fn endpoint_of(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|host| !host.is_empty())?;
    Some(match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    })
}
