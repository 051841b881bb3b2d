//! Additive half of reconciliation: match-or-create resources and methods,
//! then copy definition details onto them.

use super::ReconcileError;
use super::engine::Reconciler;
use super::params::apply;
use crate::tree::{
    HttpMethod, RepresentationKind, ResourceContainer, RestMethod, RestResource, RestService,
};
use crate::wadl::{
    MethodDescriptor, ParamDescriptor, RepresentationDescriptor, ResourceDescriptor,
    ResponseDescriptor, first_title,
};

impl Reconciler<'_> {
    pub(super) fn merge(&mut self, service: &mut RestService) -> Result<(), ReconcileError> {
        let document = self.document;
        let grouped = document.groups.len() > 1;

        for group in &document.groups {
            if grouped {
                let index = match service.position_of(&group.base) {
                    Some(index) => index,
                    None => {
                        self.changes.added(&group.base);
                        service.add_resource(&group.base, &group.base);
                        service.resources.len() - 1
                    }
                };
                self.merge_resources(&mut service.resources[index], &group.resources)?;
            } else {
                self.merge_resources(service, &group.resources)?;
            }
        }
        Ok(())
    }

    /// Match each descriptor to a resource of `container` by path, creating
    /// missing ones, and recurse into children.
    fn merge_resources<C: ResourceContainer>(
        &mut self,
        container: &mut C,
        descriptors: &[ResourceDescriptor],
    ) -> Result<(), ReconcileError> {
        for descriptor in descriptors {
            let existing = descriptor.key().and_then(|path| container.position_of(path));
            let index = match existing {
                Some(index) => index,
                None => {
                    let title = descriptor.title();
                    self.changes.added(&title);
                    container.add_resource(&title, descriptor.key().unwrap_or_default());
                    container.resources().len() - 1
                }
            };

            let resource = &mut container.resources_mut()[index];
            self.init_resource(resource, descriptor)?;
            self.merge_resources(resource, &descriptor.children)?;
        }
        Ok(())
    }

    fn init_resource(
        &mut self,
        resource: &mut RestResource,
        descriptor: &ResourceDescriptor,
    ) -> Result<(), ReconcileError> {
        for param in &descriptor.params {
            if let Some((name, param)) = self.resolve_param(param) {
                apply(&param, resource.params.upsert(&name));
            }
        }

        for method in &descriptor.methods {
            let method = self.resolve_method(method);
            self.update_method(resource, &method)?;
        }

        for token in &descriptor.types {
            let Some(resource_type) = self.resolver.resolve_type(token) else {
                continue;
            };
            for method in &resource_type.methods {
                let method = self.resolve_method(method);
                let index = self.update_method(resource, &method)?;
                for param in &resource_type.params {
                    if let Some((name, param)) = self.resolve_param(param) {
                        apply(&param, resource.methods[index].params.upsert(&name));
                    }
                }
            }
        }
        Ok(())
    }

    /// Match or create the method described by `descriptor` and bring it up
    /// to date. Returns the method's index on `resource`.
    fn update_method(
        &mut self,
        resource: &mut RestResource,
        descriptor: &MethodDescriptor,
    ) -> Result<usize, ReconcileError> {
        let name = descriptor.display_name();
        let (index, created) = resource.method_index_or_insert(&name);
        if created {
            tracing::debug!("Created method '{name}' on resource '{}'", resource.name);
        }
        let method = &mut resource.methods[index];

        let verb = descriptor.name.as_deref().unwrap_or_default();
        method.http_method =
            verb.parse::<HttpMethod>()
                .map_err(|_| ReconcileError::UnknownHttpMethod {
                    verb: verb.to_string(),
                    method: name.clone(),
                })?;

        if let Some(request) = &descriptor.request {
            for param in &request.params {
                if let Some((param_name, param)) = self.resolve_param(param) {
                    apply(&param, method.params.add_fresh(&param_name));
                }
            }

            method.clear_representations(RepresentationKind::Request);
            for representation in &request.representations {
                let representation = self.resolve_representation(representation);
                add_representation(method, &representation, RepresentationKind::Request, None);
            }
        }

        let legacy = self.document.version.is_legacy();
        for response in &descriptor.responses {
            for representation in &response.representations {
                self.add_response_representation(method, response, representation, legacy);
            }
            for fault in &response.legacy_faults {
                match fault.to_representation() {
                    Ok(representation) => {
                        self.add_response_representation(method, response, &representation, legacy)
                    }
                    Err(e) => tracing::warn!("Skipping fault on method '{name}': {e}"),
                }
            }
        }

        if created {
            method.add_request(self.options.default_request_name.as_str());
        }
        Ok(index)
    }

    /// Append a response or fault representation.
    ///
    /// Status comes from the response, or from the representation itself in
    /// legacy documents. All-error status sets classify as faults.
    fn add_response_representation(
        &mut self,
        method: &mut RestMethod,
        response: &ResponseDescriptor,
        representation: &RepresentationDescriptor,
        legacy: bool,
    ) {
        let representation = self.resolve_representation(representation);
        let status = if legacy {
            representation.status.clone()
        } else {
            Some(response.status.clone())
        };
        let kind = match &status {
            Some(codes) if !codes.is_empty() && codes.iter().all(|code| *code >= 400) => {
                RepresentationKind::Fault
            }
            _ => RepresentationKind::Response,
        };
        add_representation(method, &representation, kind, status);
    }

    fn resolve_method(&mut self, method: &MethodDescriptor) -> MethodDescriptor {
        self.resolver
            .resolve(method)
            .unwrap_or_else(|| method.clone())
    }

    fn resolve_representation(
        &mut self,
        representation: &RepresentationDescriptor,
    ) -> RepresentationDescriptor {
        self.resolver
            .resolve(representation)
            .unwrap_or_else(|| representation.clone())
    }

    /// Resolve a param, skipping unresolved and unnamed ones.
    fn resolve_param(&mut self, param: &ParamDescriptor) -> Option<(String, ParamDescriptor)> {
        let resolved = self.resolver.resolve(param)?;
        match resolved.name.clone().filter(|name| !name.is_empty()) {
            Some(name) => Some((name, resolved)),
            None => {
                tracing::warn!("Skipping parameter without a name");
                None
            }
        }
    }
}

/// Append a new representation built from `descriptor`.
fn add_representation(
    method: &mut RestMethod,
    descriptor: &RepresentationDescriptor,
    kind: RepresentationKind,
    status: Option<Vec<u16>>,
) {
    let representation = method.add_representation(kind);
    representation.media_type = descriptor.media_type.clone();
    representation.element = descriptor.element.clone();
    if let Some(status) = status {
        representation.status = status;
    }
    representation.id = descriptor.id.clone();
    representation.description = first_title(&descriptor.docs, None).map(str::to_string);
}
