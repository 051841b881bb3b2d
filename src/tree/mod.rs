//! The live, user-editable resource tree of a REST service.
//!
//! ```text
//! RestService
//! └── resources: Vec<RestResource>        (matched by path)
//!     ├── params: ParamHolder
//!     ├── methods: Vec<RestMethod>         (matched by name)
//!     │   ├── params / representations / requests
//!     └── children: Vec<RestResource>      (recursive)
//! ```
//!
//! Nodes are long-lived and owned by a project. Reconciliation mutates them
//! in place.

mod method;
mod params;
mod resource;

pub use method::{
    HttpMethod, ParseHttpMethodError, Representation, RepresentationKind, RestMethod,
    RestRequest,
};
pub use params::{ParamHolder, ParamProperty};
pub use resource::{RestResource, RestService};

/// Something that owns an ordered list of resources matched by path.
///
/// Implemented by [`RestService`] (top-level resources) and [`RestResource`]
/// (child resources).
pub trait ResourceContainer {
    fn resources(&self) -> &[RestResource];

    fn resources_mut(&mut self) -> &mut Vec<RestResource>;

    /// Position of the resource whose path equals `path`.
    fn position_of(&self, path: &str) -> Option<usize> {
        self.resources().iter().position(|r| r.path == path)
    }

    fn resource(&self, path: &str) -> Option<&RestResource> {
        self.resources().iter().find(|r| r.path == path)
    }

    fn resource_mut(&mut self, path: &str) -> Option<&mut RestResource> {
        self.resources_mut().iter_mut().find(|r| r.path == path)
    }

    /// Append a new resource and return it.
    fn add_resource(&mut self, name: &str, path: &str) -> &mut RestResource {
        let resources = self.resources_mut();
        resources.push(RestResource::new(name, path));
        let last = resources.len() - 1;
        &mut resources[last]
    }

    /// Remove the resource at `index`, returning it.
    fn delete_resource(&mut self, index: usize) -> Option<RestResource> {
        let resources = self.resources_mut();
        (index < resources.len()).then(|| resources.remove(index))
    }
}
