use serde::{Deserialize, Serialize};

use super::ResourceContainer;
use super::method::RestMethod;
use super::params::{ParamHolder, ParamProperty};

/// A REST service: the root of a resource tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RestService {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<String>,
    /// Where the service definition was imported from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_url: Option<String>,
    /// Namespace of the WADL dialect last imported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wadl_version: Option<String>,
    #[serde(default)]
    pub resources: Vec<RestResource>,
}

impl RestService {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add `endpoint` unless it is already registered.
    pub fn add_endpoint(&mut self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        if !self.endpoints.contains(&endpoint) {
            self.endpoints.push(endpoint);
        }
    }

    /// Depth-first walk over every resource in the tree.
    pub fn all_resources(&self) -> Vec<&RestResource> {
        let mut out = Vec::new();
        let mut stack: Vec<&RestResource> = self.resources.iter().rev().collect();
        while let Some(resource) = stack.pop() {
            out.push(resource);
            stack.extend(resource.children.iter().rev());
        }
        out
    }
}

impl ResourceContainer for RestService {
    fn resources(&self) -> &[RestResource] {
        &self.resources
    }

    fn resources_mut(&mut self) -> &mut Vec<RestResource> {
        &mut self.resources
    }
}

/// A resource path segment with its params, methods and children.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RestResource {
    pub name: String,
    /// Matching key; empty for anonymous resources.
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "ParamHolder::is_empty")]
    pub params: ParamHolder,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<RestMethod>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RestResource>,
}

impl RestResource {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn property(&self, name: &str) -> Option<&ParamProperty> {
        self.params.get(name)
    }

    pub fn method(&self, name: &str) -> Option<&RestMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn method_mut(&mut self, name: &str) -> Option<&mut RestMethod> {
        self.methods.iter_mut().find(|m| m.name == name)
    }

    /// Index of the method called `name`, creating it at the end if absent.
    ///
    /// The flag is `true` when the method was created.
    pub fn method_index_or_insert(&mut self, name: &str) -> (usize, bool) {
        match self.methods.iter().position(|m| m.name == name) {
            Some(index) => (index, false),
            None => {
                self.methods.push(RestMethod::new(name));
                (self.methods.len() - 1, true)
            }
        }
    }
}

impl ResourceContainer for RestResource {
    fn resources(&self) -> &[RestResource] {
        &self.children
    }

    fn resources_mut(&mut self) -> &mut Vec<RestResource> {
        &mut self.children
    }
}
