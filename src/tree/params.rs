//! Parameter properties on resources and methods.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::base::{ParamStyle, QName};

/// One user-editable parameter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamProperty {
    pub name: String,
    #[serde(default)]
    pub style: ParamStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<QName>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParamProperty {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: ParamStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Parameters keyed by name, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamHolder {
    properties: IndexMap<String, ParamProperty>,
}

impl ParamHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ParamProperty> {
        self.properties.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ParamProperty> {
        self.properties.get_mut(name)
    }

    /// Existing property called `name`, or a new one appended at the end.
    pub fn upsert(&mut self, name: &str) -> &mut ParamProperty {
        self.properties
            .entry(name.to_string())
            .or_insert_with(|| ParamProperty::new(name))
    }

    /// Replace any property called `name` with a fresh one.
    ///
    /// A replaced property keeps its position.
    pub fn add_fresh(&mut self, name: &str) -> &mut ParamProperty {
        let (index, _) = self
            .properties
            .insert_full(name.to_string(), ParamProperty::new(name));
        &mut self.properties[index]
    }

    /// Insert `property`, replacing one of the same name.
    pub fn insert(&mut self, property: ParamProperty) -> Option<ParamProperty> {
        self.properties.insert(property.name.clone(), property)
    }

    pub fn remove(&mut self, name: &str) -> Option<ParamProperty> {
        self.properties.shift_remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParamProperty> {
        self.properties.values()
    }
}
