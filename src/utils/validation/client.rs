//! Client-side validation metadata.
//!
//! Rules describe themselves as `data-val-*` attributes that a browser script reads
//! to run the same checks before the form is submitted.

use std::collections::BTreeMap;

use serde::Serialize;

/// Attribute name to attribute value, in name order
pub type ClientMetadata = BTreeMap<String, String>;

/// Anything that can receive string attributes while a field is rendered
pub trait AttributeSink {
    fn set_attribute(&mut self, name: &str, value: String);
}

impl AttributeSink for ClientMetadata {
    fn set_attribute(&mut self, name: &str, value: String) {
        self.insert(name.to_string(), value);
    }
}

/// Rendering context of one form field, handed to the template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientValidationContext {
    field: String,
    attributes: ClientMetadata,
}

impl ClientValidationContext {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            attributes: ClientMetadata::new(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn attributes(&self) -> &ClientMetadata {
        &self.attributes
    }
}

impl AttributeSink for ClientValidationContext {
    fn set_attribute(&mut self, name: &str, value: String) {
        self.attributes.set_attribute(name, value);
    }
}
