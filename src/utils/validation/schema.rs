//! Per-field rule registry.
//!
//! A `FormSchema` maps form field names to the rules declared for them and is the
//! single place where a bound form gets validated or a field gets its client
//! attributes.

use std::collections::BTreeMap;

use log::debug;

use super::client::{AttributeSink, ClientValidationContext};
use super::error::{FormErrors, RuleError, ValidationFailure};
use super::types::{BoundForm, FormValue};
use super::uploaded_image::UploadedImageRule;
use crate::consts::{DEFAULT_MAX_LENGTH_KB, DEFAULT_UPLOAD_FIELD};

/// A rule that can be attached to a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    UploadedImage(UploadedImageRule),
}

impl FieldRule {
    /// Checks the value bound to the field, which may be absent
    pub fn validate(&self, value: Option<&FormValue>) -> Result<(), ValidationFailure> {
        match self {
            FieldRule::UploadedImage(rule) => rule.validate(value.and_then(FormValue::as_file)),
        }
    }

    pub fn describe_for_client<C>(&self, context: Option<&mut C>) -> Result<(), RuleError>
    where
        C: AttributeSink + ?Sized,
    {
        match self {
            FieldRule::UploadedImage(rule) => rule.describe_for_client(context),
        }
    }
}

impl From<UploadedImageRule> for FieldRule {
    fn from(rule: UploadedImageRule) -> Self {
        FieldRule::UploadedImage(rule)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSchema {
    fields: BTreeMap<String, Vec<FieldRule>>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// The schema used when no configuration is provided: a single `image`
    /// field limited to 500 kB.
    pub fn default_upload() -> Result<Self, RuleError> {
        let rule = UploadedImageRule::new(DEFAULT_MAX_LENGTH_KB)?;
        Ok(Self::new().with_rule(DEFAULT_UPLOAD_FIELD, rule))
    }

    /// Declares a rule for a field, builder style
    pub fn with_rule(mut self, field: &str, rule: impl Into<FieldRule>) -> Self {
        self.add_rule(field, rule);
        self
    }

    pub fn add_rule(&mut self, field: &str, rule: impl Into<FieldRule>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(rule.into());
    }

    /// Returns the rules declared for a field, in declaration order
    pub fn rules_for(&self, field: &str) -> Option<&[FieldRule]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Names of the declared fields, in name order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Validates every declared field of a bound form.
    ///
    /// Each rule reports at most one message. Submitted fields without declared
    /// rules are ignored.
    pub fn validate(&self, form: &BoundForm) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        for (field, rules) in &self.fields {
            let value = form.get(field);
            for rule in rules {
                if let Err(failure) = rule.validate(value) {
                    debug!("Field '{}' failed validation: {}", field, failure);
                    errors.push(field, failure.message());
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Builds the client rendering context of a declared field
    pub fn client_context(&self, field: &str) -> Result<ClientValidationContext, RuleError> {
        let rules = self
            .rules_for(field)
            .ok_or_else(|| RuleError::UnknownField(field.to_string()))?;

        let mut context = ClientValidationContext::new(field);
        for rule in rules {
            rule.describe_for_client(Some(&mut context))?;
        }
        Ok(context)
    }
}
