//! Error and failure types of the validation system.
//!
//! `RuleError` signals a programming or configuration mistake and should reach the
//! integrating developer. `ValidationFailure` is the normal outcome of a file that
//! breaks a rule and carries the message shown to the end user.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::utils::error_messages::VALIDATION_ERROR;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("Maximum file length must be a positive number of kilobytes, got {0}")]
    InvalidMaxLength(i64),
    #[error("A client validation context is required")]
    MissingContext,
    #[error("No rules are declared for field '{0}'")]
    UnknownField(String),
}

/// Which check of a rule rejected the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    TooLarge,
    Extension,
}

/// A failed check, holding the message to display next to the field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    kind: FailureKind,
    message: String,
}

impl ValidationFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Messages collected per field while validating a whole form.
/// Serializes as a plain `{ field: [messages] }` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{}", VALIDATION_ERROR)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against a field
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns the messages recorded for a field, if any
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Iterates over the fields that failed, in name order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }

    /// Number of fields with at least one message
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_errors_grouping() {
        let mut errors = FormErrors::new();
        assert!(errors.is_empty());

        errors.push("image", "first");
        errors.push("image", "second");
        errors.push("avatar", "third");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("image"), Some(&["first".to_string(), "second".to_string()][..]));
        assert_eq!(errors.get("missing"), None);

        // Fields come back in name order
        let names: Vec<_> = errors.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["avatar", "image"]);
    }

    #[test]
    fn test_form_errors_serialization() {
        let mut errors = FormErrors::new();
        errors.push("image", "The file cannot exceed 500 kB");

        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value, serde_json::json!({ "image": ["The file cannot exceed 500 kB"] }));
        assert_eq!(errors.to_string(), VALIDATION_ERROR);
    }

    #[test]
    fn test_failure_display() {
        let failure = ValidationFailure::new(FailureKind::Extension, "The file must be one of .jpg, .png");
        assert_eq!(failure.kind(), FailureKind::Extension);
        assert_eq!(failure.to_string(), "The file must be one of .jpg, .png");
    }
}
