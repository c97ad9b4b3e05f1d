//! Validation rule for uploaded image files.
//!
//! The rule limits the size of an uploaded file and only accepts `.jpg` and `.png`
//! files. It checks submitted files on the server and emits matching `data-val-*`
//! attributes so the browser can reject the same files before submission.
//!
//! The extension list is formatted differently on both sides: the server message
//! keeps the dots and joins with `", "` (`.jpg, .png`) while the client attributes
//! strip the dots and join with a bare comma (`jpg,png`). Existing client scripts
//! depend on the latter, so both formats are kept as they are.

use log::debug;

use super::client::{AttributeSink, ClientMetadata};
use super::constants::{BYTES_PER_KB, CLIENT_RULE_PREFIX, IMAGE_EXTENSIONS};
use super::error::{FailureKind, RuleError, ValidationFailure};
use super::types::FormFile;
use crate::utils::error_messages::{extensions_message, max_length_message, INVALID_FILE};

/// Size and extension limits for one uploaded image field.
/// Immutable once built, so a single instance can be shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImageRule {
    max_length_kb: i64,
    max_length_bytes: u64,
    allowed_extensions: Vec<String>,
}

impl UploadedImageRule {
    /// Creates a rule accepting `.jpg` and `.png` files of at most
    /// `max_length_kb` kilobytes.
    ///
    /// # Returns
    /// * `Err(RuleError::InvalidMaxLength)` if the limit is zero, negative, or too
    ///   large to express in bytes
    pub fn new(max_length_kb: i64) -> Result<Self, RuleError> {
        let max_length_bytes = u64::try_from(max_length_kb)
            .ok()
            .filter(|&kb| kb > 0)
            .and_then(|kb| kb.checked_mul(BYTES_PER_KB))
            .ok_or(RuleError::InvalidMaxLength(max_length_kb))?;

        Ok(Self {
            max_length_kb,
            max_length_bytes,
            allowed_extensions: IMAGE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        })
    }

    pub fn max_length_kb(&self) -> i64 {
        self.max_length_kb
    }

    /// The size limit in bytes. Files of exactly this size are accepted.
    pub fn max_length_bytes(&self) -> u64 {
        self.max_length_bytes
    }

    /// Lower-case, dot-prefixed extensions, in declaration order
    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Checks a bound value against the rule.
    ///
    /// An absent value passes: the rule does not make the field required. Size is
    /// checked first and only the first failing check is reported.
    pub fn validate<F>(&self, candidate: Option<&F>) -> Result<(), ValidationFailure>
    where
        F: FormFile + ?Sized,
    {
        let Some(file) = candidate else {
            return Ok(());
        };

        if file.length() > self.max_length_bytes {
            debug!(
                "Rejected {}: {} bytes over limit of {} bytes",
                file.file_name(),
                file.length(),
                self.max_length_bytes
            );
            return Err(ValidationFailure::new(
                FailureKind::TooLarge,
                max_length_message(self.max_length_kb),
            ));
        }

        let extension = file.extension();
        if !self.allowed_extensions.iter().any(|allowed| *allowed == extension) {
            debug!("Rejected {}: extension '{}' not allowed", file.file_name(), extension);
            return Err(ValidationFailure::new(
                FailureKind::Extension,
                extensions_message(&self.allowed_extensions.join(", ")),
            ));
        }

        Ok(())
    }

    /// Writes the client validation attributes of the rule into `context`.
    ///
    /// A missing context is a programming error on the caller's side and is
    /// reported as `RuleError::MissingContext`.
    pub fn describe_for_client<C>(&self, context: Option<&mut C>) -> Result<(), RuleError>
    where
        C: AttributeSink + ?Sized,
    {
        let context = context.ok_or(RuleError::MissingContext)?;
        self.write_attributes(context);
        Ok(())
    }

    /// Builds the client validation attributes into a fresh map
    pub fn client_metadata(&self) -> ClientMetadata {
        let mut metadata = ClientMetadata::new();
        self.write_attributes(&mut metadata);
        metadata
    }

    fn write_attributes<C>(&self, context: &mut C)
    where
        C: AttributeSink + ?Sized,
    {
        let client_extensions = self.client_extensions();

        context.set_attribute("data-val", "true".to_string());
        context.set_attribute(CLIENT_RULE_PREFIX, INVALID_FILE.to_string());
        context.set_attribute(
            &format!("{}-maxlength", CLIENT_RULE_PREFIX),
            self.max_length_kb.to_string(),
        );
        context.set_attribute(
            &format!("{}-maxlengthmessage", CLIENT_RULE_PREFIX),
            max_length_message(self.max_length_kb),
        );
        context.set_attribute(
            &format!("{}-extensionsmessage", CLIENT_RULE_PREFIX),
            extensions_message(&client_extensions),
        );
        context.set_attribute(&format!("{}-extensions", CLIENT_RULE_PREFIX), client_extensions);
    }

    fn client_extensions(&self) -> String {
        self.allowed_extensions
            .iter()
            .map(|ext| ext.replace('.', ""))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::{ClientValidationContext, UploadedFile};

    fn rule() -> UploadedImageRule {
        UploadedImageRule::new(500).unwrap()
    }

    fn file(name: &str, length: usize) -> UploadedFile {
        UploadedFile::new(name, vec![0; length])
    }

    #[test]
    fn test_constructor_limits() {
        let invalid_limits = vec![0, -1, -500, i64::MIN, i64::MAX];
        for limit in invalid_limits {
            assert_eq!(
                UploadedImageRule::new(limit),
                Err(RuleError::InvalidMaxLength(limit)),
                "Limit {} should be rejected", limit
            );
        }

        let rule = UploadedImageRule::new(1).unwrap();
        assert_eq!(rule.max_length_bytes(), 1024);
        assert_eq!(rule.allowed_extensions(), &[".jpg".to_string(), ".png".to_string()][..]);
    }

    #[test]
    fn test_valid_files() {
        let rule = rule();
        let valid_files = vec![
            file("cat.png", 400_000),
            file("cat.jpg", 0),
            file("PHOTO.JPG", 1000),
            file("Mixed.PnG", 1000),
            file("exact.png", 500 * 1024), // Equal to the limit
        ];

        for candidate in valid_files {
            assert!(
                rule.validate(Some(&candidate)).is_ok(),
                "Should accept file: {}", candidate.file_name()
            );
        }
    }

    #[test]
    fn test_size_checked_first() {
        let rule = rule();
        let oversized = vec![
            file("cat.png", 600_000),
            file("cat.gif", 600_000),
            file("no_extension", 500 * 1024 + 1),
        ];

        for candidate in oversized {
            let failure = rule.validate(Some(&candidate)).unwrap_err();
            assert_eq!(failure.kind(), FailureKind::TooLarge, "For file: {}", candidate.file_name());
            assert_eq!(failure.message(), "The file cannot exceed 500 kB");
        }
    }

    #[test]
    fn test_invalid_extensions() {
        let rule = rule();
        let invalid_files = vec![
            file("cat.gif", 100),
            file("cat.jpeg", 100),
            file("cat", 100),
            file("cat.png.exe", 100),
            file("cat.", 100),
        ];

        for candidate in invalid_files {
            let failure = rule.validate(Some(&candidate)).unwrap_err();
            assert_eq!(failure.kind(), FailureKind::Extension, "For file: {}", candidate.file_name());
            assert_eq!(failure.message(), "The file must be one of .jpg, .png");
        }
    }

    #[test]
    fn test_absent_value_passes() {
        let rule = rule();
        assert!(rule.validate::<UploadedFile>(None).is_ok());
    }

    #[test]
    fn test_trait_object_candidate() {
        let rule = rule();
        let candidate = file("cat.png", 10);
        let dynamic: &dyn FormFile = &candidate;
        assert!(rule.validate(Some(dynamic)).is_ok());
    }

    #[test]
    fn test_client_metadata() {
        let metadata = rule().client_metadata();

        let expected = vec![
            ("data-val", "true"),
            ("data-val-uploadedimage", "This file is invalid"),
            ("data-val-uploadedimage-maxlength", "500"),
            ("data-val-uploadedimage-maxlengthmessage", "The file cannot exceed 500 kB"),
            ("data-val-uploadedimage-extensions", "jpg,png"),
            ("data-val-uploadedimage-extensionsmessage", "The file must be one of jpg,png"),
        ];

        assert_eq!(metadata.len(), expected.len());
        for (name, value) in expected {
            assert_eq!(metadata.get(name).map(String::as_str), Some(value), "Attribute {}", name);
        }
    }

    #[test]
    fn test_describe_into_context_is_idempotent() {
        let rule = rule();
        let mut context = ClientValidationContext::new("image");

        rule.describe_for_client(Some(&mut context)).unwrap();
        let first = context.attributes().clone();
        rule.describe_for_client(Some(&mut context)).unwrap();

        assert_eq!(context.attributes(), &first);
        assert_eq!(first, rule.client_metadata());
    }

    #[test]
    fn test_describe_without_context() {
        let result = rule().describe_for_client(None::<&mut ClientMetadata>);
        assert_eq!(result, Err(RuleError::MissingContext));
    }
}
