//! Root module for the validation system.
//! Exposes the upload rule, the client metadata it emits and the per-field
//! registry that applies rules to a bound form.

mod client;
mod constants;
mod error;
mod schema;
mod types;
mod uploaded_image;

// Re-export commonly used types and functions
pub use client::{AttributeSink, ClientMetadata, ClientValidationContext};
pub use constants::*;
pub use error::{FailureKind, FormErrors, RuleError, ValidationFailure};
pub use schema::{FieldRule, FormSchema};
pub use types::{BoundForm, FormFile, FormValue, UploadedFile};
pub use uploaded_image::UploadedImageRule;
