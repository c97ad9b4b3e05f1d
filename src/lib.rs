//! Validation of uploaded image files for form submissions.
//! Exposes the server-side rule, the client metadata it emits, the per-field
//! rule registry, and the web surface that serves and checks the upload form.

pub mod backend;
pub mod config;
pub mod consts;
pub mod utils;

pub use utils::validation::{
    AttributeSink, BoundForm, ClientMetadata, ClientValidationContext, FailureKind, FieldRule,
    FormErrors, FormFile, FormSchema, FormValue, RuleError, UploadedFile, UploadedImageRule,
    ValidationFailure,
};
