//! Type definitions for the validation system

mod file_input;
mod form_value;

// Re-export commonly used types and functions
pub use file_input::{FormFile, UploadedFile};
pub use form_value::{BoundForm, FormValue};
