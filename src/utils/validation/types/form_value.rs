//! Values produced by binding a submitted form, keyed by field name.

use std::collections::BTreeMap;

use super::UploadedFile;

/// A submitted form, field name to bound value. Fields the client did not send
/// are simply absent.
pub type BoundForm = BTreeMap<String, FormValue>;

/// A single bound form value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(UploadedFile),
}

impl FormValue {
    /// Returns the uploaded file if this value is one
    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            FormValue::File(file) => Some(file),
            FormValue::Text(_) => None,
        }
    }

    /// Returns the text if this value is a plain field
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(text) => Some(text),
            FormValue::File(_) => None,
        }
    }
}

impl From<UploadedFile> for FormValue {
    fn from(file: UploadedFile) -> Self {
        FormValue::File(file)
    }
}

impl From<String> for FormValue {
    fn from(text: String) -> Self {
        FormValue::Text(text)
    }
}
