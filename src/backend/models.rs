//! State shared by the request handlers.

use std::path::PathBuf;

use crate::utils::validation::FormSchema;

/// Read-only state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub schema: FormSchema, // Rules applied to submitted forms
    pub uploads_dir: PathBuf, // Where accepted files are written
}
