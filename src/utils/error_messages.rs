//! User-facing messages shared by the rule and the web handlers

pub const VALIDATION_ERROR: &str = "Validation failed";

pub const UPLOAD_FAILED: &str = "Upload failed";

pub const INVALID_FILE: &str = "This file is invalid";

/// Message shown when a file is over the size limit
pub fn max_length_message(max_length_kb: i64) -> String {
    format!("The file cannot exceed {} kB", max_length_kb)
}

/// Message shown when a file has a disallowed extension
pub fn extensions_message(allowed: &str) -> String {
    format!("The file must be one of {}", allowed)
}
