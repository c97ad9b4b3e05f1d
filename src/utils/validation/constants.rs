//! Constants used throughout the validation system

/// Extensions accepted by the uploaded image rule, lower-case and dot-prefixed
pub const IMAGE_EXTENSIONS: [&str; 2] = [".jpg", ".png"];

/// Number of bytes in one kilobyte of the size limit
pub const BYTES_PER_KB: u64 = 1024;

/// Prefix shared by every client attribute the upload rule emits
pub const CLIENT_RULE_PREFIX: &str = "data-val-uploadedimage";
