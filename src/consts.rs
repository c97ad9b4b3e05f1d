//! Global constants for the application.

pub const HTTP_PORT: u16 = 8080; // Default port for the HTTP server.
pub const SCHEMA_PATH: &str = "./config/schema.yaml"; // Default location of the form schema.
pub const UPLOADS_DIR: &str = "./data/uploads"; // Directory for accepted uploads.

/// Field used by the built-in schema when no schema file is present
pub const DEFAULT_UPLOAD_FIELD: &str = "image";
/// Size limit of the built-in schema, in kilobytes
pub const DEFAULT_MAX_LENGTH_KB: i64 = 500;

/// Upper bound on a whole multipart request, kept above any configured file
/// limit so oversized files reach the rule instead of failing in transport.
pub const MAX_REQUEST_BYTES: usize = 32 * 1024 * 1024;
