//! Uploaded files as seen by the validation rules.
//!
//! Rules only need a name and a byte length, so they work against the `FormFile`
//! capability rather than a concrete type. `UploadedFile` is the value the web
//! handlers bind from a multipart part.

/// Anything that looks like an uploaded file
pub trait FormFile {
    /// The file name as sent by the client, possibly with directory components
    fn file_name(&self) -> &str;

    /// Size of the file content in bytes
    fn length(&self) -> u64;

    /// Lower-cased extension including its leading dot, or an empty string when
    /// the name has none
    fn extension(&self) -> String {
        extension_of(self.file_name())
    }
}

/// A file bound from a form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    // The original filename sent by the client
    file_name: String,
    // The declared MIME type, if the client sent one
    content_type: Option<String>,
    // The actual bytes of the file content
    content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            content,
        }
    }

    /// Attaches the content type declared by the client
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the file content as a byte slice
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the filename without any path components, safe to join onto a
    /// storage directory
    pub fn stored_file_name(&self) -> String {
        match base_name(self.file_name.trim()) {
            "" | "." | ".." => "upload".to_string(),
            name => name.to_string(),
        }
    }
}

impl FormFile for UploadedFile {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn length(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Strips client directory components. Browsers on Windows may send either separator.
fn base_name(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path)
}

fn extension_of(file_name: &str) -> String {
    let name = base_name(file_name);
    match name.rfind('.') {
        Some(index) if index + 1 < name.len() => name[index..].to_lowercase(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_extraction() {
        let cases = vec![
            ("cat.png", ".png"),
            ("PHOTO.JPG", ".jpg"),
            ("archive.tar.gz", ".gz"),
            ("holiday.Jpg", ".jpg"),
            (".png", ".png"),
            ("no_extension", ""),
            ("trailing.", ""),
            ("", ""),
            ("dir.d/file", ""),
            ("C:\\Users\\me\\cat.PNG", ".png"),
            ("../uploads/cat.jpg", ".jpg"),
        ];

        for (file_name, expected) in cases {
            let file = UploadedFile::new(file_name, vec![]);
            assert_eq!(file.extension(), expected, "Unexpected extension for: {}", file_name);
        }
    }

    #[test]
    fn test_length_matches_content() {
        let file = UploadedFile::new("cat.png", vec![0; 1234]);
        assert_eq!(file.length(), 1234);
        assert_eq!(file.content().len(), 1234);
    }

    #[test]
    fn test_stored_file_name_sanitization() {
        let cases = vec![
            ("cat.png", "cat.png"),
            ("../../etc/passwd", "passwd"),
            ("C:\\fakepath\\cat.jpg", "cat.jpg"),
            ("  spaced.png  ", "spaced.png"),
            ("", "upload"),
            ("..", "upload"),
            ("dir/", "upload"),
        ];

        for (file_name, expected) in cases {
            let file = UploadedFile::new(file_name, vec![]);
            assert_eq!(file.stored_file_name(), expected, "Failed for filename: {}", file_name);
        }
    }

    #[test]
    fn test_content_type() {
        let file = UploadedFile::new("cat.png", vec![]);
        assert_eq!(file.content_type(), None);

        let file = file.with_content_type("image/png");
        assert_eq!(file.content_type(), Some("image/png"));
    }
}
