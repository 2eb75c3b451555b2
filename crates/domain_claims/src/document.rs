//! Supporting document rules
//!
//! Only the descriptor of an upload (its file name and byte length) reaches
//! the domain. The contents are never inspected here.

use serde::{Deserialize, Serialize};

use core_kernel::CoreError;

/// Default maximum upload size: 5 MiB
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Extensions accepted when no policy is configured
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 3] = [".pdf", ".docx", ".xlsx"];

/// Descriptor of an uploaded supporting document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub file_name: String,
    pub size_bytes: u64,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
        }
    }

    /// Lower-cased extension including the leading dot, if the name has one
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name.trim();
        let dot = name.rfind('.')?;
        let ext = &name[dot..];
        // "report." or ".pdf/" style names carry no usable extension
        if ext.len() < 2 || ext.contains(|c: char| c == '/' || c == '\\') {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// Accepted document extensions and size limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPolicy {
    allowed_extensions: Vec<String>,
    max_size_bytes: u64,
}

impl DocumentPolicy {
    /// Creates a policy, normalising extensions to lower case with a leading dot
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` if no extension is allowed or the
    /// size limit is zero.
    pub fn new<I, S>(allowed_extensions: I, max_size_bytes: u64) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalised: Vec<String> = Vec::new();
        for ext in allowed_extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase();
            if ext.is_empty() {
                continue;
            }
            let ext = format!(".{}", ext);
            if !normalised.contains(&ext) {
                normalised.push(ext);
            }
        }

        if normalised.is_empty() {
            return Err(CoreError::configuration(
                "document policy must allow at least one extension",
            ));
        }
        if max_size_bytes == 0 {
            return Err(CoreError::configuration(
                "document policy maximum size must be greater than zero",
            ));
        }

        Ok(Self {
            allowed_extensions: normalised,
            max_size_bytes,
        })
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    /// Checks whether the file name ends in an accepted extension
    pub fn accepts_extension(&self, document: &DocumentUpload) -> bool {
        document
            .extension()
            .map(|ext| self.allowed_extensions.iter().any(|allowed| *allowed == ext))
            .unwrap_or(false)
    }

    /// Checks whether the document fits within the size limit
    pub fn accepts_size(&self, document: &DocumentUpload) -> bool {
        document.size_bytes <= self.max_size_bytes
    }
}

impl Default for DocumentPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_size_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}
