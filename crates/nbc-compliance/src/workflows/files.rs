//! References to supporting documents held by the external object store.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub url: String,
    pub size: u64,
    #[serde(rename = "type", default)]
    pub content_type: String,
    pub path: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FileRejection {
    #[error("uploaded file must have a name")]
    MissingName,
    #[error("uploaded file {0} has no storage path")]
    MissingPath(String),
    #[error("{name} is {size} bytes, above the {limit} byte upload limit")]
    TooLarge { name: String, size: u64, limit: u64 },
    #[error("a file is already stored at {0}")]
    DuplicatePath(String),
    #[error("no file stored at {0}")]
    UnknownPath(String),
}

/// Upload limits applied before a file reference is attached to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilePolicy {
    max_bytes: u64,
}

impl FilePolicy {
    pub fn new(max_bytes: u64) -> Self {
        let max_bytes = if max_bytes == 0 {
            DEFAULT_MAX_UPLOAD_BYTES
        } else {
            max_bytes
        };
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Validate a reference and fill in its content type from the file name when absent.
    pub fn accept(&self, mut file: UploadedFile) -> Result<UploadedFile, FileRejection> {
        if file.name.trim().is_empty() {
            return Err(FileRejection::MissingName);
        }
        if file.path.trim().is_empty() {
            return Err(FileRejection::MissingPath(file.name));
        }
        if file.size > self.max_bytes {
            return Err(FileRejection::TooLarge {
                name: file.name,
                size: file.size,
                limit: self.max_bytes,
            });
        }

        if file.content_type.trim().is_empty() {
            let guessed = mime_guess::from_path(&file.name)
                .first()
                .unwrap_or(mime::APPLICATION_OCTET_STREAM);
            file.content_type = guessed.essence_str().to_string();
        }

        Ok(file)
    }

    /// Validate a batch, rejecting repeated storage paths.
    pub fn accept_all(&self, files: Vec<UploadedFile>) -> Result<Vec<UploadedFile>, FileRejection> {
        let mut accepted: Vec<UploadedFile> = Vec::with_capacity(files.len());
        for file in files {
            let file = self.accept(file)?;
            if accepted.iter().any(|existing| existing.path == file.path) {
                return Err(FileRejection::DuplicatePath(file.path));
            }
            accepted.push(file);
        }
        Ok(accepted)
    }
}

impl Default for FilePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BYTES)
    }
}
