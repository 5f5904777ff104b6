//! Upload validation and staging
//!
//! A staged upload lives in a named temporary file inside the upload
//! directory. The file is removed when the [`StagedUpload`] is dropped, so
//! every exit path of a handler cleans up.

use crate::config::UploadConfig;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

/// Media type assumed when neither the part nor the form names one
pub const DEFAULT_MEDIA_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Unsupported file type")]
    UnsupportedType(String),

    #[error("File too large")]
    TooLarge { size: usize, limit: usize },

    #[error("Malformed upload: {0}")]
    Malformed(String),

    #[error("Failed to stage upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Size and type rules for uploads
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    dir: PathBuf,
    max_file_size: usize,
    allowed_types: Vec<String>,
}

impl UploadPolicy {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            max_file_size: config.max_file_size,
            allowed_types: config.allowed_types.clone(),
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Check `media_type` against the allow-list, ignoring parameters such
    /// as `; charset=utf-8`
    pub fn check_type(&self, media_type: &str) -> Result<(), UploadError> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if self.allowed_types.iter().any(|t| t.eq_ignore_ascii_case(&essence)) {
            Ok(())
        } else {
            Err(UploadError::UnsupportedType(media_type.to_string()))
        }
    }

    pub fn check_size(&self, size: usize) -> Result<(), UploadError> {
        if size > self.max_file_size {
            Err(UploadError::TooLarge {
                size,
                limit: self.max_file_size,
            })
        } else {
            Ok(())
        }
    }

    /// Validate and write `data` to a fresh file in the upload directory
    pub fn stage(&self, data: &[u8], media_type: &str) -> Result<StagedUpload, UploadError> {
        self.check_type(media_type)?;
        self.check_size(data.len())?;

        std::fs::create_dir_all(&self.dir)?;
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .tempfile_in(&self.dir)?;
        file.write_all(data)?;
        file.flush()?;

        debug!(path = %file.path().display(), size = data.len(), "Upload staged");

        Ok(StagedUpload {
            file,
            media_type: media_type.to_string(),
            size: data.len(),
        })
    }
}

/// An upload written to disk, deleted on drop
#[derive(Debug)]
pub struct StagedUpload {
    file: NamedTempFile,
    media_type: String,
    size: usize,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Read the staged content back
    pub async fn read(&self) -> Result<Vec<u8>, UploadError> {
        Ok(tokio::fs::read(self.file.path()).await?)
    }

    /// Delete the staged file now
    pub fn discard(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            warn!(path = %path.display(), error = %e, "Failed to delete staged upload");
        }
    }
}
