//! Temporary storage for uploaded files.
//!
//! A multipart file field is streamed to the uploads directory under a
//! unique name. The resulting [`StoredUpload`] deletes the file when it is
//! discarded or dropped, whichever comes first.

use axum::extract::multipart::{Field, MultipartError};
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

use crate::config::UploadConfig;
use crate::extraction::{UploadedFile, extension_of};

/// Errors while receiving an upload.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The file is larger than the configured limit.
    #[error("File exceeds the maximum upload size of {limit} bytes")]
    TooLarge { limit: usize },

    /// The multipart stream was malformed or cut off.
    #[error("Failed to read multipart field: {0}")]
    Multipart(#[from] MultipartError),

    /// Writing to temporary storage failed.
    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// An upload written to disk, owned by the request that received it.
///
/// The file is removed when this value is dropped, so a request that is
/// cancelled or times out still cleans up after itself. [`discard`] is the
/// normal path and reports failures.
///
/// [`discard`]: StoredUpload::discard
#[derive(Debug)]
pub struct StoredUpload {
    file: UploadedFile,
    path: TempPath,
}

impl StoredUpload {
    /// Take ownership of an already written file.
    pub fn new(file: UploadedFile) -> Self {
        let path = TempPath::from_path(&file.stored_path);
        Self { file, path }
    }

    /// Metadata and location of the stored file.
    pub fn file(&self) -> &UploadedFile {
        &self.file
    }

    /// Delete the stored file. Failures are logged, not returned.
    pub async fn discard(self) {
        let Self { file, path } = self;
        let stored_path = file.stored_path;

        let outcome = tokio::task::spawn_blocking(move || path.close()).await;
        match outcome {
            Ok(Ok(())) => {
                tracing::debug!(path = %stored_path.display(), "Uploaded file removed");
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    name: "upload.cleanup_failed",
                    path = %stored_path.display(),
                    error = %e,
                    "Error deleting uploaded file"
                );
            }
            Err(e) => {
                tracing::warn!(
                    name: "upload.cleanup_failed",
                    path = %stored_path.display(),
                    error = %e,
                    "Upload cleanup task failed"
                );
            }
        }
    }
}

/// Stream a multipart file field into the uploads directory.
///
/// A partial file is removed on any early exit, including cancellation.
pub async fn store_field(
    mut field: Field<'_>,
    config: &UploadConfig,
) -> Result<StoredUpload, UploadError> {
    let original_name = field.file_name().unwrap_or("upload").to_string();
    let stored_path = unique_path(Path::new(&config.dir), &original_name);

    tokio::fs::create_dir_all(&config.dir).await?;

    // Declared before the handle so the handle closes first on early return.
    let guard = TempPath::from_path(&stored_path);
    let mut out = tokio::fs::File::create(&stored_path).await?;

    let size_bytes = copy_limited(&mut field, &mut out, config.max_file_size).await?;
    drop(out);

    tracing::debug!(
        filename = %original_name,
        path = %stored_path.display(),
        size_bytes,
        "Upload stored"
    );

    Ok(StoredUpload {
        file: UploadedFile::new(original_name, stored_path, size_bytes),
        path: guard,
    })
}

async fn copy_limited(
    field: &mut Field<'_>,
    out: &mut tokio::fs::File,
    limit: usize,
) -> Result<u64, UploadError> {
    let mut written: usize = 0;
    while let Some(chunk) = field.chunk().await? {
        written += chunk.len();
        if written > limit {
            return Err(UploadError::TooLarge { limit });
        }
        out.write_all(&chunk).await?;
    }
    out.flush().await?;
    Ok(written as u64)
}

/// `<dir>/file-<uuid><ext>`, keeping the original extension.
fn unique_path(dir: &Path, original_name: &str) -> PathBuf {
    dir.join(format!(
        "file-{}{}",
        uuid::Uuid::new_v4(),
        extension_of(original_name)
    ))
}
