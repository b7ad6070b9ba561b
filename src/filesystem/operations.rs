use std::sync::Arc;

use tokio::fs;

use crate::protocol::FsError;

use super::mime;
use super::security::PathResolver;

/// Outcome of a write: did the target exist before the write?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
}

/// Outcome of create_directory; an existing path is reported, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// What kind of item a delete removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    File,
    Directory,
}

/// Read, write, create-directory and delete, all gated by the resolver.
#[derive(Clone)]
pub struct FileOperations {
    resolver: Arc<PathResolver>,
}

impl FileOperations {
    pub fn new(resolver: Arc<PathResolver>) -> Self {
        Self { resolver }
    }

    /// Read a file's full contents as text.
    ///
    /// Binary-classified files are refused rather than returned as mangled
    /// bytes. Returns the content together with the detected media type.
    pub async fn read_file(&self, path: &str) -> Result<(String, &'static str), FsError> {
        let resolved = self.resolver.resolve(Some(path))?;

        if !resolved.exists() {
            return Err(FsError::NotFound {
                path: self.resolver.to_relative(&resolved),
            });
        }
        if resolved.is_dir() {
            return Err(FsError::NotAFile {
                path: self.resolver.to_relative(&resolved),
            });
        }

        let name = resolved
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let media_type = mime::media_type_for(&name);
        if !mime::is_text_media_type(media_type) {
            return Err(FsError::BinaryFile {
                path: self.resolver.to_relative(&resolved),
                media_type: media_type.to_string(),
            });
        }

        let content = fs::read_to_string(&resolved).await.map_err(FsError::io)?;
        Ok((content, media_type))
    }

    /// Create or overwrite a file, creating missing parent directories.
    ///
    /// Created-vs-updated is decided by the target's existence before the
    /// write. Plain overwrite: no merge, no append, not atomic against
    /// concurrent writers.
    pub async fn write_file(&self, path: &str, content: &str) -> Result<WriteOutcome, FsError> {
        let resolved = self.resolver.resolve(Some(path))?;

        if resolved.is_dir() {
            return Err(FsError::NotAFile {
                path: self.resolver.to_relative(&resolved),
            });
        }

        let existed = resolved.exists();

        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent).await.map_err(FsError::io)?;
        }
        fs::write(&resolved, content).await.map_err(FsError::io)?;

        Ok(if existed {
            WriteOutcome::Updated
        } else {
            WriteOutcome::Created
        })
    }

    /// Create a directory and any missing ancestors.
    pub async fn create_directory(&self, path: &str) -> Result<CreateOutcome, FsError> {
        let resolved = self.resolver.resolve(Some(path))?;

        if resolved.exists() {
            return Ok(CreateOutcome::AlreadyExists);
        }

        fs::create_dir_all(&resolved).await.map_err(FsError::io)?;
        Ok(CreateOutcome::Created)
    }

    /// Delete a file, or a directory when permitted.
    ///
    /// A non-empty directory with `recursive` false fails loudly instead of
    /// deleting a subset. Files are removed regardless of the flag.
    pub async fn delete_item(&self, path: &str, recursive: bool) -> Result<DeleteOutcome, FsError> {
        let resolved = self.resolver.resolve(Some(path))?;

        if !resolved.exists() {
            return Err(FsError::NotFound {
                path: self.resolver.to_relative(&resolved),
            });
        }

        if resolved.is_dir() {
            if recursive {
                fs::remove_dir_all(&resolved).await.map_err(FsError::io)?;
            } else {
                let mut read_dir = fs::read_dir(&resolved).await.map_err(FsError::io)?;
                if read_dir.next_entry().await.map_err(FsError::io)?.is_some() {
                    return Err(FsError::DirectoryNotEmpty {
                        path: self.resolver.to_relative(&resolved),
                    });
                }
                fs::remove_dir(&resolved).await.map_err(FsError::io)?;
            }
            Ok(DeleteOutcome::Directory)
        } else {
            fs::remove_file(&resolved).await.map_err(FsError::io)?;
            Ok(DeleteOutcome::File)
        }
    }
}
