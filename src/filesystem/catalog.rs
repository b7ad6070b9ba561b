use std::sync::Arc;
use std::time::UNIX_EPOCH;

use tokio::fs;

use crate::protocol::{EntryMetadata, FsError};

use super::security::PathResolver;

/// Stat-based listing of a single directory's immediate children.
#[derive(Clone)]
pub struct FileCatalog {
    resolver: Arc<PathResolver>,
}

impl FileCatalog {
    pub fn new(resolver: Arc<PathResolver>) -> Self {
        Self { resolver }
    }

    /// List immediate children of a directory under the root.
    ///
    /// Entries come back in raw enumeration order; an empty directory is a
    /// successful empty listing. Children whose stat fails are skipped.
    pub async fn list_directory(
        &self,
        directory: Option<&str>,
    ) -> Result<Vec<EntryMetadata>, FsError> {
        let path = self.resolver.resolve(directory)?;

        if !path.exists() {
            return Err(FsError::NotFound {
                path: self.resolver.to_relative(&path),
            });
        }
        if !path.is_dir() {
            return Err(FsError::NotADirectory {
                path: self.resolver.to_relative(&path),
            });
        }

        let mut entries = Vec::new();
        let mut read_dir = fs::read_dir(&path).await.map_err(FsError::io)?;

        while let Some(entry) = read_dir.next_entry().await.map_err(FsError::io)? {
            let entry_path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            match fs::metadata(&entry_path).await {
                Ok(metadata) => entries.push(build_entry(
                    &name,
                    self.resolver.to_relative(&entry_path),
                    &metadata,
                )),
                Err(_) => continue,
            }
        }

        Ok(entries)
    }
}

/// Map stat results onto the wire metadata shape.
pub(crate) fn build_entry(
    name: &str,
    relative_path: String,
    metadata: &std::fs::Metadata,
) -> EntryMetadata {
    let is_directory = metadata.is_dir();
    EntryMetadata {
        name: name.to_string(),
        path: relative_path,
        size: if is_directory { 0 } else { metadata.len() },
        is_directory,
        created: metadata.created().ok().map(unix_millis),
        modified: metadata.modified().map(unix_millis).unwrap_or(0),
    }
}

fn unix_millis(t: std::time::SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
