use std::sync::Arc;

use walkdir::WalkDir;

use crate::protocol::{EntryMetadata, FsError};

use super::catalog;
use super::mime;
use super::security::PathResolver;

/// Filters for one search call. Absent filters are vacuously true.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    /// Start directory relative to the root; absent means the root itself
    pub directory: Option<String>,
    /// Case-insensitive filename substring
    pub filename: Option<String>,
    /// Case-insensitive extension match (part after the last dot)
    pub extension: Option<String>,
    /// Case-insensitive content substring, textual files only
    pub content: Option<String>,
    pub recursive: bool,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            directory: None,
            filename: None,
            extension: None,
            content: None,
            recursive: true,
        }
    }
}

/// Depth-first directory search with early-exit filtering.
#[derive(Clone)]
pub struct SearchEngine {
    resolver: Arc<PathResolver>,
}

impl SearchEngine {
    pub fn new(resolver: Arc<PathResolver>) -> Self {
        Self { resolver }
    }

    /// Walk the tree under the start directory and return matching files.
    ///
    /// Directories never appear in results. Filters run cheapest-first and
    /// short-circuit; a file whose content cannot be read is excluded
    /// without failing the search.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<EntryMetadata>, FsError> {
        let start = self.resolver.resolve(criteria.directory.as_deref())?;

        if !start.exists() {
            return Err(FsError::NotFound {
                path: self.resolver.to_relative(&start),
            });
        }
        if !start.is_dir() {
            return Err(FsError::NotADirectory {
                path: self.resolver.to_relative(&start),
            });
        }

        let name_filter = criteria.filename.as_deref().map(str::to_lowercase);
        let ext_filter = criteria
            .extension
            .as_deref()
            .map(|e| e.trim_start_matches('.').to_lowercase());
        let content_filter = criteria.content.as_deref().map(str::to_lowercase);

        let mut walker = WalkDir::new(&start).min_depth(1);
        if !criteria.recursive {
            walker = walker.max_depth(1);
        }

        let mut results = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();

            if let Some(ref needle) = name_filter {
                if !name.to_lowercase().contains(needle) {
                    continue;
                }
            }

            if let Some(ref wanted) = ext_filter {
                match name.rsplit_once('.') {
                    Some((_, ext)) if ext.to_lowercase() == *wanted => {}
                    _ => continue,
                }
            }

            if let Some(ref needle) = content_filter {
                if !mime::is_textual(&name) {
                    continue;
                }
                // Unreadable or non-UTF-8 content excludes this file only.
                match std::fs::read_to_string(entry.path()) {
                    Ok(text) if text.to_lowercase().contains(needle) => {}
                    _ => continue,
                }
            }

            match entry.metadata() {
                Ok(metadata) => results.push(catalog::build_entry(
                    &name,
                    self.resolver.to_relative(entry.path()),
                    &metadata,
                )),
                Err(_) => continue,
            }
        }

        Ok(results)
    }
}
