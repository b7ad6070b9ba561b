//! Sandboxed file system service
//!
//! Every public operation resolves its path through [`security::PathResolver`]
//! before touching the disk; nothing outside the storage root is reachable.

pub mod catalog;
pub mod config;
pub mod mime;
pub mod operations;
pub mod search;
pub mod security;


use std::sync::Arc;

use catalog::FileCatalog;
use config::StorageConfig;
use operations::FileOperations;
use search::SearchEngine;
use security::PathResolver;

pub struct FileSystemService {
    config: Arc<StorageConfig>,
    catalog: FileCatalog,
    ops: FileOperations,
    search: SearchEngine,
}

impl FileSystemService {
    pub fn new(config: StorageConfig) -> Self {
        let config = Arc::new(config);
        let resolver = Arc::new(PathResolver::new(config.clone()));
        let catalog = FileCatalog::new(resolver.clone());
        let ops = FileOperations::new(resolver.clone());
        let search = SearchEngine::new(resolver.clone());
        Self {
            config,
            catalog,
            ops,
            search,
        }
    }

    pub fn config(&self) -> &StorageConfig {
        self.config.as_ref()
    }

    pub fn catalog(&self) -> &FileCatalog {
        &self.catalog
    }

    pub fn ops(&self) -> &FileOperations {
        &self.ops
    }

    pub fn search(&self) -> &SearchEngine {
        &self.search
    }
}
