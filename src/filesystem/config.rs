use std::path::PathBuf;

/// Configuration for file system access
///
/// The storage root is fixed for the process lifetime; every component gets
/// it via a shared `Arc<StorageConfig>` rather than a global.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Absolute directory all operations are confined to
    pub root: PathBuf,
}

impl StorageConfig {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the storage root on disk if it does not exist yet.
    pub fn ensure_root(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base = dirs_next::home_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            root: base.join("filedock-storage"),
        }
    }
}
