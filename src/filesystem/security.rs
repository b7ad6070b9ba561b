use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::protocol::FsError;

use super::config::StorageConfig;

/// Resolves client-supplied relative paths against the storage root and
/// rejects anything that would land outside it.
///
/// Containment is a lexical check: the requested path is joined to the root,
/// `.`/`..` segments are resolved without touching the filesystem, and the
/// result must still start with the root. Symlinks are not canonicalized, so
/// a symlinked child pointing outside the root is not detected here.
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(config: Arc<StorageConfig>) -> Self {
        Self {
            root: normalize(&config.root),
        }
    }

    /// Resolve a client path; an absent path means the root itself.
    pub fn resolve(&self, relative: Option<&str>) -> Result<PathBuf, FsError> {
        let requested = match relative {
            None => return Ok(self.root.clone()),
            Some(r) => r,
        };

        let resolved = normalize(&self.root.join(requested));

        if resolved.starts_with(&self.root) {
            Ok(resolved)
        } else {
            Err(FsError::AccessDenied {
                path: requested.to_string(),
            })
        }
    }

    /// Render a resolved path relative to the root for client display.
    pub fn to_relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Resolve `.` and `..` segments lexically, without filesystem access.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the filesystem root is a no-op; the prefix
                // check downstream still rejects the path.
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
