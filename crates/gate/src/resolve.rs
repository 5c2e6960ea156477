//! Resource resolution under the serving root
//!
//! Maps a request path to a regular file on disk, refusing anything that
//! escapes the root. The gate treats every resolution failure the same way
//! (not found), so a traversal probe is indistinguishable from a missing
//! file to the client.

use redeemd_core::ResourcePath;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// A resolved, servable file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub file: PathBuf,
    pub len: u64,
}

/// Maps resource paths to filesystem entries. `None` covers missing files,
/// non-files, and traversal escapes alike.
pub trait ResourceResolver: Send + Sync {
    fn resolve(&self, path: &ResourcePath) -> Option<ResolvedFile>;
}

/// Resolver rooted at one directory on the local filesystem
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    /// Create a resolver for `root`. The root is canonicalized once so the
    /// containment check below compares like with like.
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = fs::canonicalize(root.into())?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl ResourceResolver for FsResolver {
    fn resolve(&self, path: &ResourcePath) -> Option<ResolvedFile> {
        let joined = self.root.join(path.relative());

        // Canonicalizing resolves `..` and symlinks before the containment
        // check; a missing file fails here and falls out as not found.
        let real = match fs::canonicalize(&joined) {
            Ok(p) => p,
            Err(e) => {
                debug!(path = %path, error = %e, "resolution failed");
                return None;
            }
        };

        if !real.starts_with(&self.root) {
            warn!(path = %path, resolved = %real.display(), "path escapes serving root");
            return None;
        }

        let meta = fs::metadata(&real).ok()?;
        if !meta.is_file() {
            return None;
        }

        Some(ResolvedFile {
            file: real,
            len: meta.len(),
        })
    }
}
