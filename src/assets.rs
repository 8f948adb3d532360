//! # Asset Probe Module
//!
//! Image existence is checked at render time through the `AssetProbe` trait so
//! the router never touches the filesystem directly. A missing path is a plain
//! `false`, never an error.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Answers existence questions about image paths
pub trait AssetProbe: Send + Sync {
    /// `true` if `path` is an existing regular file
    fn is_file(&self, path: &Path) -> bool;

    /// `true` if `path` is an existing directory
    fn is_dir(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl AssetProbe for FsProbe {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Probe backed by an in-memory set of paths
///
/// Registering a file also registers every ancestor directory, so a probe
/// built from `/img/Чтак/1.jpg` reports `/img/Чтак` as a directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProbe {
    files: HashSet<PathBuf>,
    dirs: HashSet<PathBuf>,
}

impl InMemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing file
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
        self.files.insert(path);
        self
    }

    /// Register an existing, possibly empty, directory
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }
}

impl AssetProbe for InMemoryProbe {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }
}
