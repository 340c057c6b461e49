//! Recursive discovery of dataset files.
//!
//! Both the catalog listing and the batch trajectory extraction walk the
//! catalog directory through this scanner.

use crate::error::Result;
use std::path::PathBuf;
use tracing::debug;
use walkdir::WalkDir;

/// File scanner for discovering regular files under a root directory.
pub struct FileScanner {
    root: PathBuf,
}

impl FileScanner {
    /// Create a new file scanner.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Collect every regular file below the root, in file-name order.
    ///
    /// Symlinks are not followed and are not reported. The first I/O error
    /// aborts the walk.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        debug!("Found {} files under {}", files.len(), self.root.display());
        Ok(files)
    }
}
