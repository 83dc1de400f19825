//! Directory walking.
//!
//! Lazily enumerates every non-directory entry under a root and classifies it
//! by extension. Order follows the filesystem and is not stable across
//! platforms.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::sync::types::SourceFile;

/// One non-directory entry seen during the walk.
#[derive(Debug)]
pub enum WalkEntry {
    /// Name ends with the configured extension.
    Candidate(SourceFile),
    /// Any other file. Never read.
    Skipped(PathBuf),
    /// Entry could not be inspected.
    Error {
        path: Option<PathBuf>,
        message: String,
    },
}

/// Lazy, recursive file walker filtered by a case-sensitive name suffix.
pub struct Walker {
    root: PathBuf,
    extension: String,
    inner: walkdir::IntoIter,
}

impl Walker {
    /// Walk `root` looking for names ending in `extension`.
    ///
    /// Symlinked directories are passed over like any other directory and
    /// are not descended into.
    #[must_use]
    pub fn new(root: &Path, extension: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            extension: extension.to_string(),
            inner: WalkDir::new(root).min_depth(1).follow_links(false).into_iter(),
        }
    }

    fn classify(&self, entry: &walkdir::DirEntry) -> WalkEntry {
        let path = entry.path();
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&self.extension));

        if !matches {
            return WalkEntry::Skipped(path.to_path_buf());
        }

        match relative_key(&self.root, path) {
            Some(relative_path) => WalkEntry::Candidate(SourceFile {
                path: path.to_path_buf(),
                relative_path,
            }),
            None => WalkEntry::Error {
                path: Some(path.to_path_buf()),
                message: "path is not valid UTF-8".to_string(),
            },
        }
    }
}

impl Iterator for Walker {
    type Item = WalkEntry;

    fn next(&mut self) -> Option<WalkEntry> {
        loop {
            match self.inner.next()? {
                Ok(entry) if entry.file_type().is_dir() => {}
                Ok(entry) if entry.path_is_symlink() && entry.path().is_dir() => {}
                Ok(entry) => return Some(self.classify(&entry)),
                Err(e) => {
                    return Some(WalkEntry::Error {
                        path: e.path().map(Path::to_path_buf),
                        message: e.to_string(),
                    });
                }
            }
        }
    }
}

/// Remote key for `path`: relative to `root`, `/`-separated.
///
/// Returns `None` when `path` is outside `root` or not valid UTF-8.
#[must_use]
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
