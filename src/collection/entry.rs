//! A single candidate file and its refreshed file-system attributes

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

/// One file in the collection, keyed by its canonical path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    full_path: PathBuf,
    name: String,
    directory: PathBuf,
    checked: bool,
    exists: bool,
    size: Option<u64>,
    modified: Option<DateTime<Local>>,
}

impl FileEntry {
    /// Build an entry for an existing regular file.
    ///
    /// Returns `None` if the path cannot be canonicalized or is not a file.
    /// New entries start checked.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let full_path = path.as_ref().canonicalize().ok()?;
        if !full_path.is_file() {
            return None;
        }
        let mut entry = Self {
            name: String::new(),
            directory: PathBuf::new(),
            full_path,
            checked: true,
            exists: true,
            size: None,
            modified: None,
        };
        entry.refresh();
        Some(entry)
    }

    /// Re-read name, directory and file metadata. Identity never changes.
    pub fn refresh(&mut self) {
        self.name = self
            .full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.directory = self
            .full_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        match fs::metadata(&self.full_path) {
            Ok(meta) => {
                self.exists = meta.is_file();
                self.size = Some(meta.len());
                self.modified = meta.modified().ok().map(DateTime::<Local>::from);
            }
            Err(_) => {
                self.exists = false;
                self.size = None;
                self.modified = None;
            }
        }
    }

    /// Canonical absolute path (the identity key)
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// File name including extension
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name without its final extension
    #[must_use]
    pub fn stem(&self) -> &str {
        match self.name.rfind('.') {
            Some(0) | None => &self.name,
            Some(idx) => &self.name[..idx],
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Whether the entry takes part in the next batch apply
    #[must_use]
    pub const fn checked(&self) -> bool {
        self.checked
    }

    pub(super) const fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Existence as of the last refresh
    #[must_use]
    pub const fn exists(&self) -> bool {
        self.exists
    }

    #[must_use]
    pub const fn size(&self) -> Option<u64> {
        self.size
    }

    #[must_use]
    pub fn modified(&self) -> Option<DateTime<Local>> {
        self.modified
    }
}
