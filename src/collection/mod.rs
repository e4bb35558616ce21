//! Deduplicated, insertion-ordered set of candidate files
//!
//! The collection is the single owner of every [`FileEntry`]. Entries are keyed by
//! canonical path: adding the same file twice (even through a different relative
//! path or a symlink) is reported as a duplicate and leaves the set unchanged.
//!
//! Per-path add failures are never errors. [`FileCollection::add`] returns an
//! [`AddOutcome`] and [`FileCollection::add_many`] aggregates outcomes into an
//! [`AddManyReport`]; callers decide how to report them.

mod entry;
mod error;
mod observer;

pub use entry::FileEntry;
pub use error::CollectionError;
pub use observer::{CollectionChange, CollectionObserver};

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Result of a single [`FileCollection::add`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The file was inserted under this canonical path
    Added(PathBuf),
    /// An entry with this canonical path is already present
    Duplicate(PathBuf),
    /// The path does not reference an existing file
    Missing,
}

impl AddOutcome {
    /// Whether insertion happened
    #[must_use]
    pub const fn added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// Aggregated outcome of [`FileCollection::add_many`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddManyReport {
    /// Canonical paths of the inserted entries, in input order
    pub added_paths: Vec<PathBuf>,
    /// Input paths that were missing or duplicates, in input order
    pub failed_paths: Vec<PathBuf>,
}

impl AddManyReport {
    /// True when at least one path was attempted and none were added
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.added_paths.is_empty() && !self.failed_paths.is_empty()
    }

    /// The aggregated per-item failure, if any path failed
    #[must_use]
    pub fn failure(&self) -> Option<CollectionError> {
        if self.failed_paths.is_empty() {
            None
        } else {
            Some(CollectionError::DuplicateOrMissingPath(self.failed_paths.clone()))
        }
    }
}

/// Ordered set of [`FileEntry`] values with strict canonical-path uniqueness
#[derive(Default)]
pub struct FileCollection {
    entries: Vec<FileEntry>,
    index: HashSet<PathBuf>,
    observers: Vec<Box<dyn CollectionObserver>>,
}

impl fmt::Debug for FileCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileCollection")
            .field("entries", &self.entries)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl FileCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer notified after every mutation
    pub fn subscribe(&mut self, observer: impl CollectionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, change: &CollectionChange) {
        for observer in &mut self.observers {
            observer.collection_changed(change);
        }
    }

    /// Add a file. Missing files and duplicates are reported, never raised.
    pub fn add(&mut self, path: impl AsRef<Path>) -> AddOutcome {
        let path = path.as_ref();
        let Some(entry) = FileEntry::from_path(path) else {
            debug!(path = %path.display(), "not an existing file");
            return AddOutcome::Missing;
        };

        let key = entry.full_path().to_path_buf();
        if !self.index.insert(key.clone()) {
            debug!(path = %key.display(), "already in collection");
            return AddOutcome::Duplicate(key);
        }

        self.entries.push(entry);
        self.notify(&CollectionChange::Added(key.clone()));
        AddOutcome::Added(key)
    }

    /// Add every path independently, collecting failures instead of stopping
    pub fn add_many<I, P>(&mut self, paths: I) -> AddManyReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = AddManyReport::default();
        for path in paths {
            let path = path.as_ref();
            match self.add(path) {
                AddOutcome::Added(canonical) => report.added_paths.push(canonical),
                AddOutcome::Duplicate(_) | AddOutcome::Missing => {
                    report.failed_paths.push(path.to_path_buf());
                }
            }
        }
        if !report.failed_paths.is_empty() {
            warn!(
                failed = report.failed_paths.len(),
                added = report.added_paths.len(),
                "some paths could not be added"
            );
        }
        report
    }

    /// Resolve a lookup key: canonical when the file still exists, literal otherwise
    fn key_for(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
    }

    fn position(&self, path: &Path) -> Option<usize> {
        let key = Self::key_for(path);
        if !self.index.contains(&key) {
            return None;
        }
        self.entries.iter().position(|e| e.full_path() == key)
    }

    /// Remove an entry. Absent paths are a no-op.
    pub fn remove(&mut self, path: impl AsRef<Path>) {
        let Some(pos) = self.position(path.as_ref()) else {
            return;
        };
        let entry = self.entries.remove(pos);
        self.index.remove(entry.full_path());
        self.notify(&CollectionChange::Removed(entry.full_path().to_path_buf()));
    }

    /// Re-read file-system attributes of every entry in place.
    ///
    /// Entries whose files disappeared stay in the collection with `exists() == false`.
    pub fn refresh(&mut self) {
        for entry in &mut self.entries {
            entry.refresh();
        }
        self.notify(&CollectionChange::Refreshed);
    }

    /// Set the checked flag of one entry. Returns false if the path is not present.
    pub fn set_checked(&mut self, path: impl AsRef<Path>, checked: bool) -> bool {
        let Some(pos) = self.position(path.as_ref()) else {
            return false;
        };
        let entry = &mut self.entries[pos];
        if entry.checked() != checked {
            entry.set_checked(checked);
            let key = entry.full_path().to_path_buf();
            self.notify(&CollectionChange::CheckedChanged(key));
        }
        true
    }

    pub fn select_all(&mut self) {
        self.update_selection(|_| true);
    }

    pub fn deselect_all(&mut self) {
        self.update_selection(|_| false);
    }

    pub fn invert_selection(&mut self) {
        self.update_selection(|checked| !checked);
    }

    fn update_selection(&mut self, f: impl Fn(bool) -> bool) {
        for entry in &mut self.entries {
            entry.set_checked(f(entry.checked()));
        }
        self.notify(&CollectionChange::SelectionChanged);
    }

    /// Checked entries, in insertion order
    #[must_use]
    pub fn selected(&self) -> Vec<&FileEntry> {
        self.entries.iter().filter(|e| e.checked()).collect()
    }

    #[must_use]
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&FileEntry> {
        self.position(path.as_ref()).map(|pos| &self.entries[pos])
    }

    #[must_use]
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.position(path.as_ref()).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    /// Entries ordered by file name for display; the collection order is untouched
    #[must_use]
    pub fn sorted_by_name(&self) -> Vec<&FileEntry> {
        let mut sorted: Vec<&FileEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            a.name()
                .to_lowercase()
                .cmp(&b.name().to_lowercase())
                .then_with(|| a.full_path().cmp(b.full_path()))
        });
        sorted
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Expand command-line arguments into candidate paths.
///
/// An argument naming an existing path is taken literally, even when it contains
/// glob metacharacters (`Song [Live].mp3`). Other arguments with metacharacters are
/// expanded with the `glob` crate. A pattern that is invalid or matches nothing is
/// kept as a literal path so it surfaces as missing when added.
/// Any argument naming the running executable is skipped.
#[must_use]
pub fn paths_from_args<S: AsRef<str>>(args: &[S], own_exe: Option<&Path>) -> Vec<PathBuf> {
    let own_exe = own_exe.and_then(|p| p.canonicalize().ok());
    let is_own_exe = |p: &Path| {
        own_exe
            .as_deref()
            .is_some_and(|exe| p.canonicalize().is_ok_and(|c| c == exe))
    };

    let mut paths = Vec::new();
    for arg in args {
        let arg = arg.as_ref();
        let literal = PathBuf::from(arg);
        if literal.exists() || !arg.contains(['*', '?', '[']) {
            if !is_own_exe(literal.as_path()) {
                paths.push(literal);
            }
            continue;
        }

        match glob::glob(arg) {
            Ok(matches) => {
                let before = paths.len();
                paths.extend(matches.filter_map(Result::ok).filter(|p| !is_own_exe(p.as_path())));
                if paths.len() == before {
                    debug!(pattern = arg, "glob matched nothing");
                    paths.push(literal);
                }
            }
            Err(e) => {
                warn!(pattern = arg, error = %e, "invalid glob pattern");
                paths.push(literal);
            }
        }
    }
    paths
}
