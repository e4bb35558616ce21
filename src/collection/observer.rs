//! Change notifications for whatever presents the collection

use std::path::PathBuf;

/// A mutation that just happened to the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChange {
    Added(PathBuf),
    Removed(PathBuf),
    CheckedChanged(PathBuf),
    /// Bulk select / deselect / invert
    SelectionChanged,
    /// File-system attributes of every entry were re-read
    Refreshed,
}

/// Receives [`CollectionChange`] notifications
pub trait CollectionObserver {
    fn collection_changed(&mut self, change: &CollectionChange);
}

impl<F> CollectionObserver for F
where
    F: FnMut(&CollectionChange),
{
    fn collection_changed(&mut self, change: &CollectionChange) {
        self(change);
    }
}
