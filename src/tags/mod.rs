//! Tag container access
//!
//! [`TagWriter`] is the seam between the batch pipeline and a metadata library.
//! [`Id3TagWriter`] is the production implementation.

mod error;
mod writer;

pub use error::TagWriteError;
pub use writer::Id3TagWriter;

use std::path::Path;

use crate::collection::FileEntry;

/// Persists a title into a file's tag container
///
/// Each call opens, updates and closes the container; no handle outlives the call.
pub trait TagWriter {
    /// Set the title of `entry` to `title` and save.
    ///
    /// Writing the same title twice leaves the same on-disk state. Empty titles are
    /// accepted.
    ///
    /// # Errors
    /// Returns `TagWriteError` if the container cannot be opened, the title cannot be
    /// set, or saving fails.
    fn write(&self, entry: &FileEntry, title: &str) -> Result<(), TagWriteError>;

    /// Read the current title, `None` if the file carries no title
    ///
    /// # Errors
    /// Returns `TagWriteError::Open` if the container cannot be read.
    fn read_title(&self, path: &Path) -> Result<Option<String>, TagWriteError>;
}
