//! Tag write errors
//!
//! Every failure of the underlying tag library is translated into one of these
//! variants at the writer boundary; nothing from the library escapes as a panic.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to persist a title into a file's tag container
#[derive(Debug, Error)]
pub enum TagWriteError {
    /// The tag container could not be opened or parsed
    #[error("Cannot open tags of '{}': {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    /// The title value is not representable in the container
    #[error("Cannot set title of '{}': {reason}", path.display())]
    SetTitle { path: PathBuf, reason: String },

    /// Writing the container back to disk failed
    #[error("Failed to save tags to '{}': {reason}", path.display())]
    Save { path: PathBuf, reason: String },
}

impl TagWriteError {
    /// File the failure refers to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::SetTitle { path, .. } | Self::Save { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_file() {
        let error = TagWriteError::Save {
            path: PathBuf::from("/music/a.mp3"),
            reason: "Permission denied".into(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to save tags to '/music/a.mp3': Permission denied"
        );
        assert_eq!(error.path(), Path::new("/music/a.mp3"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TagWriteError>();
    }
}
