//! Error types for collection operations

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building the file collection
#[derive(Debug, Error)]
pub enum CollectionError {
    /// Paths that were not added because they are missing or already listed
    #[error("Failed to add files (are they already in the list?):\n{}", format_paths(.0))]
    DuplicateOrMissingPath(Vec<PathBuf>),
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("  {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_or_missing_lists_every_path() {
        let error = CollectionError::DuplicateOrMissingPath(vec![
            PathBuf::from("/music/a.mp3"),
            PathBuf::from("/music/b.mp3"),
        ]);
        let msg = error.to_string();
        assert!(msg.starts_with("Failed to add files"));
        assert!(msg.contains("  /music/a.mp3\n  /music/b.mp3"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CollectionError>();
    }
}
