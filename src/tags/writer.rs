//! ID3v2 title writer backed by the `id3` crate

use std::path::Path;

use id3::{ErrorKind, Tag, TagLike, Version};
use tracing::debug;

use super::{TagWriteError, TagWriter};
use crate::collection::FileEntry;

/// Writes the title (TIT2) frame and saves as ID3v2.4
#[derive(Debug, Clone, Copy, Default)]
pub struct Id3TagWriter;

impl Id3TagWriter {
    /// Load the existing tag, or start a fresh one when the file has none.
    ///
    /// A tag that fails to parse is never rewritten: saving a partial read would drop
    /// every frame after the broken one.
    fn open(path: &Path) -> Result<Tag, TagWriteError> {
        match Tag::read_from_path(path) {
            Ok(tag) => Ok(tag),
            Err(e) if matches!(e.kind, ErrorKind::NoTag) => Ok(Tag::new()),
            Err(e) => Err(TagWriteError::Open {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }
}

impl TagWriter for Id3TagWriter {
    fn write(&self, entry: &FileEntry, title: &str) -> Result<(), TagWriteError> {
        let path = entry.full_path();
        let mut tag = Self::open(path)?;

        // NUL separates multiple values in ID3v2.4 text frames
        if title.contains('\0') {
            return Err(TagWriteError::SetTitle {
                path: path.to_path_buf(),
                reason: "title contains a NUL character".into(),
            });
        }
        tag.set_title(title);

        tag.write_to_path(path, Version::Id3v24)
            .map_err(|e| TagWriteError::Save {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        debug!(path = %path.display(), title, "title written");
        Ok(())
    }

    fn read_title(&self, path: &Path) -> Result<Option<String>, TagWriteError> {
        match Tag::read_from_path(path) {
            Ok(tag) => Ok(tag.title().map(str::to_owned)),
            Err(e) if matches!(e.kind, ErrorKind::NoTag) => Ok(None),
            Err(e) => Err(TagWriteError::Open {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDir;

    fn entry(dir: &TestDir, name: &str) -> FileEntry {
        FileEntry::from_path(dir.file_with_content(name, b"\xff\xfb\x90\x00 not really audio")).unwrap()
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = TestDir::new();
        let e = entry(&dir, "a.mp3");

        Id3TagWriter.write(&e, "Song A").unwrap();
        assert_eq!(
            Id3TagWriter.read_title(e.full_path()).unwrap(),
            Some("Song A".to_string())
        );
    }

    #[test]
    fn test_write_is_idempotent() {
        let dir = TestDir::new();
        let e = entry(&dir, "a.mp3");

        Id3TagWriter.write(&e, "Same").unwrap();
        let first = Tag::read_from_path(e.full_path()).unwrap();
        Id3TagWriter.write(&e, "Same").unwrap();
        let second = Tag::read_from_path(e.full_path()).unwrap();

        assert_eq!(first.title(), second.title());
        assert_eq!(first.frames().count(), second.frames().count());
    }

    #[test]
    fn test_overwrite_keeps_other_frames() {
        let dir = TestDir::new();
        let e = entry(&dir, "a.mp3");

        let mut tag = Tag::new();
        tag.set_artist("Someone");
        tag.set_title("Old");
        tag.write_to_path(e.full_path(), Version::Id3v24).unwrap();

        Id3TagWriter.write(&e, "New").unwrap();
        let tag = Tag::read_from_path(e.full_path()).unwrap();
        assert_eq!(tag.title(), Some("New"));
        assert_eq!(tag.artist(), Some("Someone"));
    }

    /// ID3v2.4 tag: TALB "Album", TPE2 with an invalid text encoding, TPE1 "Artist"
    fn tag_with_broken_middle_frame() -> Vec<u8> {
        fn frame(id: &[u8; 4], data: &[u8]) -> Vec<u8> {
            let mut out = id.to_vec();
            out.extend_from_slice(&[0, 0, 0, u8::try_from(data.len()).unwrap()]);
            out.extend_from_slice(&[0, 0]);
            out.extend_from_slice(data);
            out
        }

        let mut frames = frame(b"TALB", b"\x03Album");
        frames.extend(frame(b"TPE2", b"\x09X"));
        frames.extend(frame(b"TPE1", b"\x03Artist"));

        let mut bytes = b"ID3\x04\x00\x00".to_vec();
        bytes.extend_from_slice(&[0, 0, 0, u8::try_from(frames.len()).unwrap()]);
        bytes.extend(frames);
        bytes.extend_from_slice(b"\xff\xfb\x90\x00 audio");
        bytes
    }

    #[test]
    fn test_corrupt_tag_is_not_rewritten() {
        let dir = TestDir::new();
        let original = tag_with_broken_middle_frame();
        let e = FileEntry::from_path(dir.file_with_content("broken.mp3", &original)).unwrap();

        let err = Id3TagWriter.write(&e, "New").unwrap_err();
        assert!(matches!(err, TagWriteError::Open { .. }));
        assert_eq!(std::fs::read(e.full_path()).unwrap(), original);
    }

    #[test]
    fn test_untagged_file_reads_as_none() {
        let dir = TestDir::new();
        let e = entry(&dir, "plain.mp3");
        assert_eq!(Id3TagWriter.read_title(e.full_path()).unwrap(), None);
    }

    #[test]
    fn test_missing_file_fails_to_open() {
        let dir = TestDir::new();
        let e = entry(&dir, "gone.mp3");
        std::fs::remove_file(e.full_path()).unwrap();

        let err = Id3TagWriter.write(&e, "x").unwrap_err();
        assert!(matches!(err, TagWriteError::Open { .. }));
        assert_eq!(err.path(), e.full_path());
    }

    #[test]
    fn test_nul_in_title_is_rejected() {
        let dir = TestDir::new();
        let e = entry(&dir, "a.mp3");

        let err = Id3TagWriter.write(&e, "a\0b").unwrap_err();
        assert!(matches!(err, TagWriteError::SetTitle { .. }));
        assert_eq!(Id3TagWriter.read_title(e.full_path()).unwrap(), None);
    }
}
