//! Testing utilities for metarename
//!
//! Fixture directories backed by `tempfile`, plus scripted stand-ins for the
//! evaluator and tag writer seams so pipeline tests can observe every call.
//!
//! Only available when compiled with `cfg(test)`.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::collection::{FileCollection, FileEntry};
use crate::rules::{FilterEvaluator, RuleError, RuleSet};
use crate::tags::{TagWriteError, TagWriter};

/// Temporary directory removed on drop
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file with default content and return its path
    pub fn file(&self, name: &str) -> PathBuf {
        self.file_with_content(name, b"test content")
    }

    /// # Panics
    /// Panics if the file cannot be written.
    pub fn file_with_content(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Collection holding one fresh file per name, all checked
    pub fn collection(&self, names: &[&str]) -> FileCollection {
        let mut collection = FileCollection::new();
        for name in names {
            assert!(collection.add(self.file(name)).added());
        }
        collection
    }
}

/// Evaluator returning a fixed list of names and counting calls
pub struct FixedEvaluator {
    names: Vec<String>,
    calls: Cell<usize>,
}

impl FixedEvaluator {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|s| (*s).to_string()).collect(),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl FilterEvaluator for FixedEvaluator {
    fn evaluate(&self, _rules: &RuleSet, _files: &[&FileEntry]) -> Result<Vec<String>, RuleError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.names.clone())
    }
}

/// Tag writer that records writes in memory and can fail on chosen files
#[derive(Default)]
pub struct RecordingWriter {
    written: RefCell<Vec<(PathBuf, String)>>,
    attempts: Cell<usize>,
    fail_on: Vec<String>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every write whose file name equals `name`
    pub fn failing_on(names: &[&str]) -> Self {
        Self {
            fail_on: names.iter().map(|s| (*s).to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn written(&self) -> Vec<(PathBuf, String)> {
        self.written.borrow().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }

    pub fn title_of(&self, path: &Path) -> Option<String> {
        self.written
            .borrow()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, t)| t.clone())
    }
}

impl TagWriter for RecordingWriter {
    fn write(&self, entry: &FileEntry, title: &str) -> Result<(), TagWriteError> {
        self.attempts.set(self.attempts.get() + 1);
        if self.fail_on.iter().any(|n| n == entry.name()) {
            return Err(TagWriteError::Save {
                path: entry.full_path().to_path_buf(),
                reason: "simulated failure".into(),
            });
        }
        self.written
            .borrow_mut()
            .push((entry.full_path().to_path_buf(), title.to_string()));
        Ok(())
    }

    fn read_title(&self, path: &Path) -> Result<Option<String>, TagWriteError> {
        Ok(self.title_of(path))
    }
}
