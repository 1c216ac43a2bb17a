// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Fixed preamble written into a freshly created dump file.
pub const FILE_HEADER: &str =
    "// Discovered packet layouts. Generated at runtime; safe to hand-edit.\n\n";

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// I/O failures of the backing dump file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Creating the file (with its fixed header) failed.
    Create(String),
    /// Reading the file contents failed.
    Read(String),
    /// Appending a record failed.
    Append(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Create(msg) => write!(f, "failed to create dump file: {}", msg),
            StoreError::Read(msg) => write!(f, "failed to read dump file: {}", msg),
            StoreError::Append(msg) => write!(f, "failed to append to dump file: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// ---------------------------------------------------------------------------
// DumpStore
// ---------------------------------------------------------------------------

/// Owner of the on-disk dump file.
///
/// Only ever creates the file or appends to it; existing content is never
/// rewritten.  One instance per file per process -- concurrent processes
/// sharing a dump file are unsupported.  No atomic-rename dance: this is a
/// developer-facing debug aid, not a durability-critical store.
pub struct DumpStore {
    path: PathBuf,
}

impl DumpStore {
    /// Create a store for the dump file at `path`.  Does not touch the
    /// filesystem; call [`ensure_exists`](Self::ensure_exists) for that.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DumpStore { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with the fixed header if it is absent.
    ///
    /// An already existing file is left untouched, whatever it contains.
    pub fn ensure_exists(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        fs::write(&self.path, FILE_HEADER)
            .map_err(|e| StoreError::Create(format!("{}: {}", self.path.display(), e)))
    }

    /// Read the entire file for the parser.
    pub fn read(&self) -> Result<String, StoreError> {
        fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Read(format!("{}: {}", self.path.display(), e)))
    }

    /// Append `text` to the file in a single write.
    pub fn append(&self, text: &str) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::Append(format!("{}: {}", self.path.display(), e)))?;
        file.write_all(text.as_bytes())
            .map_err(|e| StoreError::Append(format!("{}: {}", self.path.display(), e)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_exists_creates_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DumpStore::new(dir.path().join("dump.txt"));

        store.ensure_exists().unwrap();
        assert_eq!(store.read().unwrap(), FILE_HEADER);
    }

    #[test]
    fn ensure_exists_leaves_existing_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.txt");
        fs::write(&path, "pre-existing content").unwrap();

        let store = DumpStore::new(&path);
        store.ensure_exists().unwrap();
        assert_eq!(store.read().unwrap(), "pre-existing content");
    }

    #[test]
    fn append_extends_without_rewriting() {
        let dir = tempfile::tempdir().unwrap();
        let store = DumpStore::new(dir.path().join("dump.txt"));
        store.ensure_exists().unwrap();

        store.append("first").unwrap();
        store.append("second").unwrap();
        assert_eq!(store.read().unwrap(), format!("{}firstsecond", FILE_HEADER));
    }

    #[test]
    fn read_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = DumpStore::new(dir.path().join("nope.txt"));
        assert!(matches!(store.read(), Err(StoreError::Read(_))));
    }

    #[test]
    fn append_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = DumpStore::new(dir.path().join("nope.txt"));
        assert!(matches!(store.append("x"), Err(StoreError::Append(_))));
    }
}
