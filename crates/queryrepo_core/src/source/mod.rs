//! Hierarchical resource trees that hold statement files.
//!
//! # Responsibility
//! - Abstract on-disk directories and compile-time embedded trees behind
//!   one read-only interface.
//! - Normalize logical paths in a single place.
//!
//! # Invariants
//! - Logical paths are relative and `/`-separated; the empty string is the
//!   tree root.
//! - `read_dir` returns entries sorted by name.

pub mod dir;
pub mod embedded;

use std::io;

pub use dir::DirSource;
pub use embedded::EmbeddedSource;

/// Kind of one entry in a statement source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One named child of a directory in a statement source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl SourceEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Dir,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Read-only tree of statement files.
pub trait StatementSource {
    /// Lists the children of the directory at `path`.
    fn read_dir(&self, path: &str) -> io::Result<Vec<SourceEntry>>;

    /// Reads the file at `path` as UTF-8 text.
    fn read_to_string(&self, path: &str) -> io::Result<String>;
}

impl<S: StatementSource + ?Sized> StatementSource for &S {
    fn read_dir(&self, path: &str) -> io::Result<Vec<SourceEntry>> {
        (**self).read_dir(path)
    }

    fn read_to_string(&self, path: &str) -> io::Result<String> {
        (**self).read_to_string(path)
    }
}

/// Joins logical path segments.
///
/// Backslashes count as separators; empty and `.` segments are dropped, so
/// `join_path(&["", "demo"])` and `join_path(&["./", "demo/"])` both give
/// `demo`.
pub fn join_path(segments: &[&str]) -> String {
    let mut joined = String::new();
    for segment in segments {
        for part in segment.split(['/', '\\']) {
            if part.is_empty() || part == "." {
                continue;
            }
            if !joined.is_empty() {
                joined.push('/');
            }
            joined.push_str(part);
        }
    }
    joined
}

pub(crate) fn sort_entries(entries: &mut [SourceEntry]) {
    entries.sort_by(|left, right| left.name.cmp(&right.name));
}
