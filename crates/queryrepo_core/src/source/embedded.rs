//! Statement source over a tree embedded with `include_dir!`.

use super::{join_path, sort_entries, SourceEntry, StatementSource};
use include_dir::{Dir, DirEntry};
use std::io;

/// Statement source over an embedded directory.
///
/// Logical paths are resolved relative to `dir`, so a subdirectory taken
/// with `Dir::get_dir` works the same as the embedded root.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource<'a> {
    dir: &'a Dir<'a>,
}

impl<'a> EmbeddedSource<'a> {
    pub fn new(dir: &'a Dir<'a>) -> Self {
        Self { dir }
    }

    fn find_dir(&self, path: &str) -> io::Result<&'a Dir<'a>> {
        let normalized = join_path(&[path]);
        if normalized.is_empty() {
            return Ok(self.dir);
        }
        self.dir
            .get_dir(self.dir.path().join(&normalized))
            .ok_or_else(|| not_found(&normalized))
    }
}

impl StatementSource for EmbeddedSource<'_> {
    fn read_dir(&self, path: &str) -> io::Result<Vec<SourceEntry>> {
        let dir = self.find_dir(path)?;
        let mut entries = dir
            .entries()
            .iter()
            .map(|entry| {
                let name = entry
                    .path()
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or_default()
                    .to_string();
                match entry {
                    DirEntry::Dir(_) => SourceEntry::dir(name),
                    DirEntry::File(_) => SourceEntry::file(name),
                }
            })
            .collect::<Vec<_>>();

        sort_entries(&mut entries);
        Ok(entries)
    }

    fn read_to_string(&self, path: &str) -> io::Result<String> {
        let normalized = join_path(&[path]);
        let file = self
            .dir
            .get_file(self.dir.path().join(&normalized))
            .ok_or_else(|| not_found(&normalized))?;
        file.contents_utf8().map(str::to_string).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("embedded file is not valid UTF-8: {normalized}"),
            )
        })
    }
}

fn not_found(path: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("embedded entry not found: {path}"),
    )
}
