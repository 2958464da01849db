//! On-disk statement source backed by `std::fs`.

use super::{join_path, sort_entries, SourceEntry, StatementSource};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Statement source rooted at a filesystem directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    base: PathBuf,
}

impl DirSource {
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let normalized = join_path(&[path]);
        let mut resolved = self.base.clone();
        for part in normalized.split('/').filter(|part| !part.is_empty()) {
            resolved.push(part);
        }
        resolved
    }
}

impl StatementSource for DirSource {
    fn read_dir(&self, path: &str) -> io::Result<Vec<SourceEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(self.resolve(path))? {
            let entry = entry?;
            let name = entry.file_name().into_string().map_err(|raw| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("entry name is not valid UTF-8: {}", raw.to_string_lossy()),
                )
            })?;
            // Linked collection directories count as directories. A dangling link
            // is treated as a file, so reading it later reports the link's path.
            let is_dir = match fs::metadata(entry.path()) {
                Ok(metadata) => metadata.is_dir(),
                Err(_) => entry.file_type()?.is_dir(),
            };
            if is_dir {
                entries.push(SourceEntry::dir(name));
            } else {
                entries.push(SourceEntry::file(name));
            }
        }

        sort_entries(&mut entries);
        Ok(entries)
    }

    fn read_to_string(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }
}

#[cfg(test)]
mod tests {
    use super::DirSource;
    use crate::source::{SourceEntry, StatementSource};
    use std::fs;

    #[test]
    fn lists_sorted_entries_with_kinds() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("demo")).unwrap();
        fs::write(dir.path().join("b.sql"), "b").unwrap();
        fs::write(dir.path().join("a.sql"), "a").unwrap();

        let source = DirSource::new(dir.path());
        assert_eq!(source.base(), dir.path());
        assert_eq!(
            source.read_dir("").unwrap(),
            vec![
                SourceEntry::file("a.sql"),
                SourceEntry::file("b.sql"),
                SourceEntry::dir("demo"),
            ]
        );
    }

    #[test]
    fn reads_nested_file_through_logical_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("demo")).unwrap();
        fs::write(dir.path().join("demo").join("list.sql"), "SELECT 1").unwrap();

        let source = DirSource::new(dir.path());
        assert_eq!(source.read_to_string("demo/list.sql").unwrap(), "SELECT 1");
        assert_eq!(source.read_to_string("./demo\\list.sql").unwrap(), "SELECT 1");
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_listed_as_file() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("stale-link"))
            .unwrap();

        let source = DirSource::new(dir.path());
        assert_eq!(
            source.read_dir("").unwrap(),
            vec![SourceEntry::file("stale-link")]
        );
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(dir.path());
        let err = source.read_dir("missing").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
