//! Statement tree loader.
//!
//! # Responsibility
//! - Scan a statement source once and register one collection per
//!   top-level directory.
//! - Read single statements on demand for repository-free callers.
//!
//! # Invariants
//! - The scan is at most two levels deep; a directory inside a collection
//!   aborts the load.
//! - The statement name is the file name without its last extension.
//! - The first error aborts the load. Collections registered before it stay
//!   registered.
//! - A collection is registered only after all of its files were read.

use crate::model::collection::{Collection, CollectionError};
use crate::repo::repository::{RepoError, Repository};
use crate::source::{join_path, DirSource, SourceEntry, StatementSource};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::Path;
use std::time::Instant;

/// Extension appended by [`load_statement`].
pub const STATEMENT_FILE_EXTENSION: &str = "sql";

pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while reading statements from a source.
#[derive(Debug)]
pub enum LoadError {
    Read { path: String, source: io::Error },
    NestedDirectory { collection: String, name: String },
    Statement(CollectionError),
    Repository(RepoError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "failed to read {path}: {source}"),
            Self::NestedDirectory { collection, name } => write!(
                f,
                "nested directories are not supported, {name} is a directory in collection {collection}"
            ),
            Self::Statement(err) => write!(f, "{err}"),
            Self::Repository(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::NestedDirectory { .. } => None,
            Self::Statement(err) => Some(err),
            Self::Repository(err) => Some(err),
        }
    }
}

impl From<CollectionError> for LoadError {
    fn from(value: CollectionError) -> Self {
        Self::Statement(value)
    }
}

impl From<RepoError> for LoadError {
    fn from(value: RepoError) -> Self {
        Self::Repository(value)
    }
}

/// Loads every collection below the directory `root` on disk.
///
/// On error the partly filled repository is dropped. Callers that need the
/// collections registered before the failure should build a [`Repository`]
/// and pass it to [`load_into`] with a [`DirSource`].
pub fn load_from_path(root: impl AsRef<Path>) -> LoadResult<Repository> {
    load_from_source(&DirSource::new(root), "")
}

/// Builds a new repository from the collections below `root` in `source`.
///
/// Like [`load_from_path`], the partial repository is dropped on error; use
/// [`load_into`] to keep it.
pub fn load_from_source<S>(source: &S, root: &str) -> LoadResult<Repository>
where
    S: StatementSource + ?Sized,
{
    let repo = Repository::new();
    load_into(&repo, source, root)?;
    Ok(repo)
}

/// Registers the collections below `root` in `source` into `repo`.
///
/// Collections registered before a failure are left in `repo`.
pub fn load_into<S>(repo: &Repository, source: &S, root: &str) -> LoadResult<()>
where
    S: StatementSource + ?Sized,
{
    let started_at = Instant::now();
    info!("event=repo_load module=loader status=start root={root}");

    match scan(repo, source, root) {
        Ok((collections, statements)) => {
            info!(
                "event=repo_load module=loader status=ok root={} collections={} statements={} duration_ms={}",
                root,
                collections,
                statements,
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=repo_load module=loader status=error root={} duration_ms={} error_code={} error={}",
                root,
                started_at.elapsed().as_millis(),
                error_code(&err),
                err
            );
            Err(err)
        }
    }
}

/// Reads `<root>/<collection>/<statement>.sql` from `source`.
pub fn load_statement<S>(
    source: &S,
    root: &str,
    collection: &str,
    statement: &str,
) -> LoadResult<String>
where
    S: StatementSource + ?Sized,
{
    let file_name = format!("{statement}.{STATEMENT_FILE_EXTENSION}");
    read_file(source, &join_path(&[root, collection, &file_name]))
}

/// Returns the statement name for a file name.
///
/// Only the last extension is removed; a leading dot does not start an
/// extension (`.env` stays `.env`).
pub fn statement_name(file_name: &str) -> &str {
    match Path::new(file_name).file_stem().and_then(|stem| stem.to_str()) {
        Some(stem) => stem,
        None => file_name,
    }
}

fn scan<S>(repo: &Repository, source: &S, root: &str) -> LoadResult<(usize, usize)>
where
    S: StatementSource + ?Sized,
{
    let root_path = join_path(&[root]);
    let entries = read_entries(source, &root_path)?;

    let mut collections = 0;
    let mut statements = 0;
    for entry in entries.iter().filter(|entry| entry.is_dir()) {
        let collection = load_collection(source, &root_path, &entry.name)?;
        statements += collection.len();
        repo.add(collection)?;
        collections += 1;
    }
    Ok((collections, statements))
}

fn load_collection<S>(source: &S, root: &str, name: &str) -> LoadResult<Collection>
where
    S: StatementSource + ?Sized,
{
    let dir_path = join_path(&[root, name]);
    let mut collection = Collection::new(name);

    for entry in read_entries(source, &dir_path)? {
        if entry.is_dir() {
            return Err(LoadError::NestedDirectory {
                collection: name.to_string(),
                name: entry.name,
            });
        }

        let text = read_file(source, &join_path(&[&dir_path, &entry.name]))?;
        collection.add(statement_name(&entry.name), text)?;
    }
    Ok(collection)
}

fn read_entries<S>(source: &S, path: &str) -> LoadResult<Vec<SourceEntry>>
where
    S: StatementSource + ?Sized,
{
    source.read_dir(path).map_err(|err| LoadError::Read {
        path: display_path(path),
        source: err,
    })
}

fn read_file<S>(source: &S, path: &str) -> LoadResult<String>
where
    S: StatementSource + ?Sized,
{
    source.read_to_string(path).map_err(|err| LoadError::Read {
        path: display_path(path),
        source: err,
    })
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        ".".to_string()
    } else {
        path.to_string()
    }
}

fn error_code(err: &LoadError) -> &'static str {
    match err {
        LoadError::Read { .. } => "read_failed",
        LoadError::NestedDirectory { .. } => "nested_directory",
        LoadError::Statement(_) => "duplicate_statement",
        LoadError::Repository(_) => "duplicate_collection",
    }
}
