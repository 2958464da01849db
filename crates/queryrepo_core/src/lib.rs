//! Named SQL statements kept outside application code.
//!
//! Statements live in a tree with one directory per collection and one file
//! per statement. The tree is scanned once into a [`Repository`], which then
//! serves `(collection, statement)` lookups to any number of threads and
//! hands statement text to a [`Preparer`] such as a rusqlite connection.

pub mod document;
pub mod loader;
pub mod logging;
pub mod model;
pub mod prepare;
pub mod repo;
pub mod source;

pub use document::{StatementEntry, StatementsDocument};
pub use loader::{
    load_from_path, load_from_source, load_into, load_statement, statement_name, LoadError,
    LoadResult,
};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::collection::{Collection, CollectionError, CollectionResult};
pub use prepare::{
    prepare_from_source, prepare_from_source_with, ContextPreparer, PrepareError, Preparer,
};
pub use repo::repository::{RepoError, RepoResult, Repository};
pub use source::{join_path, DirSource, EmbeddedSource, EntryKind, SourceEntry, StatementSource};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
