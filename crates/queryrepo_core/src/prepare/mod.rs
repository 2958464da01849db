//! Prepare capability boundary.
//!
//! # Responsibility
//! - Describe "turn statement text into an executable handle" without tying
//!   the repository to a database driver.
//! - Provide the rusqlite bindings used by the demo and tests.
//! - Offer repository-free entry points that load one statement on demand.
//!
//! # Invariants
//! - Preparer failures are returned verbatim inside `PrepareError::Preparer`.
//! - Lookup or load failures never invoke the preparer.
//! - Cancellation context reaches the preparer only.

mod sqlite;

use crate::loader::{load_statement, LoadError};
use crate::repo::repository::RepoError;
use crate::source::StatementSource;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use sqlite::deadline_exceeded;

/// Something that compiles statement text into a handle.
///
/// Implement it for a reference type (`&Connection`, `&MyPool`) so the
/// handle may borrow from the underlying connection.
pub trait Preparer {
    type Handle;
    type Error;

    fn prepare(&self, sql: &str) -> Result<Self::Handle, Self::Error>;
}

/// Preparer that also accepts a cancellation or deadline context.
pub trait ContextPreparer: Preparer {
    type Context;

    fn prepare_with(&self, ctx: &Self::Context, sql: &str) -> Result<Self::Handle, Self::Error>;
}

/// Failure of a resolve-then-prepare call.
#[derive(Debug)]
pub enum PrepareError<E> {
    /// The statement could not be resolved from a repository.
    Lookup(RepoError),
    /// The statement could not be read from a statement source.
    Load(LoadError),
    /// The preparer rejected the statement.
    Preparer(E),
}

impl<E> PrepareError<E> {
    /// Returns the preparer's error when it caused the failure.
    pub fn preparer_error(&self) -> Option<&E> {
        match self {
            Self::Preparer(err) => Some(err),
            Self::Lookup(_) | Self::Load(_) => None,
        }
    }

    pub fn into_preparer_error(self) -> Option<E> {
        match self {
            Self::Preparer(err) => Some(err),
            Self::Lookup(_) | Self::Load(_) => None,
        }
    }
}

impl<E: Display> Display for PrepareError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lookup(err) => write!(f, "{err}"),
            Self::Load(err) => write!(f, "{err}"),
            Self::Preparer(err) => write!(f, "{err}"),
        }
    }
}

impl<E: Error + 'static> Error for PrepareError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lookup(err) => Some(err),
            Self::Load(err) => Some(err),
            Self::Preparer(err) => Some(err),
        }
    }
}

impl<E> From<RepoError> for PrepareError<E> {
    fn from(value: RepoError) -> Self {
        Self::Lookup(value)
    }
}

impl<E> From<LoadError> for PrepareError<E> {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

/// Reads `<root>/<collection>/<statement>.sql` from `source` and prepares it.
///
/// Nothing is cached; every call reads the file again.
pub fn prepare_from_source<S, P>(
    preparer: P,
    source: &S,
    root: &str,
    collection: &str,
    statement: &str,
) -> Result<P::Handle, PrepareError<P::Error>>
where
    S: StatementSource + ?Sized,
    P: Preparer,
{
    let sql = load_statement(source, root, collection, statement)?;
    preparer.prepare(&sql).map_err(PrepareError::Preparer)
}

/// Like [`prepare_from_source`], forwarding `ctx` to the preparer.
pub fn prepare_from_source_with<S, P>(
    ctx: &P::Context,
    preparer: P,
    source: &S,
    root: &str,
    collection: &str,
    statement: &str,
) -> Result<P::Handle, PrepareError<P::Error>>
where
    S: StatementSource + ?Sized,
    P: ContextPreparer,
{
    let sql = load_statement(source, root, collection, statement)?;
    preparer.prepare_with(ctx, &sql).map_err(PrepareError::Preparer)
}
