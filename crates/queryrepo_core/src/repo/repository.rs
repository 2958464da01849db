//! Thread-safe collection registry.
//!
//! # Responsibility
//! - Register fully built collections under their name.
//! - Serve read-only lookups to any number of concurrent callers.
//! - Bridge lookups to a caller-supplied `Preparer`.
//!
//! # Invariants
//! - The map is only touched while holding the lock.
//! - A collection is visible only after it was moved in whole by `add`.
//! - Lookup failures never reach the preparer.

use crate::model::collection::{Collection, CollectionError};
use crate::prepare::{ContextPreparer, PrepareError, Preparer};
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Registry-level errors for collection registration and lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    DuplicateCollection(String),
    CollectionNotFound(String),
    Statement(CollectionError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateCollection(name) => write!(f, "collection {name} already exists"),
            Self::CollectionNotFound(name) => write!(f, "collection {name} not found"),
            Self::Statement(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Statement(err) => Some(err),
            Self::DuplicateCollection(_) | Self::CollectionNotFound(_) => None,
        }
    }
}

impl From<CollectionError> for RepoError {
    fn from(value: CollectionError) -> Self {
        Self::Statement(value)
    }
}

/// Statement repository keyed by collection name.
///
/// Share it by reference or through `Arc<Repository>`; all methods take
/// `&self`.
#[derive(Debug, Default)]
pub struct Repository {
    collections: RwLock<BTreeMap<String, Collection>>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one collection under its own name.
    ///
    /// # Errors
    /// - `DuplicateCollection` when the name is taken; the registered
    ///   collection stays in place.
    pub fn add(&self, collection: Collection) -> RepoResult<()> {
        let mut collections = self.collections.write();
        if collections.contains_key(collection.name()) {
            return Err(RepoError::DuplicateCollection(collection.name().to_string()));
        }

        info!(
            "event=collection_add module=repo status=ok collection={} statements={}",
            collection.name(),
            collection.len()
        );
        collections.insert(collection.name().to_string(), collection);
        Ok(())
    }

    /// Returns a copy of the statement text.
    ///
    /// # Errors
    /// - `CollectionNotFound` when no collection has that name.
    /// - `Statement(StatementNotFound)` when the collection exists but the
    ///   statement does not.
    pub fn get(&self, collection: &str, statement: &str) -> RepoResult<String> {
        let collections = self.collections.read();
        let Some(found) = collections.get(collection) else {
            debug!(
                "event=statement_lookup module=repo status=miss collection={collection} statement={statement}"
            );
            return Err(RepoError::CollectionNotFound(collection.to_string()));
        };

        Ok(found.get(statement)?.to_string())
    }

    pub fn contains(&self, collection: &str) -> bool {
        self.collections.read().contains_key(collection)
    }

    /// Returns registered collection names in sorted order.
    pub fn collection_names(&self) -> Vec<String> {
        self.collections.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.collections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.read().is_empty()
    }

    /// Resolves one statement and prepares it with `preparer`.
    ///
    /// The preparer's own failure comes back unchanged as
    /// `PrepareError::Preparer`.
    pub fn prepare<P: Preparer>(
        &self,
        collection: &str,
        statement: &str,
        preparer: P,
    ) -> Result<P::Handle, PrepareError<P::Error>> {
        let sql = self.get(collection, statement)?;
        preparer.prepare(&sql).map_err(|err| {
            log_prepare_failure(collection, statement);
            PrepareError::Preparer(err)
        })
    }

    /// Like [`Repository::prepare`], forwarding `ctx` to the preparer.
    ///
    /// The lookup itself never blocks and ignores `ctx`.
    pub fn prepare_with<P: ContextPreparer>(
        &self,
        ctx: &P::Context,
        collection: &str,
        statement: &str,
        preparer: P,
    ) -> Result<P::Handle, PrepareError<P::Error>> {
        let sql = self.get(collection, statement)?;
        preparer.prepare_with(ctx, &sql).map_err(|err| {
            log_prepare_failure(collection, statement);
            PrepareError::Preparer(err)
        })
    }
}

fn log_prepare_failure(collection: &str, statement: &str) {
    warn!(
        "event=statement_prepare module=repo status=error collection={collection} statement={statement} error_code=preparer_rejected"
    );
}
