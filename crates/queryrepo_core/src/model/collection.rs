//! Named group of SQL statements.
//!
//! # Responsibility
//! - Map statement names to statement text for one collection.
//! - Reject duplicate names without touching existing entries.
//!
//! # Invariants
//! - A failed `add` leaves the collection unchanged.
//! - Collections are populated during loading and only read afterwards;
//!   the repository exposes no mutable access once a collection is added.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CollectionResult<T> = Result<T, CollectionError>;

/// Statement-level errors raised by a single collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    DuplicateStatement {
        collection: String,
        statement: String,
    },
    StatementNotFound {
        collection: String,
        statement: String,
    },
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateStatement {
                collection,
                statement,
            } => write!(
                f,
                "statement {statement} already exists in collection {collection}"
            ),
            Self::StatementNotFound {
                collection,
                statement,
            } => write!(
                f,
                "statement {statement} not found in collection {collection}"
            ),
        }
    }
}

impl Error for CollectionError {}

/// Statement store for one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    name: String,
    statements: BTreeMap<String, String>,
}

impl Collection {
    /// Creates an empty collection tagged with `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statements: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Returns statement names in sorted order.
    pub fn statement_names(&self) -> Vec<String> {
        self.statements.keys().cloned().collect()
    }

    /// Inserts one statement.
    ///
    /// # Errors
    /// - `DuplicateStatement` when `statement` is already present. The stored
    ///   text for that name is kept as is.
    pub fn add(
        &mut self,
        statement: impl Into<String>,
        text: impl Into<String>,
    ) -> CollectionResult<()> {
        let statement = statement.into();
        if self.statements.contains_key(statement.as_str()) {
            return Err(CollectionError::DuplicateStatement {
                collection: self.name.clone(),
                statement,
            });
        }

        self.statements.insert(statement, text.into());
        Ok(())
    }

    /// Returns the stored text for `statement` verbatim.
    pub fn get(&self, statement: &str) -> CollectionResult<&str> {
        self.statements
            .get(statement)
            .map(String::as_str)
            .ok_or_else(|| CollectionError::StatementNotFound {
                collection: self.name.clone(),
                statement: statement.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{Collection, CollectionError};
    use proptest::prelude::*;

    fn seeded() -> Collection {
        let mut collection = Collection::new("test1");
        collection
            .add("query1", "queryString1")
            .expect("query1 should insert");
        collection
            .add("query2", "queryString2")
            .expect("query2 should insert");
        collection
    }

    #[test]
    fn new_collection_is_empty_and_named() {
        let collection = Collection::new("test1");
        assert_eq!(collection.name(), "test1");
        assert!(collection.is_empty());
        assert_eq!(collection, Collection::new("test1"));
    }

    #[test]
    fn add_then_get_returns_text_verbatim() {
        let mut collection = seeded();
        let text = "  SELECT *\n  FROM demo -- trailing\n";
        collection.add("query3", text).expect("query3 should insert");
        assert_eq!(collection.get("query3").unwrap(), text);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn duplicate_add_fails_and_keeps_original_text() {
        let mut collection = seeded();
        let before = collection.clone();

        let err = collection
            .add("query2", "something else")
            .expect_err("duplicate must fail");
        assert_eq!(
            err,
            CollectionError::DuplicateStatement {
                collection: "test1".to_string(),
                statement: "query2".to_string(),
            }
        );
        assert_eq!(collection, before);
        assert_eq!(collection.get("query2").unwrap(), "queryString2");
    }

    #[test]
    fn get_unknown_statement_reports_collection_and_name() {
        let collection = seeded();
        let err = collection.get("query3").unwrap_err();
        assert_eq!(
            err,
            CollectionError::StatementNotFound {
                collection: "test1".to_string(),
                statement: "query3".to_string(),
            }
        );
        assert_eq!(err.to_string(), "statement query3 not found in collection test1");
    }

    #[test]
    fn statement_names_are_sorted() {
        let mut collection = Collection::new("demo");
        collection.add("list", "a").unwrap();
        collection.add("insert", "b").unwrap();
        assert_eq!(collection.statement_names(), vec!["insert", "list"]);
    }

    proptest! {
        /// `add` then `get` returns the stored text unchanged.
        #[test]
        fn prop_add_then_get_roundtrip(name in ".*", text in ".*") {
            let mut collection = Collection::new("prop");
            collection.add(name.clone(), text.clone()).unwrap();
            prop_assert_eq!(collection.get(&name).unwrap(), text.as_str());
        }

        /// A second `add` under one name fails and leaves the collection as it was.
        #[test]
        fn prop_duplicate_add_keeps_first_text(
            name in ".*",
            first in ".*",
            second in ".*",
        ) {
            let mut collection = Collection::new("prop");
            collection.add(name.clone(), first.clone()).unwrap();
            let before = collection.clone();

            let err = collection.add(name.clone(), second).unwrap_err();
            prop_assert_eq!(
                err,
                CollectionError::DuplicateStatement {
                    collection: "prop".to_string(),
                    statement: name.clone(),
                }
            );
            prop_assert_eq!(&collection, &before);
            prop_assert_eq!(collection.get(&name).unwrap(), first.as_str());
        }
    }
}
