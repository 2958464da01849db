//! Single-file statement documents.
//!
//! A document carries one collection as JSON:
//!
//! ```json
//! {
//!   "name": "demo",
//!   "statements": [
//!     { "name": "list", "statement": "SELECT * FROM demo" }
//!   ]
//! }
//! ```
//!
//! Documents can be queried directly or turned into a [`Collection`] for a
//! repository.
//!
//! JSON is this crate's own document format, chosen because `serde_json` is
//! already on the stack. The `name` / `statements` field layout matches the
//! YAML statement files some tools produce, but YAML input is not accepted.

use crate::model::collection::{Collection, CollectionError, CollectionResult};
use serde::{Deserialize, Serialize};

/// One named statement inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementEntry {
    pub name: String,
    pub statement: String,
}

/// Serialized collection of statements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatementsDocument {
    pub name: String,
    #[serde(default)]
    pub statements: Vec<StatementEntry>,
}

impl StatementsDocument {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Returns the first statement named `name`.
    pub fn get(&self, name: &str) -> CollectionResult<&str> {
        self.statements
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.statement.as_str())
            .ok_or_else(|| CollectionError::StatementNotFound {
                collection: self.name.clone(),
                statement: name.to_string(),
            })
    }

    /// Converts the document into a collection.
    ///
    /// # Errors
    /// - `DuplicateStatement` for the first repeated statement name.
    pub fn into_collection(self) -> CollectionResult<Collection> {
        let mut collection = Collection::new(self.name);
        for entry in self.statements {
            collection.add(entry.name, entry.statement)?;
        }
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::{StatementEntry, StatementsDocument};
    use crate::model::collection::CollectionError;

    const DEMO: &str = r#"{
        "name": "demoStatements",
        "statements": [
            { "name": "list", "statement": "SELECT * FROM demo" },
            { "name": "insert", "statement": "INSERT INTO demo VALUES (?, ?)" }
        ]
    }"#;

    #[test]
    fn get_returns_matching_statement() {
        let document = StatementsDocument::from_json(DEMO).unwrap();
        assert_eq!(document.get("list").unwrap(), "SELECT * FROM demo");
    }

    #[test]
    fn get_unknown_statement_fails() {
        let document = StatementsDocument::from_json(DEMO).unwrap();
        let err = document.get("delete").unwrap_err();
        assert_eq!(
            err,
            CollectionError::StatementNotFound {
                collection: "demoStatements".to_string(),
                statement: "delete".to_string(),
            }
        );
    }

    #[test]
    fn into_collection_keeps_every_statement() {
        let collection = StatementsDocument::from_json(DEMO)
            .unwrap()
            .into_collection()
            .unwrap();
        assert_eq!(collection.name(), "demoStatements");
        assert_eq!(
            collection.get("insert").unwrap(),
            "INSERT INTO demo VALUES (?, ?)"
        );
    }

    #[test]
    fn into_collection_rejects_repeated_names() {
        let document = StatementsDocument {
            name: "demo".to_string(),
            statements: vec![
                StatementEntry {
                    name: "list".to_string(),
                    statement: "SELECT 1".to_string(),
                },
                StatementEntry {
                    name: "list".to_string(),
                    statement: "SELECT 2".to_string(),
                },
            ],
        };
        let err = document.into_collection().unwrap_err();
        assert!(matches!(err, CollectionError::DuplicateStatement { .. }));
    }

    #[test]
    fn yaml_input_is_rejected() {
        let yaml = "name: demo\nstatements:\n  - name: list\n    statement: SELECT 1\n";
        assert!(StatementsDocument::from_json(yaml).is_err());
    }

    #[test]
    fn missing_statements_field_defaults_to_empty() {
        let document = StatementsDocument::from_json(r#"{ "name": "empty" }"#).unwrap();
        assert!(document.statements.is_empty());
        let json = document.to_json().unwrap();
        assert_eq!(StatementsDocument::from_json(&json).unwrap(), document);
    }
}
