//! rusqlite bindings for the prepare capability.
//!
//! Handles borrow the connection (or transaction) they were prepared on.
//! The context is a deadline; once it has passed, preparation is refused
//! with `SQLITE_INTERRUPT` and nothing reaches SQLite.

use super::{ContextPreparer, Preparer};
use rusqlite::{ffi, Connection, Statement, Transaction};
use std::time::Instant;

impl<'conn> Preparer for &'conn Connection {
    type Handle = Statement<'conn>;
    type Error = rusqlite::Error;

    fn prepare(&self, sql: &str) -> rusqlite::Result<Statement<'conn>> {
        Connection::prepare(*self, sql)
    }
}

impl<'conn> ContextPreparer for &'conn Connection {
    type Context = Instant;

    fn prepare_with(&self, deadline: &Instant, sql: &str) -> rusqlite::Result<Statement<'conn>> {
        if Instant::now() >= *deadline {
            return Err(deadline_exceeded());
        }
        Connection::prepare(*self, sql)
    }
}

impl<'conn> Preparer for &'conn Transaction<'_> {
    type Handle = Statement<'conn>;
    type Error = rusqlite::Error;

    fn prepare(&self, sql: &str) -> rusqlite::Result<Statement<'conn>> {
        let conn: &'conn Connection = *self;
        Connection::prepare(conn, sql)
    }
}

impl<'conn> ContextPreparer for &'conn Transaction<'_> {
    type Context = Instant;

    fn prepare_with(&self, deadline: &Instant, sql: &str) -> rusqlite::Result<Statement<'conn>> {
        let conn: &'conn Connection = *self;
        ContextPreparer::prepare_with(&conn, deadline, sql)
    }
}

/// Error reported when a deadline passed before preparation started.
pub fn deadline_exceeded() -> rusqlite::Error {
    rusqlite::Error::SqliteFailure(
        ffi::Error::new(ffi::SQLITE_INTERRUPT),
        Some("deadline exceeded before prepare".to_string()),
    )
}
