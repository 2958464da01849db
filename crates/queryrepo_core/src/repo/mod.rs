//! Collection registry shared by statement consumers.
//!
//! # Responsibility
//! - Own every loaded collection behind one lock.
//! - Resolve `(collection, statement)` pairs and hand text to preparers.
//!
//! # Invariants
//! - Collection names are unique; an added collection is never replaced.
//! - Lookup failures are returned to the caller, never treated as fatal.

pub mod repository;
