//! Demo walkthrough: resolve statements by name, then prepare and run them.

use include_dir::{include_dir, Dir};
use queryrepo_core::{load_from_path, load_from_source, EmbeddedSource, Repository};
use rusqlite::Connection;
use std::error::Error;
use std::io::Write;
use std::path::Path;

pub const DEMO_COLLECTION: &str = "demo";

static STATEMENTS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets/statements");

/// Loads statements from `root`, or from the embedded demo tree.
pub fn load_repository(root: Option<&Path>) -> Result<Repository, Box<dyn Error>> {
    let repo = match root {
        Some(root) => load_from_path(root)?,
        None => load_from_source(&EmbeddedSource::new(&STATEMENTS), "")?,
    };
    Ok(repo)
}

/// Prints both demo statements, inserts `item`, and lists the table.
pub fn run(
    repo: &Repository,
    conn: &Connection,
    item: &str,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    writeln!(out, "Fetch statements from repository:")?;
    for name in ["list", "insert"] {
        writeln!(out, "Query: {}", repo.get(DEMO_COLLECTION, name)?)?;
    }
    writeln!(out)?;

    writeln!(out, "Run insert statement:")?;
    let mut insert = repo.prepare(DEMO_COLLECTION, "insert", conn)?;
    let id: i64 = insert.query_row([item], |row| row.get(0))?;
    writeln!(out, "Successfully inserted into database, returned id: {id}")?;
    writeln!(out)?;

    writeln!(out, "Run list statement:")?;
    let mut list = repo.prepare(DEMO_COLLECTION, "list", conn)?;
    let mut rows = list.query([])?;
    while let Some(row) = rows.next()? {
        let id: i64 = row.get(0)?;
        let name: String = row.get(1)?;
        writeln!(out, "Output {id} {name}")?;
    }
    Ok(())
}
