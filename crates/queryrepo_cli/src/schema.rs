//! Demo database bootstrap.
//!
//! # Responsibility
//! - Open the in-memory SQLite database the demo runs against.
//! - Apply the bundled demo migrations in version order.
//!
//! # Invariants
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Pending migrations are applied in one transaction.

use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("../assets/migrations/0001_demo.sql"),
}];

pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Opens an in-memory database with every demo migration applied.
pub fn open_demo_db() -> rusqlite::Result<Connection> {
    let mut conn = Connection::open_in_memory()?;
    apply_migrations(&mut conn)?;
    info!(
        "event=db_open module=cli status=ok mode=memory schema_version={}",
        latest_version()
    );
    Ok(conn)
}

fn apply_migrations(conn: &mut Connection) -> rusqlite::Result<()> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;

    let tx = conn.transaction()?;
    for migration in MIGRATIONS
        .iter()
        .filter(|migration| migration.version > current)
    {
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()
}
