pub mod migrations;
pub mod queries;

use anyhow::Context;
use rusqlite::Connection;

/// Opens the session store at `path` (`:memory:` keeps sessions in-process)
/// and brings its schema up to date.
pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("failed to open session store at {path}"))?;

    // Turns cascade away with their session only when foreign keys are on
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to configure session store")?;

    migrations::run_migrations(&conn)?;

    tracing::debug!(path, "session store ready");
    Ok(conn)
}
