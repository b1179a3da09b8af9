use rusqlite::{Connection, Result};
use std::path::Path;

pub mod attempts;

/// Opens the attempt history database at `path`, creating it when needed.
pub fn init_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let conn = Connection::open(path)?;

    run_migrations(&conn)?;

    Ok(conn)
}

pub(crate) fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS attempts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            mode TEXT NOT NULL,
            questions_total INTEGER NOT NULL,
            questions_correct INTEGER NOT NULL,
            percentage REAL NOT NULL,
            grade TEXT NOT NULL,
            started_at INTEGER NOT NULL,
            completed_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_attempts_completed ON attempts(completed_at)",
        [],
    )?;

    Ok(())
}
