use std::path::Path;

use anyhow::Result;
use rusqlite::{params, Connection};

use crate::query::NameFilter;

use super::traits::{State, Storage};

const DB_SCHEMA_VERSION: i64 = 1;

/// SQLite-backed state store.
///
/// The handle is a cheap clone holding only the database path; every call
/// opens its own connection, so concurrent reads never share mutable state.
#[derive(Clone)]
pub struct SqliteStorage {
    pub path: String,
}

fn map_state_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<State> {
    let name: String = row.get(0)?;
    Ok(State { name })
}

/// Compile a prefix into a literal LIKE pattern: escape the wildcard
/// characters the caller typed, then anchor with a trailing `%`.
fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn db_find_states(conn: &Connection, filter: &NameFilter) -> rusqlite::Result<Vec<State>> {
    match filter {
        NameFilter::Any => {
            let mut stmt = conn.prepare("SELECT name FROM states")?;
            let rows = stmt
                .query_map([], map_state_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        }
        NameFilter::Prefix(prefix) => {
            let mut stmt = conn
                .prepare("SELECT name FROM states WHERE lower(name) LIKE lower(?1) ESCAPE '\\'")?;
            let rows = stmt
                .query_map(params![like_prefix_pattern(prefix)], map_state_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        }
    }
}

fn db_replace_all(conn: &Connection, states: &[State]) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM states", [])?;
    let mut stmt = conn.prepare("INSERT INTO states (name) VALUES (?1)")?;
    for state in states {
        stmt.execute(params![state.name])?;
    }
    Ok(())
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn reset_all(&self) -> Result<()> {
        if !std::path::Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }

    pub fn init(&self) -> Result<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        if version == 0 {
            log::info!(
                "SQLite schema migration: {} -> {}",
                version,
                DB_SCHEMA_VERSION
            );
            conn.execute_batch(
                r#"
            CREATE TABLE states (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );
        "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}

impl Storage for SqliteStorage {
    fn find_states(&self, filter: &NameFilter) -> Result<Vec<State>> {
        let rows = self.with_conn(|conn| db_find_states(conn, filter))?;
        Ok(rows)
    }

    fn replace_all(&self, states: &[State]) -> Result<()> {
        self.with_conn(|conn| db_replace_all(conn, states))?;
        Ok(())
    }
}
