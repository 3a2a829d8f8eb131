use rusqlite::{Connection, Result};
use std::path::Path;

const CREATE_TRANSACTIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    date TEXT,
    amount REAL,
    category TEXT,
    type TEXT
)";

pub fn establish_connection(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Idempotent; safe to call on every start.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_TRANSACTIONS_TABLE, [])?;
    Ok(())
}

#[cfg(test)]
pub fn establish_test_connection() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}
