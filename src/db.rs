use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;

const DB_FILE: &str = "book_list.db";

/// Crate root, the default home of `data/`.
pub const DEFAULT_BASE_DIR: &str = env!("CARGO_MANIFEST_DIR");

/// Absolute `<base>/data/book_list.db`, creating `data/` if it does not exist yet.
pub fn db_path(base_dir: &Path) -> Result<PathBuf> {
    let data_dir = base_dir.join("data");
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let data_dir = data_dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", data_dir.display()))?;
    Ok(data_dir.join(DB_FILE))
}

pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS book (
            id        INTEGER PRIMARY KEY,
            book_name TEXT NOT NULL,
            price     REAL,
            rating    INTEGER
        );
        ",
    )?;
    Ok(())
}

pub const INSERT_BOOK: &str = "INSERT INTO book (book_name, price, rating) VALUES (?1, ?2, ?3)";

// ── Reading back ──

pub struct BookRow {
    pub id: i64,
    pub book_name: String,
    pub price: Option<f64>,
    pub rating: Option<u8>,
}

pub fn fetch_books(conn: &Connection, rating: Option<u8>, limit: usize) -> Result<Vec<BookRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, book_name, price, rating
         FROM book
         WHERE ?1 IS NULL OR rating = ?1
         ORDER BY id
         LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![rating, limit as i64], |row| {
            Ok(BookRow {
                id: row.get(0)?,
                book_name: row.get(1)?,
                price: row.get(2)?,
                rating: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn count_books(conn: &Connection) -> Result<usize> {
    let n: usize = conn.query_row("SELECT COUNT(*) FROM book", [], |r| r.get(0))?;
    Ok(n)
}
