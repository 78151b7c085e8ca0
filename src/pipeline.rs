use std::io::Write;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{debug, info};

use crate::db;
use crate::parser::{parse_price, BookRecord};

/// Keep the records rated `target`, print each one to `out` and insert it
/// into `book`. All inserts share one transaction: an error anywhere before
/// the final commit drops it and nothing from this run is stored.
///
/// `target` is assumed to be in 1..=5 already.
pub fn run(
    target: u8,
    records: impl IntoIterator<Item = BookRecord>,
    conn: &Connection,
    mut out: impl Write,
) -> Result<usize> {
    db::init_schema(conn).context("Failed to ensure book schema")?;

    let tx = conn.unchecked_transaction()?;
    let mut seen = 0usize;
    let mut inserted = 0usize;
    {
        let mut stmt = tx.prepare(db::INSERT_BOOK)?;
        for record in records {
            seen += 1;
            if record.rating != Some(target) {
                continue;
            }
            let price = parse_price(record.raw_price.as_deref());
            writeln!(
                out,
                "[{}★] {} - {}",
                target,
                record.title,
                record.raw_price.as_deref().unwrap_or("n/a")
            )?;
            debug!(title = %record.title, ?price, "Inserting book");
            stmt.execute(rusqlite::params![record.title, price, target])
                .with_context(|| format!("Failed to insert {:?}", record.title))?;
            inserted += 1;
        }
    }
    tx.commit().context("Failed to commit inserted books")?;

    info!("Inserted {} of {} books (rating {})", inserted, seen, target);
    Ok(inserted)
}
