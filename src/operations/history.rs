use crate::db::repository;
use crate::error::Result;
use crate::models::transaction::HistoryRecord;
use rusqlite::Connection;
use std::io::Write;

pub fn format_record(record: &HistoryRecord) -> String {
    format!(
        "ID: {}, Date: {}, Amount: {:.2}, Category: {}, Type: {}",
        record.id, record.date, record.amount, record.category, record.transaction_type
    )
}

/// Renders every stored row, oldest first. Returns the number of rows shown.
pub fn view_history(conn: &Connection, out: &mut dyn Write) -> Result<usize> {
    let records = repository::get_all_transactions(conn)?;

    writeln!(out, "\nTransaction History:")?;
    for record in &records {
        writeln!(out, "{}", format_record(record))?;
    }

    Ok(records.len())
}
