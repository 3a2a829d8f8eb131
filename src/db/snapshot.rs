use crate::error::Result;
use crate::models::transaction::Transaction;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Reads the JSON snapshot. A missing file is an empty ledger, any other
/// failure is returned to the caller.
pub fn load_snapshot(path: &Path) -> Result<Vec<Transaction>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No snapshot at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let transactions: Vec<Transaction> = serde_json::from_str(&contents)?;
    Ok(transactions)
}

/// Overwrites the snapshot with the full sequence.
pub fn save_snapshot(path: &Path, transactions: &[Transaction]) -> Result<()> {
    let json = serde_json::to_string_pretty(transactions)?;
    fs::write(path, json)?;
    Ok(())
}
