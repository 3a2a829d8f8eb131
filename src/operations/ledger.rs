use crate::config::LedgerPaths;
use crate::db::{connection, repository, snapshot};
use crate::error::Result;
use crate::models::transaction::{Transaction, TransactionType};
use crate::operations::add::create_transaction;
use crate::operations::history;
use crate::operations::report::{self, CategoryTotal, format_total};
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// What a front end needs from the ledger. Both the console loop and the
/// form are written against this trait only.
pub trait FinanceCore {
    fn add_transaction(&mut self, amount: &str, category: &str, transaction_type: TransactionType) -> Result<Transaction>;

    fn generate_report(&self, out: &mut dyn Write) -> Result<Vec<CategoryTotal>>;

    fn view_history(&self, out: &mut dyn Write) -> Result<usize>;

    /// Location of the report file, for user-facing messages.
    fn report_path(&self) -> PathBuf;

    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Owns the in-memory sequence and both persistence targets.
///
/// Every add writes the JSON snapshot first and then inserts the SQLite row.
/// The two writes are not atomic together: if the insert fails, the
/// snapshot already contains the record while the table does not. The
/// snapshot is what the ledger is reloaded from; the table only feeds the
/// history view.
pub struct Ledger {
    transactions: Vec<Transaction>,
    conn: Connection,
    snapshot_path: PathBuf,
    report_path: PathBuf,
}

impl Ledger {
    pub fn open(paths: &LedgerPaths) -> Result<Self> {
        let conn = connection::establish_connection(&paths.database)?;
        Self::initialize(conn, paths)
    }

    /// Ensures the schema exists on `conn` and loads the snapshot.
    pub fn initialize(conn: Connection, paths: &LedgerPaths) -> Result<Self> {
        connection::create_schema(&conn)?;
        let transactions = snapshot::load_snapshot(&paths.snapshot)?;
        let rows = repository::count_transactions(&conn)?;
        debug!(
            "Loaded {} transactions from {}; table holds {} rows",
            transactions.len(),
            paths.snapshot.display(),
            rows
        );

        Ok(Self {
            transactions,
            conn,
            snapshot_path: paths.snapshot.clone(),
            report_path: paths.report.clone(),
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    fn record(&mut self, date: NaiveDate, amount: &str, category: &str, transaction_type: TransactionType) -> Result<Transaction> {
        let transaction = create_transaction(date, amount, category, transaction_type)?;

        self.transactions.push(transaction.clone());
        if let Err(e) = snapshot::save_snapshot(&self.snapshot_path, &self.transactions) {
            self.transactions.pop();
            return Err(e);
        }
        repository::add_transaction(&self.conn, &transaction)?;

        info!(
            "Added {} - {}: {}",
            transaction.transaction_type,
            transaction.category,
            format_total(transaction.amount)
        );
        Ok(transaction)
    }
}

impl FinanceCore for Ledger {
    fn add_transaction(&mut self, amount: &str, category: &str, transaction_type: TransactionType) -> Result<Transaction> {
        let today = Local::now().date_naive();
        self.record(today, amount, category, transaction_type)
    }

    fn generate_report(&self, out: &mut dyn Write) -> Result<Vec<CategoryTotal>> {
        report::generate_report(&self.transactions, &self.report_path, out)
    }

    fn view_history(&self, out: &mut dyn Write) -> Result<usize> {
        history::view_history(&self.conn, out)
    }

    fn report_path(&self) -> PathBuf {
        self.report_path.clone()
    }

    fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        debug!("Database connection closed");
        Ok(())
    }
}
