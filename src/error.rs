use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid amount '{0}'. Must be a non-negative number.")]
    InvalidAmount(String),

    #[error("Category cannot be empty")]
    EmptyCategory,

    #[error("Invalid transaction type '{0}'. Use 'income' or 'expense'.")]
    InvalidTransactionType(String),

    #[error("Total for category '{0}' is too large to represent")]
    TotalOverflow(String),

    #[error("Cannot divide by zero.")]
    DivisionByZero,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
