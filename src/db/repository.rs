use crate::error::{LedgerError, Result};
use crate::models::transaction::{HistoryRecord, Transaction, TransactionType};
use rust_decimal::prelude::ToPrimitive;
use rusqlite::Connection;
use rusqlite::types::Type;

/// Inserts one row and returns the id SQLite assigned to it.
pub fn add_transaction(conn: &Connection, transaction: &Transaction) -> Result<i64> {
    let amount = transaction
        .amount
        .to_f64()
        .ok_or_else(|| LedgerError::InvalidAmount(transaction.amount.to_string()))?;

    conn.execute(
        "INSERT INTO transactions (date, amount, category, type) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            transaction.date.format("%Y-%m-%d").to_string(),
            amount,
            &transaction.category,
            transaction.transaction_type.as_str(),
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn get_all_transactions(conn: &Connection) -> Result<Vec<HistoryRecord>> {
    let mut stmt = conn.prepare("SELECT id, date, amount, category, type FROM transactions ORDER BY id ASC")?;

    let record_iter = stmt.query_map([], |row| {
        let type_str: String = row.get(4)?;
        let transaction_type = type_str
            .parse::<TransactionType>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

        Ok(HistoryRecord {
            id: row.get(0)?,
            date: row.get(1)?,
            amount: row.get(2)?,
            category: row.get(3)?,
            transaction_type,
        })
    })?;

    let mut records = Vec::new();
    for record in record_iter {
        records.push(record?);
    }

    Ok(records)
}

pub fn count_transactions(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn create_test_transaction(category: &str, transaction_type: TransactionType) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            Decimal::new(10000, 2),
            category.to_string(),
            transaction_type,
        )
    }

    #[test]
    fn test_add_transaction_assigns_increasing_ids() {
        let conn = establish_test_connection().unwrap();

        let first = add_transaction(&conn, &create_test_transaction("Salary", TransactionType::Income)).unwrap();
        let second = add_transaction(&conn, &create_test_transaction("Food", TransactionType::Expense)).unwrap();

        assert!(second > first);
    }

    #[test]
    fn test_get_all_transactions_empty() {
        let conn = establish_test_connection().unwrap();

        let result = get_all_transactions(&conn);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 0);
    }

    #[test]
    fn test_get_all_transactions_in_insertion_order() {
        let conn = establish_test_connection().unwrap();

        add_transaction(&conn, &create_test_transaction("Salary", TransactionType::Income)).unwrap();
        add_transaction(&conn, &create_test_transaction("Food", TransactionType::Expense)).unwrap();
        add_transaction(&conn, &create_test_transaction("Rent", TransactionType::Expense)).unwrap();

        let records = get_all_transactions(&conn).unwrap();
        let categories: Vec<&str> = records.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, ["Salary", "Food", "Rent"]);

        assert_eq!(records[0].date, "2025-01-15");
        assert_eq!(records[0].amount, 100.0);
        assert_eq!(records[0].transaction_type, TransactionType::Income);
        assert_eq!(records[1].transaction_type, TransactionType::Expense);
    }

    #[test]
    fn test_get_all_transactions_rejects_unknown_type() {
        let conn = establish_test_connection().unwrap();
        conn.execute(
            "INSERT INTO transactions (date, amount, category, type) VALUES ('2025-01-15', 5.0, 'Misc', 'refund')",
            [],
        )
        .unwrap();

        let result = get_all_transactions(&conn);
        assert!(matches!(result, Err(LedgerError::Database(_))));
    }

    #[test]
    fn test_add_transaction_stores_large_amount() {
        let conn = establish_test_connection().unwrap();
        let mut tx = create_test_transaction("Big", TransactionType::Income);
        tx.amount = Decimal::MAX;

        add_transaction(&conn, &tx).unwrap();

        let records = get_all_transactions(&conn).unwrap();
        assert!(records[0].amount > 7.9e28);
    }

    #[test]
    fn test_count_transactions() {
        let conn = establish_test_connection().unwrap();
        assert_eq!(count_transactions(&conn).unwrap(), 0);

        add_transaction(&conn, &create_test_transaction("Salary", TransactionType::Income)).unwrap();
        add_transaction(&conn, &create_test_transaction("Food", TransactionType::Expense)).unwrap();

        assert_eq!(count_transactions(&conn).unwrap(), 2);
    }
}
