use crate::error::LedgerError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(LedgerError::InvalidTransactionType(s.to_string())),
        }
    }
}

/// One entry of the JSON snapshot. The amount is always a magnitude; the
/// direction lives in `transaction_type`. It is written as a JSON number
/// carrying every digit of the decimal, so reloading never goes through f64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub category: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: Decimal, category: String, transaction_type: TransactionType) -> Self {
        Self {
            date,
            amount,
            category,
            transaction_type,
        }
    }

    /// Amount with the sign implied by the transaction type.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// A row read back from the `transactions` table.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub id: i64,
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub transaction_type: TransactionType,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(transaction_type: TransactionType) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 11, 9).expect("Invalid date"),
            Decimal::new(10050, 2),
            "Food".to_string(),
            transaction_type,
        )
    }

    #[test]
    fn test_signed_amount_follows_type() {
        assert_eq!(sample(TransactionType::Income).signed_amount(), Decimal::new(10050, 2));
        assert_eq!(sample(TransactionType::Expense).signed_amount(), Decimal::new(-10050, 2));
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!(" Expense ".parse::<TransactionType>().unwrap(), TransactionType::Expense);

        let err = "refund".parse::<TransactionType>().unwrap_err();
        assert!(matches!(err, LedgerError::InvalidTransactionType(ref s) if s == "refund"));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = serde_json::to_value(sample(TransactionType::Expense)).unwrap();
        assert_eq!(json["date"], "2025-11-09");
        assert_eq!(json["amount"], 100.5);
        assert_eq!(json["category"], "Food");
        assert_eq!(json["type"], "expense");

        let raw = serde_json::to_string(&sample(TransactionType::Income)).unwrap();
        assert!(raw.contains("\"amount\":100.50"));
    }

    #[test]
    fn test_amount_survives_json_exactly() {
        for text in ["79228162514264337593543950335", "12345678901234567.89", "0.1"] {
            let mut tx = sample(TransactionType::Income);
            tx.amount = text.parse().unwrap();

            let raw = serde_json::to_string_pretty(&tx).unwrap();
            let back: Transaction = serde_json::from_str(&raw).unwrap();
            assert_eq!(back.amount.to_string(), text);
        }
    }

    #[test]
    fn test_reads_snapshot_written_with_integer_amount() {
        let raw = r#"{"date": "2024-03-01", "amount": 100, "category": "Salary", "type": "income"}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.amount, Decimal::new(100, 0));
        assert_eq!(tx.transaction_type, TransactionType::Income);
    }
}
