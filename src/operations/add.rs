use crate::error::{LedgerError, Result};
use crate::models::transaction::{Transaction, TransactionType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses user-supplied amount text into a non-negative decimal.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();

    // Plain decimals first, then things like "1e3".
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| LedgerError::InvalidAmount(input.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::InvalidAmount(input.to_string()));
    }

    Ok(amount.abs())
}

pub fn create_transaction(
    date: NaiveDate,
    amount: &str,
    category: &str,
    transaction_type: TransactionType,
) -> Result<Transaction> {
    let amount = parse_amount(amount)?;

    Ok(Transaction::new(date, amount, category.to_string(), transaction_type))
}
