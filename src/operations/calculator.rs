//! Stateless arithmetic on real numbers, independent of the ledger.

use crate::error::{LedgerError, Result};

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

pub fn divide(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(LedgerError::DivisionByZero);
    }
    Ok(a / b)
}
