use crate::error::{LedgerError, Result};
use crate::models::transaction::Transaction;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Net total per category, in order of each category's first appearance.
/// Fails if a running total leaves the range of `Decimal`.
pub fn summarize(transactions: &[Transaction]) -> Result<Vec<CategoryTotal>> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions {
        let idx = *index.entry(transaction.category.as_str()).or_insert_with(|| {
            totals.push(CategoryTotal {
                category: transaction.category.clone(),
                total: Decimal::ZERO,
            });
            totals.len() - 1
        });
        let entry = &mut totals[idx];
        entry.total = entry
            .total
            .checked_add(transaction.signed_amount())
            .ok_or_else(|| LedgerError::TotalOverflow(entry.category.clone()))?;
    }

    Ok(totals)
}

pub fn format_total(total: Decimal) -> String {
    let rounded = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Avoid printing "$-0.00" for categories that net out.
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("${:.2}", rounded)
}

pub fn format_line(total: &CategoryTotal) -> String {
    format!("{}: {}", total.category, format_total(total.total))
}

/// Writes the summary to `out` and overwrites `report_path` with the same
/// category lines.
pub fn generate_report(transactions: &[Transaction], report_path: &Path, out: &mut dyn Write) -> Result<Vec<CategoryTotal>> {
    let totals = summarize(transactions)?;

    writeln!(out, "\nMonthly Summary:")?;
    let mut contents = String::new();
    for total in &totals {
        let line = format_line(total);
        writeln!(out, "{}", line)?;
        contents.push_str(&line);
        contents.push('\n');
    }

    fs::write(report_path, contents)?;
    tracing::info!("Report with {} categories written to {}", totals.len(), report_path.display());

    Ok(totals)
}
