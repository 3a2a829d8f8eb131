use crate::error::{LedgerError, Result};
use crate::models::transaction::TransactionType;
use crate::operations::ledger::FinanceCore;
use std::io::{BufRead, Write};

pub enum MenuChoice {
    AddIncome,
    AddExpense,
    ViewReport,
    ViewHistory,
    Exit,
    Invalid,
}

fn check_for_choice(input: &str) -> MenuChoice {
    match input {
        "1" => MenuChoice::AddIncome,
        "2" => MenuChoice::AddExpense,
        "3" => MenuChoice::ViewReport,
        "4" => MenuChoice::ViewHistory,
        "5" => MenuChoice::Exit,
        _ => MenuChoice::Invalid,
    }
}

/// Reads one trimmed line, `None` once input is exhausted.
fn read_user_input<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<Option<String>> {
    write!(output, "{}", message)?;
    output.flush()?;
    read_user_input(input)
}

/// Runs the numbered menu until the user picks Exit or input ends, then
/// closes the core.
pub fn run_console<C, R, W>(mut core: C, mut input: R, output: &mut W) -> Result<()>
where
    C: FinanceCore,
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(output, "\n1. Add Income\n2. Add Expense\n3. View Report\n4. View History\n5. Exit")?;
        let Some(choice) = prompt(&mut input, output, "Choose an option: ")? else {
            break;
        };

        match check_for_choice(&choice) {
            MenuChoice::AddIncome => {
                if !add_from_input(&mut core, &mut input, output, TransactionType::Income)? {
                    break;
                }
            }
            MenuChoice::AddExpense => {
                if !add_from_input(&mut core, &mut input, output, TransactionType::Expense)? {
                    break;
                }
            }
            MenuChoice::ViewReport => match core.generate_report(output) {
                Ok(_) => writeln!(output, "Report saved to {}", core.report_path().display())?,
                Err(e) => writeln!(output, "Error generating report: {}", e)?,
            },
            MenuChoice::ViewHistory => {
                if let Err(e) = core.view_history(output) {
                    writeln!(output, "Error reading history: {}", e)?;
                }
            }
            MenuChoice::Exit => break,
            MenuChoice::Invalid => writeln!(output, "Invalid choice. Please try again.")?,
        }
    }

    core.close()?;
    writeln!(output, "Exiting application.")?;
    Ok(())
}

/// Prompts for amount and category and records them. Returns `false` when
/// input ran out mid-prompt.
fn add_from_input<C, R, W>(core: &mut C, input: &mut R, output: &mut W, transaction_type: TransactionType) -> Result<bool>
where
    C: FinanceCore,
    R: BufRead,
    W: Write,
{
    let Some(amount) = prompt(input, output, &format!("Enter {} amount: ", transaction_type))? else {
        return Ok(false);
    };
    let Some(category) = prompt(input, output, &format!("Enter {} category: ", transaction_type))? else {
        return Ok(false);
    };

    if category.is_empty() {
        writeln!(output, "Error: {}", LedgerError::EmptyCategory)?;
        return Ok(true);
    }

    match core.add_transaction(&amount, &category, transaction_type) {
        Ok(_) => writeln!(output, "{} added successfully!", capitalize(transaction_type.as_str()))?,
        Err(e) => writeln!(output, "Error: {}", e)?,
    }
    Ok(true)
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::transaction::Transaction;
    use crate::operations::add::create_transaction;
    use crate::operations::report::CategoryTotal;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::rc::Rc;

    /// Records every call so adapter tests can assert on them.
    #[derive(Default, Clone)]
    pub struct FakeCore {
        pub calls: Rc<RefCell<Vec<String>>>,
    }

    impl FinanceCore for FakeCore {
        fn add_transaction(&mut self, amount: &str, category: &str, transaction_type: TransactionType) -> Result<Transaction> {
            let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            let tx = create_transaction(date, amount, category, transaction_type)?;
            self.calls
                .borrow_mut()
                .push(format!("add {} {} {}", transaction_type, category, tx.amount));
            Ok(tx)
        }

        fn generate_report(&self, out: &mut dyn Write) -> Result<Vec<CategoryTotal>> {
            self.calls.borrow_mut().push("report".to_string());
            writeln!(out, "Salary: $100.00")?;
            Ok(Vec::new())
        }

        fn view_history(&self, out: &mut dyn Write) -> Result<usize> {
            self.calls.borrow_mut().push("history".to_string());
            writeln!(out, "ID: 1, Date: 2025-01-01, Amount: 100.00, Category: Salary, Type: income")?;
            Ok(1)
        }

        fn report_path(&self) -> PathBuf {
            PathBuf::from("finance_report.txt")
        }

        fn close(self) -> Result<()> {
            self.calls.borrow_mut().push("close".to_string());
            Ok(())
        }
    }

    fn run(script: &str) -> (Vec<String>, String) {
        let core = FakeCore::default();
        let calls = core.calls.clone();
        let mut output = Vec::<u8>::new();

        run_console(core, Cursor::new(script.to_string()), &mut output).unwrap();

        let calls = calls.borrow().clone();
        (calls, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_add_income_and_expense() {
        let (calls, output) = run("1\n100\nSalary\n2\n50\nFood\n5\n");

        assert_eq!(calls, ["add income Salary 100", "add expense Food 50", "close"]);
        assert!(output.contains("Income added successfully!"));
        assert!(output.contains("Expense added successfully!"));
        assert!(output.ends_with("Exiting application.\n"));
    }

    #[test]
    fn test_invalid_amount_reports_error_and_continues() {
        let (calls, output) = run("1\nabc\nSalary\n5\n");

        assert_eq!(calls, ["close"]);
        assert!(output.contains("Error: Invalid amount 'abc'"));
    }

    #[test]
    fn test_empty_category_is_rejected() {
        let (calls, output) = run("2\n10\n\n5\n");

        assert_eq!(calls, ["close"]);
        assert!(output.contains("Error: Category cannot be empty"));
    }

    #[test]
    fn test_report_and_history() {
        let (calls, output) = run("3\n4\n5\n");

        assert_eq!(calls, ["report", "history", "close"]);
        assert!(output.contains("Salary: $100.00"));
        assert!(output.contains("Report saved to finance_report.txt"));
        assert!(output.contains("ID: 1, Date: 2025-01-01"));
    }

    #[test]
    fn test_invalid_choice() {
        let (_, output) = run("9\n5\n");
        assert!(output.contains("Invalid choice. Please try again."));
    }

    #[test]
    fn test_end_of_input_closes_core() {
        let (calls, output) = run("1\n100\n");

        assert_eq!(calls, ["close"]);
        assert!(output.ends_with("Exiting application.\n"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("income"), "Income");
        assert_eq!(capitalize(""), "");
    }
}
