use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Numbered menu on stdin/stdout
    Console,
    /// Full-screen form with text fields and buttons
    Form,
}

#[derive(Debug, Parser)]
#[command(name = "fintrack", version, about = "Personal finance tracker")]
pub struct Cli {
    /// Front end to run
    #[arg(long, value_enum, default_value_t = Mode::Console)]
    pub mode: Mode,

    /// JSON snapshot of all transactions
    #[arg(long, default_value = "finance_data.json")]
    pub data_file: PathBuf,

    /// SQLite database mirroring every transaction
    #[arg(long, default_value = "finance_data.db")]
    pub db_file: PathBuf,

    /// Plain-text category summary
    #[arg(long, default_value = "finance_report.txt")]
    pub report_file: PathBuf,

    /// Audit log, appended to
    #[arg(long, default_value = "finance.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LedgerPaths {
    pub snapshot: PathBuf,
    pub database: PathBuf,
    pub report: PathBuf,
    pub log: PathBuf,
}

impl Cli {
    pub fn paths(&self) -> LedgerPaths {
        LedgerPaths {
            snapshot: self.data_file.clone(),
            database: self.db_file.clone(),
            report: self.report_file.clone(),
            log: self.log_file.clone(),
        }
    }
}
