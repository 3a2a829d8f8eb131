use anyhow::Context;
use clap::Parser;
use finance_tracker::config::{Cli, Mode};
use finance_tracker::operations::ledger::Ledger;
use finance_tracker::{logging, ui};
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let paths = cli.paths();

    logging::init_audit_log(&paths.log)
        .with_context(|| format!("Failed to open log file {}", paths.log.display()))?;

    let ledger = Ledger::open(&paths).context("Failed to open the ledger")?;
    tracing::info!("Starting in {:?} mode", cli.mode);

    match cli.mode {
        Mode::Console => {
            println!("Welcome to the personal finance tracker!");
            let stdin = io::stdin();
            ui::console::run_console(ledger, stdin.lock(), &mut io::stdout())?;
        }
        Mode::Form => ui::form::run_form(ledger)?,
    }

    Ok(())
}
