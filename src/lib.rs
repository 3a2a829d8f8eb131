//! Personal finance ledger: records income and expenses, mirrors them to a
//! JSON snapshot and a SQLite table, and reports per-category totals.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod operations;
pub mod ui;
