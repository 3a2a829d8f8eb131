pub mod add;
pub mod calculator;
pub mod history;
pub mod ledger;
pub mod report;
