pub mod console;
pub mod form;
