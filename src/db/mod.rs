pub mod connection;
pub mod repository;
pub mod snapshot;
