//! Workbench Storage Layer
//!
//! SQLite-based persistence for main-process state that must survive a
//! restart (currently the recently-opened history).

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
