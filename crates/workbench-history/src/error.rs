//! History error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Storage error: {0}")]
    Storage(#[from] workbench_storage::StorageError),
}
