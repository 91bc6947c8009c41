//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] workbench_storage::StorageError),

    #[error("Workspace error: {0}")]
    Workspaces(#[from] workbench_workspaces::WorkspacesError),

    #[error("History error: {0}")]
    History(#[from] workbench_history::HistoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
