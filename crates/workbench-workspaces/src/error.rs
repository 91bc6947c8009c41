//! Workspace error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkspacesError {
    #[error("Invalid workspace path: {0}")]
    InvalidWorkspacePath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
