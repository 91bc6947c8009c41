//! Workbench Recently Opened History
//!
//! - Workspaces and folders share one list, files have their own
//! - Most recently opened entries come first
//! - Untitled workspaces are never remembered
//! - Every change is published to subscribers with the new list

mod error;
mod history;
mod recent;

pub use error::HistoryError;
pub use history::{HistoryMainService, HistoryOptions, WorkspacesHistory};
pub use recent::{Recent, RecentlyOpened};

pub type Result<T> = std::result::Result<T, HistoryError>;
