//! Workbench Core
//!
//! Main-process coordination layer. Owns the window registry, the
//! workspace lifecycle and history services, and the window-scoped API
//! that the IPC layer exposes to every window.

mod config;
mod error;
mod service;
mod workbench;

pub use config::Config;
pub use error::CoreError;
pub use service::{WindowWorkspacesApi, WorkspacesService};
pub use workbench::Workbench;

// Re-export core components
pub use workbench_history::{
    HistoryError, HistoryMainService, HistoryOptions, Recent, RecentlyOpened, WorkspacesHistory,
};
pub use workbench_storage::{Database, StorageError};
pub use workbench_workspaces::{
    AppWindow, EnterWorkspaceResult, PathToOpen, WindowConfiguration, WindowId, WindowRegistry,
    WindowsMainService, WorkspaceFolderCreationData, WorkspaceIdentifier, WorkspacesError,
    WorkspacesMainService, WorkspacesManagement,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
