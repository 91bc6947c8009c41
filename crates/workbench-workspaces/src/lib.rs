//! Workbench Workspaces
//!
//! - Windows are registered by numeric id and carry an optional
//!   configuration describing what they have open
//! - A workspace is identified by the hash of its config file path
//! - Untitled workspaces live under a dedicated home folder and are
//!   deleted once a window leaves them

mod error;
mod identifier;
mod lifecycle;
mod windows;

pub use error::WorkspacesError;
pub use identifier::{
    has_workspace_extension, workspace_id_for, EnterWorkspaceResult, WorkspaceFolderCreationData,
    WorkspaceIdentifier, UNTITLED_WORKSPACE_FILE, WORKSPACE_EXTENSION,
};
pub use lifecycle::{WorkspacesMainService, WorkspacesManagement};
pub use windows::{
    AppWindow, PathToOpen, WindowConfiguration, WindowId, WindowRegistry, WindowsMainService,
};

pub type Result<T> = std::result::Result<T, WorkspacesError>;
