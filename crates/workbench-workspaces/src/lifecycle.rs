//! Workspace lifecycle
//!
//! Creates and deletes untitled workspaces, resolves workspace
//! identifiers and moves windows into workspaces.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

use crate::error::WorkspacesError;
use crate::identifier::{
    has_workspace_extension, EnterWorkspaceResult, WorkspaceFolderCreationData,
    WorkspaceIdentifier, UNTITLED_WORKSPACE_FILE,
};
use crate::windows::AppWindow;
use crate::Result;

#[async_trait]
pub trait WorkspacesManagement: Send + Sync {
    /// Move `window` into the workspace at `path`.
    ///
    /// Returns `None` when the window cannot enter it (not ready yet, or
    /// the workspace is already open in another window).
    async fn enter_workspace(
        &self,
        window: Arc<AppWindow>,
        windows: Vec<Arc<AppWindow>>,
        path: Url,
    ) -> Result<Option<EnterWorkspaceResult>>;

    async fn create_untitled_workspace(
        &self,
        folders: Option<Vec<WorkspaceFolderCreationData>>,
        remote_authority: Option<String>,
    ) -> Result<WorkspaceIdentifier>;

    async fn delete_untitled_workspace(&self, workspace: WorkspaceIdentifier) -> Result<()>;

    async fn get_workspace_identifier(&self, path: Url) -> Result<WorkspaceIdentifier>;
}

/// On-disk format of a workspace config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWorkspace {
    folders: Vec<StoredWorkspaceFolder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remote_authority: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredWorkspaceFolder {
    uri: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl From<WorkspaceFolderCreationData> for StoredWorkspaceFolder {
    fn from(folder: WorkspaceFolderCreationData) -> Self {
        Self {
            uri: folder.uri,
            name: folder.name,
        }
    }
}

pub struct WorkspacesMainService {
    /// Parent folder of every untitled workspace
    untitled_home: PathBuf,
    /// Per-workspace backups live in `<backups_home>/<workspace id>`
    backups_home: PathBuf,
    /// Held from the "opened elsewhere" check until the window config is updated
    enter_lock: Mutex<()>,
}

impl WorkspacesMainService {
    pub fn new(untitled_home: PathBuf, backups_home: PathBuf) -> Self {
        Self {
            untitled_home,
            backups_home,
            enter_lock: Mutex::new(()),
        }
    }

    pub fn untitled_home(&self) -> &Path {
        &self.untitled_home
    }

    pub fn is_untitled_workspace(&self, workspace: &WorkspaceIdentifier) -> bool {
        self.untitled_folder_of(workspace).is_some()
    }

    /// The `<untitled_home>/<folder>` that holds `workspace`, if it has the
    /// exact untitled layout. Anything else is not ours to delete.
    fn untitled_folder_of(&self, workspace: &WorkspaceIdentifier) -> Option<PathBuf> {
        let config_file = workspace.config_path.to_file_path().ok()?;
        if config_file.file_name()? != UNTITLED_WORKSPACE_FILE {
            return None;
        }

        let folder = config_file.parent()?;
        if folder.parent()? != self.untitled_home.as_path() {
            return None;
        }

        Some(folder.to_path_buf())
    }

    /// All untitled workspaces currently on disk
    pub async fn untitled_workspaces(&self) -> Result<Vec<WorkspaceIdentifier>> {
        let mut entries = match tokio::fs::read_dir(&self.untitled_home).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut workspaces = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let config_file = entry.path().join(UNTITLED_WORKSPACE_FILE);
            if !tokio::fs::try_exists(&config_file).await.unwrap_or(false) {
                continue;
            }

            if let Ok(config_path) = Url::from_file_path(&config_file) {
                workspaces.push(WorkspaceIdentifier::from_config_path(config_path));
            }
        }

        Ok(workspaces)
    }

    fn backup_path_for(&self, workspace: &WorkspaceIdentifier) -> PathBuf {
        self.backups_home.join(&workspace.id)
    }
}

#[async_trait]
impl WorkspacesManagement for WorkspacesMainService {
    async fn enter_workspace(
        &self,
        window: Arc<AppWindow>,
        windows: Vec<Arc<AppWindow>>,
        path: Url,
    ) -> Result<Option<EnterWorkspaceResult>> {
        if !window.is_ready() {
            tracing::debug!(window_id = window.id(), "Window not ready, not entering workspace");
            return Ok(None);
        }

        if path.scheme() != "file" || !has_workspace_extension(&path) {
            return Err(WorkspacesError::InvalidWorkspacePath(path.to_string()));
        }

        let workspace = WorkspaceIdentifier::from_config_path(path);

        let left_untitled = {
            let _guard = self.enter_lock.lock();

            let opened_elsewhere = windows.iter().find(|other| {
                other.id() != window.id()
                    && other
                        .workspace()
                        .map(|w| w.id == workspace.id)
                        .unwrap_or(false)
            });
            if let Some(other) = opened_elsewhere {
                tracing::warn!(
                    window_id = window.id(),
                    other_window_id = other.id(),
                    workspace_id = %workspace.id,
                    "Workspace is already opened in another window"
                );
                return Ok(None);
            }

            let previous = window.workspace();
            let same_workspace = previous
                .as_ref()
                .map(|p| p.id == workspace.id)
                .unwrap_or(false);

            if same_workspace {
                None
            } else {
                window.update_config(|config| {
                    config.workspace = Some(workspace.clone());
                    config.folder_uri = None;
                });
                previous.filter(|p| self.is_untitled_workspace(p))
            }
        };

        // Leaving an untitled workspace discards it
        if let Some(previous) = left_untitled {
            if let Err(e) = self.delete_untitled_workspace(previous).await {
                tracing::warn!("Failed to delete previous untitled workspace: {}", e);
            }
        }

        window.focus();

        tracing::info!(
            window_id = window.id(),
            workspace_id = %workspace.id,
            "Entered workspace"
        );

        let backup_path = Some(self.backup_path_for(&workspace));
        Ok(Some(EnterWorkspaceResult {
            workspace,
            backup_path,
        }))
    }

    async fn create_untitled_workspace(
        &self,
        folders: Option<Vec<WorkspaceFolderCreationData>>,
        remote_authority: Option<String>,
    ) -> Result<WorkspaceIdentifier> {
        let folder = self.untitled_home.join(Uuid::new_v4().simple().to_string());
        let config_file = folder.join(UNTITLED_WORKSPACE_FILE);

        let config_path = Url::from_file_path(&config_file).map_err(|_| {
            WorkspacesError::InvalidWorkspacePath(config_file.display().to_string())
        })?;

        let stored = StoredWorkspace {
            folders: folders
                .unwrap_or_default()
                .into_iter()
                .map(StoredWorkspaceFolder::from)
                .collect(),
            remote_authority,
        };
        let contents = serde_json::to_string_pretty(&stored)?;

        tokio::fs::create_dir_all(&folder).await?;
        tokio::fs::write(&config_file, contents).await?;

        let workspace = WorkspaceIdentifier::from_config_path(config_path);

        tracing::info!(
            workspace_id = %workspace.id,
            folder_count = stored.folders.len(),
            "Created untitled workspace"
        );

        Ok(workspace)
    }

    async fn delete_untitled_workspace(&self, workspace: WorkspaceIdentifier) -> Result<()> {
        let Some(folder) = self.untitled_folder_of(&workspace) else {
            tracing::debug!(workspace_id = %workspace.id, "Not an untitled workspace, skipping delete");
            return Ok(());
        };

        match tokio::fs::remove_dir_all(&folder).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        tracing::info!(workspace_id = %workspace.id, "Deleted untitled workspace");

        Ok(())
    }

    async fn get_workspace_identifier(&self, path: Url) -> Result<WorkspaceIdentifier> {
        Ok(WorkspaceIdentifier::from_config_path(path))
    }
}
