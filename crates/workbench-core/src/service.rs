//! Window-scoped workspaces API
//!
//! Every call names the window it comes from. The window id is resolved
//! where the operation depends on window state and ignored otherwise;
//! all work is forwarded to the lifecycle and history services and
//! their results come back untouched.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;
use url::Url;

use workbench_history::{Recent, RecentlyOpened, WorkspacesHistory};
use workbench_workspaces::{
    EnterWorkspaceResult, WindowId, WindowRegistry, WorkspaceFolderCreationData,
    WorkspaceIdentifier, WorkspacesManagement,
};

/// The workspaces API as seen from a window: each method takes the
/// calling window's id first.
#[async_trait]
pub trait WindowWorkspacesApi: Send + Sync {
    async fn enter_workspace(
        &self,
        window_id: WindowId,
        path: Url,
    ) -> workbench_workspaces::Result<Option<EnterWorkspaceResult>>;

    async fn create_untitled_workspace(
        &self,
        window_id: WindowId,
        folders: Option<Vec<WorkspaceFolderCreationData>>,
        remote_authority: Option<String>,
    ) -> workbench_workspaces::Result<WorkspaceIdentifier>;

    async fn delete_untitled_workspace(
        &self,
        window_id: WindowId,
        workspace: WorkspaceIdentifier,
    ) -> workbench_workspaces::Result<()>;

    async fn get_workspace_identifier(
        &self,
        window_id: WindowId,
        path: Url,
    ) -> workbench_workspaces::Result<WorkspaceIdentifier>;

    async fn get_recently_opened(
        &self,
        window_id: WindowId,
    ) -> workbench_history::Result<RecentlyOpened>;

    async fn add_recently_opened(
        &self,
        window_id: WindowId,
        recents: Vec<Recent>,
    ) -> workbench_history::Result<()>;

    async fn remove_from_recently_opened(
        &self,
        window_id: WindowId,
        paths: Vec<Url>,
    ) -> workbench_history::Result<()>;

    async fn clear_recently_opened(&self, window_id: WindowId) -> workbench_history::Result<()>;

    fn on_recently_opened_change(&self) -> broadcast::Receiver<RecentlyOpened>;
}

pub struct WorkspacesService {
    workspaces: Arc<dyn WorkspacesManagement>,
    windows: Arc<dyn WindowRegistry>,
    history: Arc<dyn WorkspacesHistory>,
}

impl WorkspacesService {
    pub fn new(
        workspaces: Arc<dyn WorkspacesManagement>,
        windows: Arc<dyn WindowRegistry>,
        history: Arc<dyn WorkspacesHistory>,
    ) -> Self {
        Self {
            workspaces,
            windows,
            history,
        }
    }
}

impl Clone for WorkspacesService {
    fn clone(&self) -> Self {
        Self {
            workspaces: Arc::clone(&self.workspaces),
            windows: Arc::clone(&self.windows),
            history: Arc::clone(&self.history),
        }
    }
}

#[async_trait]
impl WindowWorkspacesApi for WorkspacesService {
    async fn enter_workspace(
        &self,
        window_id: WindowId,
        path: Url,
    ) -> workbench_workspaces::Result<Option<EnterWorkspaceResult>> {
        let Some(window) = self.windows.get_window_by_id(window_id) else {
            tracing::debug!(window_id, "enter_workspace: no such window");
            return Ok(None);
        };

        tracing::debug!(window_id, path = %path, "enter_workspace");
        self.workspaces
            .enter_workspace(window, self.windows.get_windows(), path)
            .await
    }

    async fn create_untitled_workspace(
        &self,
        window_id: WindowId,
        folders: Option<Vec<WorkspaceFolderCreationData>>,
        remote_authority: Option<String>,
    ) -> workbench_workspaces::Result<WorkspaceIdentifier> {
        tracing::debug!(window_id, "create_untitled_workspace");
        self.workspaces
            .create_untitled_workspace(folders, remote_authority)
            .await
    }

    async fn delete_untitled_workspace(
        &self,
        window_id: WindowId,
        workspace: WorkspaceIdentifier,
    ) -> workbench_workspaces::Result<()> {
        tracing::debug!(window_id, workspace_id = %workspace.id, "delete_untitled_workspace");
        self.workspaces.delete_untitled_workspace(workspace).await
    }

    async fn get_workspace_identifier(
        &self,
        window_id: WindowId,
        path: Url,
    ) -> workbench_workspaces::Result<WorkspaceIdentifier> {
        tracing::debug!(window_id, path = %path, "get_workspace_identifier");
        self.workspaces.get_workspace_identifier(path).await
    }

    async fn get_recently_opened(
        &self,
        window_id: WindowId,
    ) -> workbench_history::Result<RecentlyOpened> {
        let config = self
            .windows
            .get_window_by_id(window_id)
            .and_then(|window| window.config());

        match config {
            Some(config) => {
                tracing::debug!(window_id, "get_recently_opened");
                self.history
                    .get_recently_opened_for(
                        config.workspace,
                        config.folder_uri,
                        config.files_to_open_or_create,
                    )
                    .await
            }
            None => {
                tracing::debug!(window_id, "get_recently_opened: no window config, using global");
                self.history.get_recently_opened().await
            }
        }
    }

    async fn add_recently_opened(
        &self,
        window_id: WindowId,
        recents: Vec<Recent>,
    ) -> workbench_history::Result<()> {
        tracing::debug!(window_id, count = recents.len(), "add_recently_opened");
        self.history.add_recently_opened(recents).await
    }

    async fn remove_from_recently_opened(
        &self,
        window_id: WindowId,
        paths: Vec<Url>,
    ) -> workbench_history::Result<()> {
        tracing::debug!(window_id, count = paths.len(), "remove_from_recently_opened");
        self.history.remove_from_recently_opened(paths).await
    }

    async fn clear_recently_opened(&self, window_id: WindowId) -> workbench_history::Result<()> {
        tracing::debug!(window_id, "clear_recently_opened");
        self.history.clear_recently_opened().await
    }

    fn on_recently_opened_change(&self) -> broadcast::Receiver<RecentlyOpened> {
        self.history.on_recently_opened_change()
    }
}
