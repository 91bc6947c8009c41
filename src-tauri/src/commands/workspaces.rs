//! Workspace and history commands
//!
//! Thin forwards into `WindowWorkspacesApi`; the window id is passed
//! through as the first argument of every call.
use std::sync::Arc;
use tauri::{AppHandle, Manager, Runtime};
use url::Url;

use workbench_core::{
    EnterWorkspaceResult, Recent, RecentlyOpened, WindowId, WindowWorkspacesApi,
    WorkspaceFolderCreationData, WorkspaceIdentifier, WorkspacesService,
};

use super::CommandResult;
use crate::state::WorkbenchState;

fn api<R: Runtime>(app: &AppHandle<R>) -> Arc<WorkspacesService> {
    app.state::<WorkbenchState>().workspaces_service()
}

#[tauri::command]
pub async fn enter_workspace<R: Runtime>(
    app: AppHandle<R>,
    window_id: WindowId,
    path: Url,
) -> CommandResult<Option<EnterWorkspaceResult>> {
    api(&app).enter_workspace(window_id, path).await.into()
}

#[tauri::command]
pub async fn create_untitled_workspace<R: Runtime>(
    app: AppHandle<R>,
    window_id: WindowId,
    folders: Option<Vec<WorkspaceFolderCreationData>>,
    remote_authority: Option<String>,
) -> CommandResult<WorkspaceIdentifier> {
    api(&app)
        .create_untitled_workspace(window_id, folders, remote_authority)
        .await
        .into()
}

#[tauri::command]
pub async fn delete_untitled_workspace<R: Runtime>(
    app: AppHandle<R>,
    window_id: WindowId,
    workspace: WorkspaceIdentifier,
) -> CommandResult<()> {
    api(&app)
        .delete_untitled_workspace(window_id, workspace)
        .await
        .into()
}

#[tauri::command]
pub async fn get_workspace_identifier<R: Runtime>(
    app: AppHandle<R>,
    window_id: WindowId,
    path: Url,
) -> CommandResult<WorkspaceIdentifier> {
    api(&app)
        .get_workspace_identifier(window_id, path)
        .await
        .into()
}

#[tauri::command]
pub async fn get_recently_opened<R: Runtime>(
    app: AppHandle<R>,
    window_id: WindowId,
) -> CommandResult<RecentlyOpened> {
    api(&app).get_recently_opened(window_id).await.into()
}

#[tauri::command]
pub async fn add_recently_opened<R: Runtime>(
    app: AppHandle<R>,
    window_id: WindowId,
    recents: Vec<Recent>,
) -> CommandResult<()> {
    api(&app).add_recently_opened(window_id, recents).await.into()
}

#[tauri::command]
pub async fn remove_from_recently_opened<R: Runtime>(
    app: AppHandle<R>,
    window_id: WindowId,
    paths: Vec<Url>,
) -> CommandResult<()> {
    api(&app)
        .remove_from_recently_opened(window_id, paths)
        .await
        .into()
}

#[tauri::command]
pub async fn clear_recently_opened<R: Runtime>(
    app: AppHandle<R>,
    window_id: WindowId,
) -> CommandResult<()> {
    api(&app).clear_recently_opened(window_id).await.into()
}
