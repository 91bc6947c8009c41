//! Window registration commands
use tauri::{AppHandle, Manager, Runtime};

use workbench_core::{WindowConfiguration, WindowId, WindowRegistry};

use super::CommandResult;
use crate::state::WorkbenchState;

/// Register a newly created window and hand back its id
#[tauri::command]
pub fn register_window<R: Runtime>(
    app: AppHandle<R>,
    config: Option<WindowConfiguration>,
) -> CommandResult<WindowId> {
    let state = app.state::<WorkbenchState>();
    let window = state.workbench().windows().open_window(config);
    CommandResult::ok(window.id())
}

/// Called by the frontend once it has finished loading
#[tauri::command]
pub fn window_ready<R: Runtime>(app: AppHandle<R>, window_id: WindowId) -> CommandResult<bool> {
    let state = app.state::<WorkbenchState>();
    match state.workbench().windows().get_window_by_id(window_id) {
        Some(window) => {
            window.mark_ready();
            tracing::info!(window_id, "Window ready");
            CommandResult::ok(true)
        }
        None => CommandResult::ok(false),
    }
}

#[tauri::command]
pub fn close_window<R: Runtime>(app: AppHandle<R>, window_id: WindowId) -> CommandResult<bool> {
    let state = app.state::<WorkbenchState>();
    CommandResult::ok(state.workbench().windows().close_window(window_id))
}
