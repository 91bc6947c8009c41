//! Workbench - Tauri IPC plugin
//!
//! Exposes the window-scoped workspaces API to every window. Each
//! command takes the calling window's id first; history changes are
//! pushed to the frontend as `recently-opened-changed` events.

mod commands;
mod events;
mod state;

use tauri::plugin::{Builder, TauriPlugin};
use tauri::{Manager, Runtime};
use workbench_core::{WindowWorkspacesApi, Workbench};

pub use commands::CommandResult;
pub use events::RECENTLY_OPENED_CHANGED_EVENT;
pub use state::WorkbenchState;

pub const PLUGIN_NAME: &str = "workbench";

/// Build the plugin around an initialized workbench.
pub fn init<R: Runtime>(workbench: Workbench) -> TauriPlugin<R> {
    Builder::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![
            // Window commands
            commands::windows::register_window,
            commands::windows::window_ready,
            commands::windows::close_window,
            // Workspace commands
            commands::workspaces::enter_workspace,
            commands::workspaces::create_untitled_workspace,
            commands::workspaces::delete_untitled_workspace,
            commands::workspaces::get_workspace_identifier,
            // History commands
            commands::workspaces::get_recently_opened,
            commands::workspaces::add_recently_opened,
            commands::workspaces::remove_from_recently_opened,
            commands::workspaces::clear_recently_opened,
        ])
        .setup(move |app, _api| {
            let changes = workbench.workspaces_service().on_recently_opened_change();
            app.manage(WorkbenchState::new(workbench));

            events::forward_recently_opened_changes(app.clone(), changes);

            tracing::info!("Workbench plugin initialized");

            Ok(())
        })
        .build()
}
