//! Frontend event forwarding

use tauri::{AppHandle, Emitter, Runtime};
use tokio::sync::broadcast::{self, error::RecvError};
use workbench_core::RecentlyOpened;

pub const RECENTLY_OPENED_CHANGED_EVENT: &str = "recently-opened-changed";

/// Re-emit every history change to all windows until the history
/// service goes away.
pub fn forward_recently_opened_changes<R: Runtime>(
    app: AppHandle<R>,
    mut changes: broadcast::Receiver<RecentlyOpened>,
) {
    tauri::async_runtime::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(recently_opened) => {
                    if let Err(e) = app.emit(RECENTLY_OPENED_CHANGED_EVENT, recently_opened) {
                        tracing::warn!("Failed to emit {}: {}", RECENTLY_OPENED_CHANGED_EVENT, e);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Recently opened listener lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }

        tracing::debug!("Recently opened change stream closed");
    });
}
