//! Window registry
//!
//! Tracks every open window by numeric id together with the
//! configuration it was opened with.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use url::Url;

use crate::identifier::WorkspaceIdentifier;

pub type WindowId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathToOpen {
    pub file_uri: Url,
}

/// What a window was asked to show when it was opened
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowConfiguration {
    #[serde(default)]
    pub workspace: Option<WorkspaceIdentifier>,
    #[serde(default)]
    pub folder_uri: Option<Url>,
    #[serde(default)]
    pub files_to_open_or_create: Option<Vec<PathToOpen>>,
}

#[derive(Debug)]
pub struct AppWindow {
    id: WindowId,
    config: RwLock<Option<WindowConfiguration>>,
    /// Set once the frontend has finished loading
    ready: AtomicBool,
    focused_at: RwLock<Option<DateTime<Utc>>>,
}

impl AppWindow {
    pub fn new(id: WindowId, config: Option<WindowConfiguration>) -> Self {
        Self {
            id,
            config: RwLock::new(config),
            ready: AtomicBool::new(false),
            focused_at: RwLock::new(None),
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn config(&self) -> Option<WindowConfiguration> {
        self.config.read().clone()
    }

    pub fn set_config(&self, config: Option<WindowConfiguration>) {
        *self.config.write() = config;
    }

    /// Mutate the configuration in place, creating an empty one if the
    /// window has none yet.
    pub fn update_config<F>(&self, f: F)
    where
        F: FnOnce(&mut WindowConfiguration),
    {
        let mut guard = self.config.write();
        f(guard.get_or_insert_with(WindowConfiguration::default));
    }

    /// The workspace this window currently shows, if any
    pub fn workspace(&self) -> Option<WorkspaceIdentifier> {
        self.config.read().as_ref().and_then(|c| c.workspace.clone())
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn focus(&self) {
        *self.focused_at.write() = Some(Utc::now());
        tracing::debug!(window_id = self.id, "Focused window");
    }

    pub fn focused_at(&self) -> Option<DateTime<Utc>> {
        *self.focused_at.read()
    }
}

/// Lookup of live windows by id
pub trait WindowRegistry: Send + Sync {
    fn get_window_by_id(&self, id: WindowId) -> Option<Arc<AppWindow>>;

    /// All open windows, ordered by id
    fn get_windows(&self) -> Vec<Arc<AppWindow>>;
}

pub struct WindowsMainService {
    windows: Arc<RwLock<BTreeMap<WindowId, Arc<AppWindow>>>>,
    next_id: Arc<AtomicU32>,
}

impl WindowsMainService {
    pub fn new() -> Self {
        Self {
            windows: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU32::new(1)),
        }
    }

    /// Register a new window. Ids start at 1 and are never reused.
    pub fn open_window(&self, config: Option<WindowConfiguration>) -> Arc<AppWindow> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let window = Arc::new(AppWindow::new(id, config));

        self.windows.write().insert(id, Arc::clone(&window));

        tracing::info!(window_id = id, "Opened window");

        window
    }

    pub fn close_window(&self, id: WindowId) -> bool {
        let removed = self.windows.write().remove(&id).is_some();
        if removed {
            tracing::info!(window_id = id, "Closed window");
        }
        removed
    }

    pub fn window_count(&self) -> usize {
        self.windows.read().len()
    }
}

impl Default for WindowsMainService {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for WindowsMainService {
    fn clone(&self) -> Self {
        Self {
            windows: Arc::clone(&self.windows),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl WindowRegistry for WindowsMainService {
    fn get_window_by_id(&self, id: WindowId) -> Option<Arc<AppWindow>> {
        self.windows.read().get(&id).cloned()
    }

    fn get_windows(&self) -> Vec<Arc<AppWindow>> {
        self.windows.read().values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_lookup() {
        let service = WindowsMainService::new();

        let first = service.open_window(None);
        let second = service.open_window(Some(WindowConfiguration::default()));

        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
        assert_eq!(service.window_count(), 2);

        let found = service.get_window_by_id(2).unwrap();
        assert!(Arc::ptr_eq(&found, &second));
        assert!(service.get_window_by_id(99).is_none());

        let ids: Vec<WindowId> = service.get_windows().iter().map(|w| w.id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_close_does_not_reuse_ids() {
        let service = WindowsMainService::new();
        let window = service.open_window(None);

        assert!(service.close_window(window.id()));
        assert!(!service.close_window(window.id()));
        assert!(service.get_window_by_id(window.id()).is_none());

        let next = service.open_window(None);
        assert_eq!(next.id(), 2);
    }

    #[test]
    fn test_clones_share_windows() {
        let service = WindowsMainService::new();
        let clone = service.clone();

        let window = clone.open_window(None);
        assert!(service.get_window_by_id(window.id()).is_some());
    }

    #[test]
    fn test_window_state() {
        let window = AppWindow::new(7, None);
        assert!(!window.is_ready());
        assert!(window.config().is_none());
        assert!(window.focused_at().is_none());

        window.mark_ready();
        window.focus();
        assert!(window.is_ready());
        assert!(window.focused_at().is_some());

        let folder = Url::parse("file:///home/dev/app").unwrap();
        window.update_config(|config| config.folder_uri = Some(folder.clone()));
        assert_eq!(window.config().unwrap().folder_uri, Some(folder));
        assert!(window.workspace().is_none());
    }
}
