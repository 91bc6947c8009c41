//! Plugin state management
use std::sync::Arc;
use workbench_core::{Workbench, WorkspacesService};

/// Workbench handle stored in Tauri's managed state
pub struct WorkbenchState {
    workbench: Workbench,
}

impl WorkbenchState {
    pub fn new(workbench: Workbench) -> Self {
        Self { workbench }
    }

    pub fn workbench(&self) -> &Workbench {
        &self.workbench
    }

    /// Owned handle, safe to hold across an await
    pub fn workspaces_service(&self) -> Arc<WorkspacesService> {
        Arc::clone(self.workbench.workspaces_service())
    }
}
