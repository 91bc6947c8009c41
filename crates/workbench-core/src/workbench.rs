//! Main-process state container

use std::sync::Arc;

use workbench_history::HistoryMainService;
use workbench_storage::Database;
use workbench_workspaces::{WindowsMainService, WorkspacesMainService};

use crate::config::Config;
use crate::service::WorkspacesService;
use crate::Result;

/// Owns every main-process service and wires them into the
/// window-scoped API handed to the IPC layer.
pub struct Workbench {
    config: Config,
    db: Database,
    windows: Arc<WindowsMainService>,
    workspaces: Arc<WorkspacesMainService>,
    history: Arc<HistoryMainService>,
    workspaces_service: Arc<WorkspacesService>,
}

impl Workbench {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::create_dir_all(&config.untitled_workspaces_home)?;
        std::fs::create_dir_all(&config.backups_home)?;

        let db = Database::open(&config.database_path)?;

        let workbench = Self::with_database(config, db)?;

        tracing::info!(
            database = %workbench.config.database_path.display(),
            "Workbench initialized"
        );

        Ok(workbench)
    }

    /// Build on an already opened database
    pub fn with_database(config: Config, db: Database) -> Result<Self> {
        config.validate()?;

        let windows = Arc::new(WindowsMainService::new());
        let workspaces = Arc::new(WorkspacesMainService::new(
            config.untitled_workspaces_home.clone(),
            config.backups_home.clone(),
        ));
        let history = Arc::new(HistoryMainService::new(
            db.clone(),
            Arc::clone(&workspaces),
            config.history_options(),
        ));
        let workspaces_service = Arc::new(WorkspacesService::new(
            workspaces.clone(),
            windows.clone(),
            history.clone(),
        ));

        Ok(Self {
            config,
            db,
            windows,
            workspaces,
            history,
            workspaces_service,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn windows(&self) -> &Arc<WindowsMainService> {
        &self.windows
    }

    pub fn workspaces(&self) -> &Arc<WorkspacesMainService> {
        &self.workspaces
    }

    pub fn history(&self) -> &Arc<HistoryMainService> {
        &self.history
    }

    /// The API exposed to windows over IPC
    pub fn workspaces_service(&self) -> &Arc<WorkspacesService> {
        &self.workspaces_service
    }
}

impl Clone for Workbench {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            windows: Arc::clone(&self.windows),
            workspaces: Arc::clone(&self.workspaces),
            history: Arc::clone(&self.history),
            workspaces_service: Arc::clone(&self.workspaces_service),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::WindowWorkspacesApi;
    use url::Url;
    use workbench_history::Recent;
    use workbench_workspaces::{WindowConfiguration, WorkspaceFolderCreationData};

    #[tokio::test]
    async fn test_workbench_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let workbench = Workbench::new(Config::new(dir.path().to_path_buf())).unwrap();
        let api = workbench.workspaces_service();
        let mut changes = api.on_recently_opened_change();

        let folder = Url::from_file_path(dir.path().join("api")).unwrap();
        let window = workbench.windows().open_window(Some(WindowConfiguration {
            folder_uri: Some(folder.clone()),
            ..Default::default()
        }));
        window.mark_ready();

        // Untitled workspace for the folder, then enter it
        let untitled = api
            .create_untitled_workspace(
                window.id(),
                Some(vec![WorkspaceFolderCreationData {
                    uri: folder.clone(),
                    name: None,
                }]),
                None,
            )
            .await
            .unwrap();
        assert!(workbench.workspaces().is_untitled_workspace(&untitled));

        let entered = api
            .enter_workspace(window.id(), untitled.config_path.clone())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entered.workspace, untitled);
        assert_eq!(window.workspace(), Some(untitled.clone()));

        // Untitled workspaces never reach the history
        api.add_recently_opened(
            window.id(),
            vec![Recent::workspace(untitled.clone()), Recent::folder(folder.clone())],
        )
        .await
        .unwrap();
        let published = changes.recv().await.unwrap();
        assert_eq!(published.workspaces, vec![Recent::folder(folder.clone())]);

        let for_window = api.get_recently_opened(window.id()).await.unwrap();
        assert_eq!(for_window.workspaces, vec![Recent::folder(folder)]);

        api.delete_untitled_workspace(window.id(), untitled.clone())
            .await
            .unwrap();
        assert!(workbench.workspaces().untitled_workspaces().await.unwrap().is_empty());

        api.clear_recently_opened(window.id()).await.unwrap();
        assert!(changes.recv().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_closed_window_cannot_enter_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_in_memory().unwrap();
        let workbench =
            Workbench::with_database(Config::new(dir.path().to_path_buf()), db).unwrap();

        let window = workbench.windows().open_window(None);
        window.mark_ready();
        assert!(workbench.windows().close_window(window.id()));

        let path = Url::from_file_path(dir.path().join("p.workspace")).unwrap();
        let result = workbench
            .workspaces_service()
            .enter_workspace(window.id(), path)
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(window.workspace().is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::new(std::path::PathBuf::from("/data"));
        config.change_channel_capacity = 0;

        let db = Database::open_in_memory().unwrap();
        assert!(Workbench::with_database(config, db).is_err());
    }
}
