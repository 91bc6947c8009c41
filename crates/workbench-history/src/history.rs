//! Recently opened history service

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::Connection;
use std::sync::Arc;
use tokio::sync::broadcast;
use url::Url;

use workbench_storage::Database;
use workbench_workspaces::{PathToOpen, WorkspaceIdentifier, WorkspacesMainService};

use crate::recent::{Recent, RecentlyOpened};
use crate::Result;

/// Files that are only ever opened by tools (commit messages and the
/// like) and would just clutter the history
const COMMON_FILES_FILTER: &[&str] = &["COMMIT_EDITMSG", "MERGE_MSG"];

#[async_trait]
pub trait WorkspacesHistory: Send + Sync {
    /// The stored history, independent of any window
    async fn get_recently_opened(&self) -> Result<RecentlyOpened>;

    /// The stored history with the given window state placed first
    async fn get_recently_opened_for(
        &self,
        workspace: Option<WorkspaceIdentifier>,
        folder_uri: Option<Url>,
        files_to_open: Option<Vec<PathToOpen>>,
    ) -> Result<RecentlyOpened>;

    async fn add_recently_opened(&self, recents: Vec<Recent>) -> Result<()>;

    async fn remove_from_recently_opened(&self, paths: Vec<Url>) -> Result<()>;

    async fn clear_recently_opened(&self) -> Result<()>;

    /// Subscribe to changes. Every event carries the new stored history.
    fn on_recently_opened_change(&self) -> broadcast::Receiver<RecentlyOpened>;
}

#[derive(Debug, Clone, Copy)]
pub struct HistoryOptions {
    pub max_workspaces: usize,
    pub max_files: usize,
    pub channel_capacity: usize,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            max_workspaces: 50,
            max_files: 50,
            channel_capacity: 64,
        }
    }
}

pub struct HistoryMainService {
    db: Database,
    workspaces: Arc<WorkspacesMainService>,
    options: HistoryOptions,
    changes: broadcast::Sender<RecentlyOpened>,
}

impl HistoryMainService {
    pub fn new(
        db: Database,
        workspaces: Arc<WorkspacesMainService>,
        options: HistoryOptions,
    ) -> Self {
        let (changes, _) = broadcast::channel(options.channel_capacity.max(1));

        Self {
            db,
            workspaces,
            options,
            changes,
        }
    }

    fn load(&self) -> Result<RecentlyOpened> {
        Ok(self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT uri, kind, workspace_id, label, remote_authority FROM recently_opened
                 ORDER BY seq DESC",
            )?;

            let mut recently_opened = RecentlyOpened::default();
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ))
            })?;

            for row in rows {
                let (uri, kind, workspace_id, label, remote_authority) = match row {
                    Ok(row) => row,
                    Err(e) => {
                        tracing::warn!("Skipping unreadable history row: {}", e);
                        continue;
                    }
                };
                match recent_from_row(&uri, &kind, workspace_id, label, remote_authority) {
                    Some(recent) => recently_opened.push_unique(recent),
                    None => tracing::warn!(uri = %uri, kind = %kind, "Skipping unreadable history entry"),
                }
            }

            Ok(recently_opened)
        })?)
    }

    /// Publish the current history. Runs after the write has committed, so
    /// a failed reload is only logged.
    fn notify_changed(&self) {
        self.publish(self.load());
    }

    fn publish(&self, loaded: Result<RecentlyOpened>) {
        match loaded {
            // No subscribers is not an error
            Ok(recently_opened) => {
                let _ = self.changes.send(recently_opened);
            }
            Err(e) => tracing::warn!("Failed to load recently opened history for change event: {}", e),
        }
    }

    fn should_remember(&self, recent: &Recent) -> bool {
        match recent {
            Recent::Workspace { workspace, .. } => !self.workspaces.is_untitled_workspace(workspace),
            Recent::Folder { .. } => true,
            Recent::File { file_uri, .. } => !is_filtered_file(file_uri),
        }
    }
}

impl Clone for HistoryMainService {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            workspaces: Arc::clone(&self.workspaces),
            options: self.options,
            changes: self.changes.clone(),
        }
    }
}

#[async_trait]
impl WorkspacesHistory for HistoryMainService {
    async fn get_recently_opened(&self) -> Result<RecentlyOpened> {
        self.load()
    }

    async fn get_recently_opened_for(
        &self,
        workspace: Option<WorkspaceIdentifier>,
        folder_uri: Option<Url>,
        files_to_open: Option<Vec<PathToOpen>>,
    ) -> Result<RecentlyOpened> {
        let mut recently_opened = RecentlyOpened::default();

        if let Some(workspace) = workspace {
            if !self.workspaces.is_untitled_workspace(&workspace) {
                recently_opened.push_unique(Recent::workspace(workspace));
            }
        }

        if let Some(folder_uri) = folder_uri {
            recently_opened.push_unique(Recent::folder(folder_uri));
        }

        for path in files_to_open.unwrap_or_default() {
            recently_opened.push_unique(Recent::file(path.file_uri));
        }

        let stored = self.load()?;
        for recent in stored.workspaces.into_iter().chain(stored.files) {
            recently_opened.push_unique(recent);
        }

        Ok(recently_opened)
    }

    async fn add_recently_opened(&self, recents: Vec<Recent>) -> Result<()> {
        let recents: Vec<Recent> = recents
            .into_iter()
            .filter(|r| self.should_remember(r))
            .collect();

        if recents.is_empty() {
            return Ok(());
        }

        let opened_at = Utc::now().to_rfc3339();
        let options = self.options;

        self.db.transaction(|conn| {
            let max_seq: i64 = conn.query_row(
                "SELECT COALESCE(MAX(seq), 0) FROM recently_opened",
                [],
                |row| row.get(0),
            )?;

            // Walk backwards so the first entry ends up with the highest seq
            let mut seq = max_seq;
            for recent in recents.iter().rev() {
                seq += 1;
                let workspace_id = match recent {
                    Recent::Workspace { workspace, .. } => Some(workspace.id.as_str()),
                    _ => None,
                };

                conn.execute(
                    "INSERT OR REPLACE INTO recently_opened
                     (uri, kind, workspace_id, label, remote_authority, seq, opened_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    rusqlite::params![
                        recent.uri().as_str(),
                        recent.kind(),
                        workspace_id,
                        recent.label(),
                        recent.remote_authority(),
                        seq,
                        opened_at,
                    ],
                )?;
            }

            trim(conn, options)
        })?;

        tracing::debug!(count = recents.len(), "Added recently opened entries");

        self.notify_changed();
        Ok(())
    }

    async fn remove_from_recently_opened(&self, paths: Vec<Url>) -> Result<()> {
        let removed = self.db.transaction(|conn| {
            let mut removed = 0;
            for path in &paths {
                removed += conn.execute(
                    "DELETE FROM recently_opened WHERE uri = ?1",
                    [path.as_str()],
                )?;
            }
            Ok(removed)
        })?;

        if removed > 0 {
            tracing::debug!(removed, "Removed recently opened entries");
            self.notify_changed();
        }

        Ok(())
    }

    async fn clear_recently_opened(&self) -> Result<()> {
        self.db.with_connection(|conn| {
            conn.execute("DELETE FROM recently_opened", [])?;
            Ok(())
        })?;

        tracing::info!("Cleared recently opened history");

        self.notify_changed();
        Ok(())
    }

    fn on_recently_opened_change(&self) -> broadcast::Receiver<RecentlyOpened> {
        self.changes.subscribe()
    }
}

/// Drop the oldest entries beyond the configured limits
fn trim(conn: &Connection, options: HistoryOptions) -> workbench_storage::Result<()> {
    conn.execute(
        "DELETE FROM recently_opened WHERE kind != 'file' AND uri NOT IN (
             SELECT uri FROM recently_opened WHERE kind != 'file' ORDER BY seq DESC LIMIT ?1
         )",
        [options.max_workspaces as i64],
    )?;
    conn.execute(
        "DELETE FROM recently_opened WHERE kind = 'file' AND uri NOT IN (
             SELECT uri FROM recently_opened WHERE kind = 'file' ORDER BY seq DESC LIMIT ?1
         )",
        [options.max_files as i64],
    )?;
    Ok(())
}

fn recent_from_row(
    uri: &str,
    kind: &str,
    workspace_id: Option<String>,
    label: Option<String>,
    remote_authority: Option<String>,
) -> Option<Recent> {
    let uri = Url::parse(uri).ok()?;

    match kind {
        "workspace" => {
            let mut workspace = WorkspaceIdentifier::from_config_path(uri);
            if let Some(id) = workspace_id {
                workspace.id = id;
            }
            Some(Recent::Workspace {
                workspace,
                label,
                remote_authority,
            })
        }
        "folder" => Some(Recent::Folder {
            folder_uri: uri,
            label,
            remote_authority,
        }),
        "file" => Some(Recent::File {
            file_uri: uri,
            label,
            remote_authority,
        }),
        _ => None,
    }
}

fn is_filtered_file(uri: &Url) -> bool {
    uri.scheme() == "file"
        && uri
            .path_segments()
            .and_then(|segments| segments.last())
            .map(|name| COMMON_FILES_FILTER.contains(&name))
            .unwrap_or(false)
}
