//! Recently opened entries

use serde::{Deserialize, Serialize};
use url::Url;

use workbench_workspaces::WorkspaceIdentifier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Recent {
    Workspace {
        workspace: WorkspaceIdentifier,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        remote_authority: Option<String>,
    },
    Folder {
        folder_uri: Url,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        remote_authority: Option<String>,
    },
    File {
        file_uri: Url,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        remote_authority: Option<String>,
    },
}

impl Recent {
    pub fn workspace(workspace: WorkspaceIdentifier) -> Self {
        Self::Workspace {
            workspace,
            label: None,
            remote_authority: None,
        }
    }

    pub fn folder(folder_uri: Url) -> Self {
        Self::Folder {
            folder_uri,
            label: None,
            remote_authority: None,
        }
    }

    pub fn file(file_uri: Url) -> Self {
        Self::File {
            file_uri,
            label: None,
            remote_authority: None,
        }
    }

    /// The URI that identifies this entry in the history
    pub fn uri(&self) -> &Url {
        match self {
            Self::Workspace { workspace, .. } => &workspace.config_path,
            Self::Folder { folder_uri, .. } => folder_uri,
            Self::File { file_uri, .. } => file_uri,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Workspace { label, .. } | Self::Folder { label, .. } | Self::File { label, .. } => {
                label.as_deref()
            }
        }
    }

    pub fn remote_authority(&self) -> Option<&str> {
        match self {
            Self::Workspace {
                remote_authority, ..
            }
            | Self::Folder {
                remote_authority, ..
            }
            | Self::File {
                remote_authority, ..
            } => remote_authority.as_deref(),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Workspace { .. } => "workspace",
            Self::Folder { .. } => "folder",
            Self::File { .. } => "file",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentlyOpened {
    /// Workspaces and folders, most recent first
    pub workspaces: Vec<Recent>,
    /// Files, most recent first
    pub files: Vec<Recent>,
}

impl RecentlyOpened {
    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty() && self.files.is_empty()
    }

    /// Append `recent` to the matching list unless its URI is already there
    pub(crate) fn push_unique(&mut self, recent: Recent) {
        let list = if recent.is_file() {
            &mut self.files
        } else {
            &mut self.workspaces
        };

        if !list.iter().any(|r| r.uri() == recent.uri()) {
            list.push(recent);
        }
    }
}
