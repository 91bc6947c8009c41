//! Workspace identity types

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use url::Url;

/// File extension of workspace config files
pub const WORKSPACE_EXTENSION: &str = "workspace";

/// File name used for the config of every untitled workspace
pub const UNTITLED_WORKSPACE_FILE: &str = "untitled.workspace";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceIdentifier {
    /// Stable hash of the config path
    pub id: String,
    /// Location of the workspace config file
    pub config_path: Url,
}

impl WorkspaceIdentifier {
    pub fn from_config_path(config_path: Url) -> Self {
        Self {
            id: workspace_id_for(&config_path),
            config_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceFolderCreationData {
    pub uri: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterWorkspaceResult {
    pub workspace: WorkspaceIdentifier,
    pub backup_path: Option<PathBuf>,
}

/// Compute the id of a workspace from its config path.
///
/// The hash covers the full URL so remote and local workspaces with the
/// same path get different ids. On case-insensitive platforms the path
/// is lowercased first.
pub fn workspace_id_for(config_path: &Url) -> String {
    let key = normalize_for_hash(config_path.as_str());

    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let digest = hasher.finalize();

    let mut out = String::with_capacity(32);
    for b in digest.iter().take(16) {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

#[cfg(any(target_os = "windows", target_os = "macos"))]
fn normalize_for_hash(path: &str) -> String {
    path.to_lowercase()
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn normalize_for_hash(path: &str) -> String {
    path.to_string()
}

pub fn has_workspace_extension(path: &Url) -> bool {
    path.path_segments()
        .and_then(|segments| segments.last())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(WORKSPACE_EXTENSION))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_stable() {
        let path = Url::parse("file:///home/dev/project.workspace").unwrap();
        let a = WorkspaceIdentifier::from_config_path(path.clone());
        let b = WorkspaceIdentifier::from_config_path(path);

        assert_eq!(a, b);
        assert_eq!(a.id.len(), 32);
        assert!(a.id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_id_differs_per_path() {
        let a = workspace_id_for(&Url::parse("file:///a/one.workspace").unwrap());
        let b = workspace_id_for(&Url::parse("file:///a/two.workspace").unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn test_workspace_extension() {
        let yes = Url::parse("file:///a/project.workspace").unwrap();
        let upper = Url::parse("file:///a/project.WORKSPACE").unwrap();
        let no = Url::parse("file:///a/project.json").unwrap();
        let bare = Url::parse("file:///a/.workspace").unwrap();

        assert!(has_workspace_extension(&yes));
        assert!(has_workspace_extension(&upper));
        assert!(!has_workspace_extension(&no));
        assert!(!has_workspace_extension(&bare));
    }

    #[test]
    fn test_identifier_wire_format() {
        let workspace =
            WorkspaceIdentifier::from_config_path(Url::parse("file:///a/p.workspace").unwrap());
        let json = serde_json::to_value(&workspace).unwrap();

        assert_eq!(json["configPath"], "file:///a/p.workspace");
        assert_eq!(json["id"], workspace.id.as_str());
    }
}
