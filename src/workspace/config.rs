//! On-disk workspace file.
//!
//! ```json
//! {
//!   "name": "Projects",
//!   "settings": { "close_projects_on_startup": false },
//!   "projects": [
//!     { "path": "pets/pets-project.json", "name": "Pets", "status": "closed" }
//!   ]
//! }
//! ```

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::WorkspaceError;

/// Name used when a workspace file does not set one.
pub const DEFAULT_WORKSPACE_NAME: &str = "Projects";

/// User preferences stored with the workspace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    /// Load every project closed, regardless of its saved status.
    pub close_projects_on_startup: bool,
    /// Save projects, not just the workspace file, on close.
    pub auto_save_projects_on_exit: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Open,
    Closed,
}

/// A project reference inside the workspace file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// `/`-separated, relative to the project root when possible.
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub status: ProjectStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Directory relative project paths are resolved against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<String>,
    /// Version of the library that last wrote the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub settings: WorkspaceSettings,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

impl WorkspaceConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self, WorkspaceError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), WorkspaceError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Directory that relative project paths hang off.
    ///
    /// The configured project root, else the workspace file's directory.
    pub fn base_dir(&self, workspace_file: Option<&Path>) -> Option<PathBuf> {
        match &self.project_root {
            Some(root) if !root.is_empty() => Some(PathBuf::from(root)),
            _ => workspace_file
                .and_then(Path::parent)
                .map(Path::to_path_buf),
        }
    }
}

/// Express `path` relative to `base` with `/` separators, if it lies below it.
pub fn relative_path(path: &Path, base: Option<&Path>) -> String {
    let relative = base
        .and_then(|base| path.strip_prefix(base).ok())
        .unwrap_or(path);
    normalize_separators(relative)
}

/// Turn a stored entry path back into a filesystem path.
pub fn absolute_path(stored: &str, base: Option<&Path>) -> PathBuf {
    let path = PathBuf::from(stored.replace('\\', "/"));
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    }
}

fn normalize_separators(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .map(|component| match component {
            Component::RootDir => String::new(),
            other => other.as_os_str().to_string_lossy().into_owned(),
        })
        .collect();
    if parts.len() == 1 && parts[0].is_empty() {
        return "/".to_string();
    }
    parts.join("/")
}
