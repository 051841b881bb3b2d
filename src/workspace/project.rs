use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WorkspaceError;
use crate::tree::RestService;

/// Stable identity of a project within a workspace session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A project: a named set of REST services stored in one file.
///
/// A closed project only carries its name and path; its services are not
/// loaded.
#[derive(Clone, Debug)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    /// `None` until the project has been saved.
    pub path: Option<PathBuf>,
    pub open: bool,
    pub services: Vec<RestService>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            description: None,
            path: None,
            open: true,
            services: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn service(&self, name: &str) -> Option<&RestService> {
        self.services.iter().find(|s| s.name == name)
    }

    pub fn service_mut(&mut self, name: &str) -> Option<&mut RestService> {
        self.services.iter_mut().find(|s| s.name == name)
    }
}

/// Serialized form of an open project.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub services: Vec<RestService>,
}

/// Creates and persists projects.
pub trait ProjectFactory {
    /// Build a project for `path`.
    ///
    /// An open project is loaded from its file; a closed one is only named.
    /// Without a path, a new empty project is created.
    fn create(
        &self,
        path: Option<&Path>,
        open: bool,
        name: Option<&str>,
    ) -> Result<Project, WorkspaceError>;

    /// Write `project` to its path.
    fn save(&self, project: &Project) -> Result<(), WorkspaceError>;

    /// File extension for project files, including the dot.
    fn extension(&self) -> &str;
}

/// Stores projects as pretty-printed JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonProjectFactory;

impl ProjectFactory for JsonProjectFactory {
    fn create(
        &self,
        path: Option<&Path>,
        open: bool,
        name: Option<&str>,
    ) -> Result<Project, WorkspaceError> {
        let Some(path) = path else {
            let mut project = Project::new(name.unwrap_or("Project"));
            project.open = open;
            return Ok(project);
        };

        if !open {
            let name = name
                .map(str::to_string)
                .or_else(|| file_stem(path))
                .unwrap_or_else(|| "Project".to_string());
            let mut project = Project::new(name).with_path(path);
            project.open = false;
            return Ok(project);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| WorkspaceError::project_load(path, e))?;
        let file: ProjectFile =
            serde_json::from_str(&content).map_err(|e| WorkspaceError::project_load(path, e))?;
        tracing::debug!("Loaded project '{}' from {}", file.name, path.display());

        Ok(Project {
            id: ProjectId::new(),
            name: file.name,
            description: file.description,
            path: Some(path.to_path_buf()),
            open: true,
            services: file.services,
        })
    }

    fn save(&self, project: &Project) -> Result<(), WorkspaceError> {
        let Some(path) = &project.path else {
            return Err(WorkspaceError::project_load(
                PathBuf::new(),
                format!("project '{}' has no file", project.name),
            ));
        };
        let file = ProjectFile {
            name: project.name.clone(),
            description: project.description.clone(),
            services: project.services.clone(),
        };
        std::fs::write(path, serde_json::to_string_pretty(&file)?)?;
        tracing::info!("Saved project '{}' to {}", project.name, path.display());
        Ok(())
    }

    fn extension(&self) -> &str {
        ".json"
    }
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}
