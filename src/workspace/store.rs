use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::config::{
    DEFAULT_WORKSPACE_NAME, ProjectEntry, ProjectStatus, WorkspaceConfig, WorkspaceSettings,
    absolute_path, relative_path,
};
use super::events::{ListenerId, WorkspaceEvent, WorkspaceListener};
use super::project::{Project, ProjectFactory, ProjectId};
use super::{SaveStatus, WorkspaceError};
use crate::host::Presentation;
use crate::telemetry::Telemetry;

/// The set of projects a user works with, persisted as one workspace file.
pub struct Workspace {
    /// Workspace file; `None` until saved.
    path: Option<PathBuf>,
    config: WorkspaceConfig,
    projects: Vec<Project>,
    listeners: Vec<(ListenerId, Box<dyn WorkspaceListener>)>,
    next_listener: u64,
    factory: Box<dyn ProjectFactory>,
    presentation: Box<dyn Presentation>,
    telemetry: Telemetry,
}

impl Workspace {
    // ── Construction ─────────────────────────────────────────────────

    /// An empty, unsaved workspace.
    pub fn new(factory: Box<dyn ProjectFactory>, presentation: Box<dyn Presentation>) -> Self {
        Self {
            path: None,
            config: WorkspaceConfig::new(DEFAULT_WORKSPACE_NAME),
            projects: Vec::new(),
            listeners: Vec::new(),
            next_listener: 0,
            factory,
            presentation,
            telemetry: Telemetry::noop(),
        }
    }

    /// Open the workspace file at `path`, or start a new one there.
    pub fn open(
        path: impl AsRef<Path>,
        factory: Box<dyn ProjectFactory>,
        presentation: Box<dyn Presentation>,
    ) -> Result<Self, WorkspaceError> {
        let mut workspace = Self::new(factory, presentation);
        workspace.load(path)?;
        Ok(workspace)
    }

    pub fn with_telemetry(mut self, telemetry: Telemetry) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn telemetry_mut(&mut self) -> &mut Telemetry {
        &mut self.telemetry
    }

    // ── Loading and switching ────────────────────────────────────────

    /// Replace this workspace's state with the file at `path`.
    ///
    /// A missing file gives an empty workspace that will be saved there.
    /// Projects that fail to load are reported and skipped. An unreadable
    /// workspace file leaves the current state untouched. Listeners are
    /// not notified.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), WorkspaceError> {
        let path = std::path::absolute(path.as_ref())?;

        if !path.exists() {
            tracing::info!("Creating new workspace at {}", path.display());
            self.projects.clear();
            self.config = WorkspaceConfig::new(DEFAULT_WORKSPACE_NAME);
            self.path = Some(path);
            return Ok(());
        }

        tracing::info!("Loading workspace from {}", path.display());
        let config = read_workspace(&path)?;
        let base = config.base_dir(Some(&path));
        let close_all = config.settings.close_projects_on_startup;

        let mut projects = Vec::with_capacity(config.projects.len());
        for entry in &config.projects {
            let project_path = absolute_path(&entry.path, base.as_deref());
            let open = !close_all && entry.status == ProjectStatus::Open;
            match self
                .factory
                .create(Some(&project_path), open, Some(&entry.name))
            {
                Ok(project) => projects.push(project),
                Err(e) => {
                    tracing::error!("Failed to load project {}: {e}", project_path.display());
                    self.presentation.show_error(&format!(
                        "Failed to load project [{}] in workspace: {e}",
                        project_path.display()
                    ));
                }
            }
        }

        self.projects = projects;
        self.config = config;
        self.path = Some(path);
        Ok(())
    }

    /// Close every project and load the workspace at `path` instead.
    ///
    /// An existing file that is not a workspace is rejected before anything
    /// changes.
    pub fn switch_workspace(&mut self, path: impl AsRef<Path>) -> Result<(), WorkspaceError> {
        let path = path.as_ref();
        if path.exists() {
            read_workspace(path)?;
        }

        self.fire(WorkspaceEvent::WorkspaceSwitching)?;

        while !self.projects.is_empty() {
            let project = self.projects.remove(0);
            self.fire(removed(&project))?;
        }

        match self.load(path) {
            Ok(()) => {
                let events: Vec<_> = self.projects.iter().map(added).collect();
                for event in events {
                    self.fire(event)?;
                }
            }
            Err(e) => tracing::error!("Failed to switch workspace to {}: {e}", path.display()),
        }

        self.fire(WorkspaceEvent::WorkspaceSwitched)
    }

    // ── Saving ───────────────────────────────────────────────────────

    /// Save the workspace file, and each open project unless
    /// `workspace_only`.
    ///
    /// Stops at the first project save that fails or is cancelled.
    pub fn save(&mut self, workspace_only: bool) -> SaveStatus {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => match self.presentation.save_as("Save Workspace", ".json", None) {
                Some(path) => {
                    self.path = Some(path.clone());
                    path
                }
                None => return SaveStatus::Cancelled,
            },
        };

        let base = self.config.base_dir(Some(&path));
        let mut entries = Vec::new();
        for index in 0..self.projects.len() {
            if !workspace_only {
                let status = self.save_project_at(index);
                if status.is_abort() {
                    return status;
                }
            }
            if let Some(entry) = project_entry(&self.projects[index], base.as_deref()) {
                entries.push(entry);
            }
        }

        let mut config = self.config.clone();
        config.projects = entries;
        config.version = Some(env!("CARGO_PKG_VERSION").to_string());
        match config.write_to_file(&path) {
            Ok(()) => {
                tracing::info!("Saved workspace to {}", path.display());
                self.config = config;
                SaveStatus::Success
            }
            Err(e) => {
                tracing::error!("Failed to save workspace: {e}");
                SaveStatus::Failed
            }
        }
    }

    /// Save on shutdown; projects are included when auto-save is enabled.
    pub fn on_close(&mut self) -> SaveStatus {
        self.save(!self.config.settings.auto_save_projects_on_exit)
    }

    fn save_project_at(&mut self, index: usize) -> SaveStatus {
        let project = &self.projects[index];
        if !project.open {
            return SaveStatus::Success;
        }

        if project.path.is_none() {
            let question = format!(
                "Project [{}] has not been saved. Do you want to save it?",
                project.name
            );
            match self.presentation.confirm_or_cancel(&question, "Save Project") {
                None => return SaveStatus::Cancelled,
                Some(false) => return SaveStatus::DontSave,
                Some(true) => {
                    let extension = self.factory.extension();
                    let default = PathBuf::from(project_file_name(&project.name, extension));
                    match self
                        .presentation
                        .save_as("Save Project", extension, Some(default.as_path()))
                    {
                        Some(path) => self.projects[index].path = Some(path),
                        None => return SaveStatus::Cancelled,
                    }
                }
            }
        }

        let project = &self.projects[index];
        match self.factory.save(project) {
            Ok(()) => SaveStatus::Success,
            Err(e) => {
                tracing::error!("Failed to save project '{}': {e}", project.name);
                SaveStatus::Failed
            }
        }
    }

    // ── Project lifecycle ────────────────────────────────────────────

    /// Append `project` and notify listeners.
    pub fn add_project(&mut self, project: Project) -> Result<ProjectId, WorkspaceError> {
        let id = project.id;
        let event = added(&project);
        self.projects.push(project);
        self.fire(event)?;
        Ok(id)
    }

    /// Load the project file at `path` into the workspace and save the
    /// workspace file.
    pub fn import_project(&mut self, path: impl AsRef<Path>) -> Result<ProjectId, WorkspaceError> {
        let path = std::path::absolute(path.as_ref())?;
        let project = self.factory.create(Some(&path), true, None)?;
        let name = project.name.clone();
        let id = self.add_project(project)?;
        self.telemetry
            .track_action_param("ImportProject", "project_name", &name);

        let status = self.save(true);
        tracing::debug!("Saved workspace after importing '{name}': {status:?}");
        Ok(id)
    }

    /// Prompt for a file and create a project there.
    pub fn new_project(&mut self, name: &str) -> Result<Option<ProjectId>, WorkspaceError> {
        let extension = self.factory.extension().to_string();
        let default = PathBuf::from(project_file_name(name, &extension));
        match self
            .presentation
            .save_as("Create Project", &extension, Some(default.as_path()))
        {
            Some(file) => self.create_project(name, Some(&file)),
            None => Ok(None),
        }
    }

    /// Create an empty project and save it to `file`.
    ///
    /// If `file` exists the user is asked whether to overwrite it or pick
    /// another file. Cancelling returns `Ok(None)`.
    pub fn create_project(
        &mut self,
        name: &str,
        file: Option<&Path>,
    ) -> Result<Option<ProjectId>, WorkspaceError> {
        let mut file = file.map(Path::to_path_buf);
        while let Some(existing) = file.as_ref().filter(|f| f.exists()) {
            match self
                .presentation
                .confirm_or_cancel("Project file exists. Overwrite?", "Overwrite Project")
            {
                None => return Ok(None),
                Some(true) => std::fs::remove_file(existing)?,
                Some(false) => {
                    let extension = self.factory.extension().to_string();
                    match self
                        .presentation
                        .save_as("Create Project", &extension, Some(existing.as_path()))
                    {
                        Some(other) => file = Some(other),
                        None => return Ok(None),
                    }
                }
            }
        }

        let mut project = self.factory.create(None, true, Some(name))?;
        project.name = name.to_string();
        project.path = file;
        let id = self.add_project(project)?;
        self.telemetry.track_action("CreateProject");

        if let Some(project) = self.project(id).filter(|p| p.path.is_some()) {
            if let Err(e) = self.factory.save(project) {
                tracing::error!("Failed to save project '{name}': {e}");
            }
        }
        Ok(Some(id))
    }

    /// Remove a project from the workspace, returning it.
    pub fn remove_project(&mut self, id: ProjectId) -> Result<Project, WorkspaceError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| WorkspaceError::not_found(id, "removal"))?;
        let project = self.projects.remove(index);
        self.fire(removed(&project))?;
        Ok(project)
    }

    /// Re-read a project from its file, opening it. The id is kept.
    pub fn reload_project(&mut self, id: ProjectId) -> Result<ProjectId, WorkspaceError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| WorkspaceError::not_found(id, "reload"))?;
        let old = self.projects.remove(index);
        self.fire(removed(&old))?;

        let mut project = self
            .factory
            .create(old.path.as_deref(), true, Some(&old.name))?;
        project.id = old.id;
        let events = [added(&project), opened(&project)];
        self.projects.insert(index, project);

        for event in events {
            self.fire(event)?;
        }
        Ok(id)
    }

    /// Open a closed project.
    pub fn open_project(&mut self, id: ProjectId) -> Result<ProjectId, WorkspaceError> {
        tracing::debug!("Opening project {id}");
        self.reload_project(id)
    }

    /// Replace an open project with its closed stand-in. The id is kept.
    pub fn close_project(&mut self, id: ProjectId) -> Result<(), WorkspaceError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| WorkspaceError::not_found(id, "close"))?;
        let old = self.projects.remove(index);
        self.fire(removed(&old))?;
        self.fire(closed(&old))?;

        match self
            .factory
            .create(old.path.as_deref(), false, Some(&old.name))
        {
            Ok(mut project) => {
                project.id = old.id;
                let event = added(&project);
                self.projects.insert(index, project);
                self.fire(event)?;
            }
            Err(e) => {
                tracing::error!("Failed to close project '{}': {e}", old.name);
                self.presentation
                    .show_error(&format!("Failed to close project [{}]: {e}", old.name));
            }
        }
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn project_mut(&mut self, id: ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    pub fn project_at(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }

    pub fn project_by_name(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    pub fn index_of(&self, id: ProjectId) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    pub fn open_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.open).collect()
    }

    /// Projects keyed by name; later duplicates win.
    pub fn projects_by_name(&self) -> HashMap<&str, &Project> {
        self.projects.iter().map(|p| (p.name.as_str(), p)).collect()
    }

    // ── Properties ───────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        self.config.name.as_deref().unwrap_or(DEFAULT_WORKSPACE_NAME)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.config.name = Some(name.into());
    }

    pub fn description(&self) -> Option<&str> {
        self.config.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.config.description = description;
    }

    pub fn project_root(&self) -> Option<&str> {
        self.config.project_root.as_deref()
    }

    pub fn set_project_root(&mut self, root: Option<String>) {
        self.config.project_root = root;
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn settings(&self) -> &WorkspaceSettings {
        &self.config.settings
    }

    pub fn settings_mut(&mut self) -> &mut WorkspaceSettings {
        &mut self.config.settings
    }

    // ── Listeners ────────────────────────────────────────────────────

    pub fn add_listener(&mut self, listener: Box<dyn WorkspaceListener>) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> Option<Box<dyn WorkspaceListener>> {
        let index = self.listeners.iter().position(|(lid, _)| *lid == id)?;
        Some(self.listeners.remove(index).1)
    }

    /// Deliver `event` to listeners in order, stopping at the first error.
    fn fire(&mut self, event: WorkspaceEvent) -> Result<(), WorkspaceError> {
        let mut listeners = std::mem::take(&mut self.listeners);
        let result = {
            let workspace: &Workspace = self;
            listeners
                .iter_mut()
                .try_for_each(|(_, listener)| listener.on_event(&event, workspace))
        };
        self.listeners = listeners;
        result.map_err(|source| WorkspaceError::Listener {
            event: event.to_string(),
            source,
        })
    }
}

fn read_workspace(path: &Path) -> Result<WorkspaceConfig, WorkspaceError> {
    WorkspaceConfig::read_from_file(path).map_err(|e| WorkspaceError::InvalidWorkspace {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Workspace file entry for `project`; unsaved projects have none.
fn project_entry(project: &Project, base: Option<&Path>) -> Option<ProjectEntry> {
    let path = project.path.as_deref()?;
    Some(ProjectEntry {
        path: relative_path(path, base),
        name: project.name.clone(),
        status: if project.open {
            ProjectStatus::Open
        } else {
            ProjectStatus::Closed
        },
    })
}

fn project_file_name(name: &str, extension: &str) -> String {
    format!("{name}-project{extension}")
}

fn added(project: &Project) -> WorkspaceEvent {
    WorkspaceEvent::ProjectAdded {
        id: project.id,
        name: project.name.clone(),
    }
}

fn removed(project: &Project) -> WorkspaceEvent {
    WorkspaceEvent::ProjectRemoved {
        id: project.id,
        name: project.name.clone(),
    }
}

fn opened(project: &Project) -> WorkspaceEvent {
    WorkspaceEvent::ProjectOpened {
        id: project.id,
        name: project.name.clone(),
    }
}

fn closed(project: &Project) -> WorkspaceEvent {
    WorkspaceEvent::ProjectClosed {
        id: project.id,
        name: project.name.clone(),
    }
}
