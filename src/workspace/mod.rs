//! Workspace and project persistence.
//!
//! A [`Workspace`] owns an ordered list of [`Project`]s and a JSON workspace
//! file recording where each project lives and whether it was open. Projects
//! are created and saved through a [`ProjectFactory`]; lifecycle changes are
//! broadcast to [`WorkspaceListener`]s.

mod config;
mod error;
mod events;
mod project;
mod store;

pub use config::{
    DEFAULT_WORKSPACE_NAME, ProjectEntry, ProjectStatus, WorkspaceConfig, WorkspaceSettings,
};
pub use error::{SaveStatus, WorkspaceError};
pub use events::{ListenerError, ListenerId, WorkspaceEvent, WorkspaceListener};
pub use project::{JsonProjectFactory, Project, ProjectFactory, ProjectFile, ProjectId};
pub use store::Workspace;
