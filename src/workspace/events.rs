use std::fmt;

use thiserror::Error;

use super::Workspace;
use super::project::ProjectId;

/// Lifecycle notification sent to workspace listeners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkspaceEvent {
    ProjectAdded { id: ProjectId, name: String },
    ProjectRemoved { id: ProjectId, name: String },
    ProjectOpened { id: ProjectId, name: String },
    ProjectClosed { id: ProjectId, name: String },
    WorkspaceSwitching,
    WorkspaceSwitched,
}

impl fmt::Display for WorkspaceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectAdded { name, .. } => write!(f, "project added ({name})"),
            Self::ProjectRemoved { name, .. } => write!(f, "project removed ({name})"),
            Self::ProjectOpened { name, .. } => write!(f, "project opened ({name})"),
            Self::ProjectClosed { name, .. } => write!(f, "project closed ({name})"),
            Self::WorkspaceSwitching => f.write_str("workspace switching"),
            Self::WorkspaceSwitched => f.write_str("workspace switched"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ListenerError(pub String);

/// Observer of workspace lifecycle events.
///
/// Listeners are called in registration order. An error stops the fan-out
/// and is returned to the caller of the operation that fired the event.
pub trait WorkspaceListener {
    fn on_event(
        &mut self,
        event: &WorkspaceEvent,
        workspace: &Workspace,
    ) -> Result<(), ListenerError>;
}

/// Handle returned by [`Workspace::add_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(super) u64);
