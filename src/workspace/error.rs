use std::path::PathBuf;

use thiserror::Error;

use super::events::ListenerError;
use super::project::ProjectId;

/// Errors from workspace and project persistence.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file exists but is not a workspace.
    #[error("Failed to load workspace {path}: {message}")]
    InvalidWorkspace { path: PathBuf, message: String },

    /// The project is not part of this workspace.
    #[error("Project [{id}] not available in workspace for {operation}")]
    ProjectNotFound {
        id: ProjectId,
        operation: &'static str,
    },

    /// A listener rejected a workspace event.
    #[error("Workspace listener failed on {event}: {source}")]
    Listener {
        event: String,
        #[source]
        source: ListenerError,
    },

    #[error("Failed to load project {path}: {message}")]
    ProjectLoad { path: PathBuf, message: String },
}

impl WorkspaceError {
    pub(crate) fn not_found(id: ProjectId, operation: &'static str) -> Self {
        Self::ProjectNotFound { id, operation }
    }

    pub(crate) fn project_load(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ProjectLoad {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Outcome of a save.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveStatus {
    Success,
    /// Writing failed; in-memory state is unchanged.
    Failed,
    /// The user cancelled a prompt.
    Cancelled,
    /// The user chose not to save.
    DontSave,
}

impl SaveStatus {
    /// Whether a multi-item save should stop at this outcome.
    pub fn is_abort(self) -> bool {
        matches!(self, SaveStatus::Failed | SaveStatus::Cancelled)
    }
}
