//! Project lifecycle and listener notifications.

use std::rc::Rc;

use tempfile::TempDir;
use wadlsync::host::ScriptedPresentation;
use wadlsync::telemetry::{Category, Telemetry};
use wadlsync::workspace::{Project, ProjectId, WorkspaceError, WorkspaceEvent};

use crate::helpers::recording::{ActionLog, RecordingFactory, RecordingListener, event_log};
use crate::helpers::{project_file, workspace_in};

#[test]
fn test_add_and_remove_notify_listeners() {
    let dir = TempDir::new().unwrap();
    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new());
    let log = event_log();
    workspace.add_listener(RecordingListener::new("a", &log));

    let id = workspace.add_project(Project::new("Pets")).unwrap();
    let removed = workspace.remove_project(id).unwrap();

    assert_eq!(removed.name, "Pets");
    assert_eq!(workspace.project_count(), 0);
    assert_eq!(
        *log.borrow(),
        vec!["a: project added (Pets)", "a: project removed (Pets)"]
    );
}

#[test]
fn test_removing_unknown_project_is_not_found() {
    let dir = TempDir::new().unwrap();
    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new());
    workspace.add_project(Project::new("Pets")).unwrap();

    let stranger = ProjectId::new();
    let err = workspace.remove_project(stranger).unwrap_err();

    assert!(matches!(
        err,
        WorkspaceError::ProjectNotFound { id, operation: "removal" } if id == stranger
    ));
    assert_eq!(workspace.project_count(), 1);
}

#[test]
fn test_close_and_open_keep_identity_and_position() {
    let dir = TempDir::new().unwrap();
    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new());
    let pets = workspace.import_project(project_file(dir.path(), "Pets")).unwrap();
    let stores = workspace.import_project(project_file(dir.path(), "Stores")).unwrap();
    let log = event_log();
    workspace.add_listener(RecordingListener::new("l", &log));

    workspace.close_project(pets).unwrap();
    assert_eq!(workspace.index_of(pets), Some(0));
    assert!(!workspace.project(pets).unwrap().open);
    assert!(workspace.project(pets).unwrap().services.is_empty());

    workspace.open_project(pets).unwrap();
    let reopened = workspace.project(pets).unwrap();
    assert!(reopened.open);
    assert_eq!(reopened.services.len(), 1);
    assert_eq!(workspace.index_of(pets), Some(0));
    assert_eq!(workspace.index_of(stores), Some(1));

    assert_eq!(
        *log.borrow(),
        vec![
            "l: project removed (Pets)",
            "l: project closed (Pets)",
            "l: project added (Pets)",
            "l: project removed (Pets)",
            "l: project added (Pets)",
            "l: project opened (Pets)",
        ]
    );
}

#[test]
fn test_failing_listener_stops_fan_out() {
    let dir = TempDir::new().unwrap();
    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new());
    let log = event_log();
    workspace.add_listener(RecordingListener::failing("first", &log, |event| {
        matches!(event, WorkspaceEvent::ProjectAdded { .. })
    }));
    workspace.add_listener(RecordingListener::new("second", &log));

    let err = workspace.add_project(Project::new("Pets")).unwrap_err();

    assert!(matches!(err, WorkspaceError::Listener { .. }));
    assert_eq!(*log.borrow(), vec!["first: project added (Pets)"]);
    assert_eq!(workspace.project_count(), 1);
}

#[test]
fn test_removed_listener_hears_nothing() {
    let dir = TempDir::new().unwrap();
    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new());
    let log = event_log();
    let id = workspace.add_listener(RecordingListener::new("gone", &log));

    assert!(workspace.remove_listener(id).is_some());
    assert!(workspace.remove_listener(id).is_none());
    workspace.add_project(Project::new("Pets")).unwrap();

    assert!(log.borrow().is_empty());
}

#[test]
fn test_switching_workspace_replays_projects() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let mut other = workspace_in(second.path(), ScriptedPresentation::new());
    other
        .import_project(project_file(second.path(), "Orders"))
        .unwrap();

    let mut workspace = workspace_in(first.path(), ScriptedPresentation::new());
    workspace
        .import_project(project_file(first.path(), "Pets"))
        .unwrap();
    let log = event_log();
    workspace.add_listener(RecordingListener::new("l", &log));

    workspace
        .switch_workspace(second.path().join("workspace.json"))
        .unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "l: workspace switching",
            "l: project removed (Pets)",
            "l: project added (Orders)",
            "l: workspace switched",
        ]
    );
    assert_eq!(workspace.project_count(), 1);
    assert_eq!(
        workspace.path(),
        Some(second.path().join("workspace.json").as_path())
    );
}

#[test]
fn test_switching_to_invalid_file_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let bogus = dir.path().join("bogus.json");
    std::fs::write(&bogus, "{ broken").unwrap();
    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new());
    workspace.add_project(Project::new("Pets")).unwrap();
    let log = event_log();
    workspace.add_listener(RecordingListener::new("l", &log));

    let err = workspace.switch_workspace(&bogus).unwrap_err();

    assert!(matches!(err, WorkspaceError::InvalidWorkspace { .. }));
    assert!(log.borrow().is_empty());
    assert_eq!(workspace.project_count(), 1);
}

#[test]
fn test_import_is_tracked() {
    let dir = TempDir::new().unwrap();
    let actions: ActionLog = Rc::default();
    let mut telemetry = Telemetry::noop().with_session_id("session-1");
    telemetry.register_factory(Box::new(RecordingFactory {
        name: "recording",
        log: Rc::clone(&actions),
    }));
    let mut workspace =
        workspace_in(dir.path(), ScriptedPresentation::new()).with_telemetry(telemetry);

    workspace
        .import_project(project_file(dir.path(), "Pets"))
        .unwrap();

    let actions = actions.borrow();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].session_id, "session-1");
    assert_eq!(actions[0].category, Category::Action);
    assert_eq!(actions[0].action, "ImportProject");
    assert_eq!(
        actions[0].params.get("project_name").map(String::as_str),
        Some("Pets")
    );
}
