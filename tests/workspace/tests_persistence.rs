//! Workspace file round-trips.

use tempfile::TempDir;
use wadlsync::host::ScriptedPresentation;
use wadlsync::workspace::{
    JsonProjectFactory, Project, ProjectEntry, ProjectStatus, SaveStatus, Workspace,
    WorkspaceConfig, WorkspaceError,
};

use crate::helpers::{project_file, workspace_in};

#[test]
fn test_new_workspace_starts_empty() {
    let dir = TempDir::new().unwrap();
    let workspace = workspace_in(dir.path(), ScriptedPresentation::new());

    assert_eq!(workspace.project_count(), 0);
    assert_eq!(workspace.name(), "Projects");
    assert_eq!(workspace.path(), Some(dir.path().join("workspace.json").as_path()));
    assert!(!dir.path().join("workspace.json").exists());
}

#[test]
fn test_save_and_reopen_keeps_projects_and_status() {
    let dir = TempDir::new().unwrap();
    let pets = project_file(dir.path(), "Pets");
    let stores = project_file(dir.path(), "Stores");

    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new());
    workspace.set_name("Shop");
    workspace.set_description(Some("Everything for sale".into()));
    workspace.import_project(&pets).unwrap();
    let stores_id = workspace.import_project(&stores).unwrap();
    workspace.close_project(stores_id).unwrap();
    assert_eq!(workspace.save(false), SaveStatus::Success);

    let config = WorkspaceConfig::read_from_file(dir.path().join("workspace.json")).unwrap();
    assert_eq!(config.name.as_deref(), Some("Shop"));
    assert_eq!(config.version.as_deref(), Some(env!("CARGO_PKG_VERSION")));
    assert_eq!(
        config.projects,
        vec![
            ProjectEntry {
                path: "pets.json".into(),
                name: "Pets".into(),
                status: ProjectStatus::Open,
            },
            ProjectEntry {
                path: "stores.json".into(),
                name: "Stores".into(),
                status: ProjectStatus::Closed,
            },
        ]
    );

    let reopened = workspace_in(dir.path(), ScriptedPresentation::new());
    assert_eq!(reopened.name(), "Shop");
    assert_eq!(reopened.description(), Some("Everything for sale"));
    let pets = reopened.project_by_name("Pets").unwrap();
    assert!(pets.open);
    assert_eq!(pets.services[0].name, "Pets API");
    let stores = reopened.project_by_name("Stores").unwrap();
    assert!(!stores.open);
    assert!(stores.services.is_empty());
}

#[test]
fn test_close_on_startup_loads_everything_closed() {
    let dir = TempDir::new().unwrap();
    project_file(dir.path(), "Pets");
    let mut config = WorkspaceConfig::new("Lazy");
    config.settings.close_projects_on_startup = true;
    config.projects.push(ProjectEntry {
        path: "pets.json".into(),
        name: "Pets".into(),
        status: ProjectStatus::Open,
    });
    config.write_to_file(dir.path().join("workspace.json")).unwrap();

    let workspace = workspace_in(dir.path(), ScriptedPresentation::new());

    assert_eq!(workspace.project_count(), 1);
    assert!(workspace.open_projects().is_empty());
}

#[test]
fn test_unreadable_project_is_skipped() {
    let dir = TempDir::new().unwrap();
    project_file(dir.path(), "Pets");
    let mut config = WorkspaceConfig::new("Partial");
    for name in ["Pets", "Gone"] {
        config.projects.push(ProjectEntry {
            path: format!("{}.json", name.to_lowercase()),
            name: name.into(),
            status: ProjectStatus::Open,
        });
    }
    config.write_to_file(dir.path().join("workspace.json")).unwrap();

    let workspace = workspace_in(dir.path(), ScriptedPresentation::new());

    assert_eq!(workspace.project_count(), 1);
    assert_eq!(workspace.project_at(0).unwrap().name, "Pets");
}

#[test]
fn test_project_root_overrides_workspace_directory() {
    let dir = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    project_file(root.path(), "Pets");
    let mut config = WorkspaceConfig::new("Rooted");
    config.project_root = Some(root.path().to_string_lossy().into_owned());
    config.projects.push(ProjectEntry {
        path: "pets.json".into(),
        name: "Pets".into(),
        status: ProjectStatus::Open,
    });
    config.write_to_file(dir.path().join("workspace.json")).unwrap();

    let workspace = workspace_in(dir.path(), ScriptedPresentation::new());

    assert_eq!(workspace.project_count(), 1);
    assert_eq!(
        workspace.project_root(),
        Some(root.path().to_string_lossy().as_ref())
    );
}

#[test]
fn test_project_root_persists_and_names_index_projects() {
    let dir = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    let root_path = root.path().to_string_lossy().into_owned();
    project_file(root.path(), "Pets");
    project_file(root.path(), "Stores");

    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new());
    workspace.set_project_root(Some(root_path.clone()));
    workspace.import_project(root.path().join("pets.json")).unwrap();
    workspace.import_project(root.path().join("stores.json")).unwrap();
    assert_eq!(workspace.save(true), SaveStatus::Success);

    let reopened = workspace_in(dir.path(), ScriptedPresentation::new());
    let by_name = reopened.projects_by_name();
    assert_eq!(by_name.len(), 2);
    assert!(by_name.contains_key("Pets"));
    assert!(by_name.contains_key("Stores"));
    assert_eq!(reopened.project_root(), Some(root_path.as_str()));
}

#[test]
fn test_invalid_workspace_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workspace.json");
    std::fs::write(&path, "this is not a workspace").unwrap();

    let err = Workspace::open(
        &path,
        Box::new(JsonProjectFactory),
        Box::new(ScriptedPresentation::new()),
    )
    .err()
    .unwrap();

    assert!(matches!(err, WorkspaceError::InvalidWorkspace { .. }));
}

#[test]
fn test_failed_load_keeps_current_state() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "not json").unwrap();
    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new());
    workspace.set_name("Current");
    workspace.add_project(Project::new("Pets")).unwrap();

    let err = workspace.load(&bad).unwrap_err();

    assert!(matches!(err, WorkspaceError::InvalidWorkspace { .. }));
    assert_eq!(workspace.project_count(), 1);
    assert_eq!(workspace.project_at(0).unwrap().name, "Pets");
    assert_eq!(workspace.name(), "Current");
    assert_eq!(
        workspace.path(),
        Some(dir.path().join("workspace.json").as_path())
    );
}
