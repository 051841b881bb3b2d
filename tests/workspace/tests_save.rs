//! Save outcomes driven by user prompts.

use rstest::rstest;
use tempfile::TempDir;
use wadlsync::host::ScriptedPresentation;
use wadlsync::workspace::{
    JsonProjectFactory, Project, ProjectFactory, SaveStatus, Workspace, WorkspaceConfig,
};

use crate::helpers::{project_file, workspace_in};

fn saved_entries(dir: &TempDir) -> Vec<String> {
    WorkspaceConfig::read_from_file(dir.path().join("workspace.json"))
        .unwrap()
        .projects
        .into_iter()
        .map(|entry| entry.path)
        .collect()
}

#[test]
fn test_unsaved_workspace_asks_for_a_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("chosen.json");
    let presentation = ScriptedPresentation::new().choose_file(Some(target.clone()));
    let mut workspace = Workspace::new(Box::new(JsonProjectFactory), Box::new(presentation));

    assert_eq!(workspace.save(true), SaveStatus::Success);
    assert!(target.exists());
    assert_eq!(workspace.path(), Some(target.as_path()));
}

#[test]
fn test_cancelled_file_prompt_cancels_save() {
    let mut workspace = Workspace::new(
        Box::new(JsonProjectFactory),
        Box::new(ScriptedPresentation::new()),
    );

    assert_eq!(workspace.save(true), SaveStatus::Cancelled);
    assert_eq!(workspace.path(), None);
}

#[rstest]
#[case::cancel(None, SaveStatus::Cancelled)]
#[case::dont_save(Some(false), SaveStatus::Success)]
fn test_unsaved_project_prompt(#[case] answer: Option<bool>, #[case] expected: SaveStatus) {
    let dir = TempDir::new().unwrap();
    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new().answer(answer));
    workspace.add_project(Project::new("Draft")).unwrap();

    assert_eq!(workspace.save(false), expected);
    assert_eq!(workspace.project_at(0).unwrap().path, None);
    match expected {
        SaveStatus::Cancelled => assert!(!dir.path().join("workspace.json").exists()),
        _ => assert!(saved_entries(&dir).is_empty()),
    }
}

#[test]
fn test_unsaved_project_saved_where_chosen() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("draft.json");
    let presentation = ScriptedPresentation::new()
        .answer(Some(true))
        .choose_file(Some(target.clone()));
    let mut workspace = workspace_in(dir.path(), presentation);
    workspace.add_project(Project::new("Draft")).unwrap();

    assert_eq!(workspace.save(false), SaveStatus::Success);
    assert!(target.exists());
    assert_eq!(saved_entries(&dir), vec!["draft.json"]);
}

#[test]
fn test_workspace_only_save_skips_projects() {
    let dir = TempDir::new().unwrap();
    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new().answer(None));
    workspace.add_project(Project::new("Draft")).unwrap();

    assert_eq!(workspace.save(true), SaveStatus::Success);
}

#[rstest]
#[case::workspace_only(false, SaveStatus::Success)]
#[case::with_projects(true, SaveStatus::Cancelled)]
fn test_close_honours_auto_save(#[case] auto_save: bool, #[case] expected: SaveStatus) {
    let dir = TempDir::new().unwrap();
    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new().answer(None));
    workspace.settings_mut().auto_save_projects_on_exit = auto_save;
    workspace.add_project(Project::new("Draft")).unwrap();

    assert_eq!(workspace.on_close(), expected);
}

#[test]
fn test_create_project_overwrites_when_confirmed() {
    let dir = TempDir::new().unwrap();
    let path = project_file(dir.path(), "Pets");
    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new().answer(Some(true)));

    let id = workspace.create_project("Fresh", Some(&path)).unwrap().unwrap();

    assert_eq!(workspace.project(id).unwrap().path.as_deref(), Some(path.as_path()));
    let written = JsonProjectFactory.create(Some(&path), true, None).unwrap();
    assert_eq!(written.name, "Fresh");
    assert!(written.services.is_empty());
}

#[test]
fn test_create_project_cancelled_leaves_file() {
    let dir = TempDir::new().unwrap();
    let path = project_file(dir.path(), "Pets");
    let mut workspace = workspace_in(dir.path(), ScriptedPresentation::new().answer(None));

    assert_eq!(workspace.create_project("Fresh", Some(&path)).unwrap(), None);

    assert_eq!(workspace.project_count(), 0);
    let kept = JsonProjectFactory.create(Some(&path), true, None).unwrap();
    assert_eq!(kept.name, "Pets");
}

#[test]
fn test_create_project_in_another_file() {
    let dir = TempDir::new().unwrap();
    let path = project_file(dir.path(), "Pets");
    let other = dir.path().join("fresh.json");
    let presentation = ScriptedPresentation::new()
        .answer(Some(false))
        .choose_file(Some(other.clone()));
    let mut workspace = workspace_in(dir.path(), presentation);

    let id = workspace.create_project("Fresh", Some(&path)).unwrap().unwrap();

    assert_eq!(workspace.project(id).unwrap().path.as_deref(), Some(other.as_path()));
    assert!(other.exists());
    let kept = JsonProjectFactory.create(Some(&path), true, None).unwrap();
    assert_eq!(kept.name, "Pets");
}

#[test]
fn test_new_project_uses_chosen_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("orders.json");
    let presentation = ScriptedPresentation::new().choose_file(Some(target.clone()));
    let mut workspace = workspace_in(dir.path(), presentation);

    let id = workspace.new_project("Orders").unwrap();
    assert!(id.is_some());
    assert!(target.exists());

    assert_eq!(workspace.new_project("Ignored").unwrap(), None);
    assert_eq!(workspace.project_count(), 1);
}
