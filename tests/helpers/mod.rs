//! Shared fixtures for integration tests.

pub mod fixtures;

use std::path::{Path, PathBuf};

use wadlsync::host::ScriptedPresentation;
use wadlsync::reconcile::{ChangeLog, ReconcileOptions, Reconciler};
use wadlsync::tree::RestService;
use wadlsync::wadl::{DescriptionDocument, MemorySource, read_wadl};
use wadlsync::workspace::{JsonProjectFactory, Project, ProjectFactory, Workspace};

// ── Reconciliation ──────────────────────────────────────────────

/// Parse a fixture, panicking with the reader error on failure.
pub fn document(xml: &str) -> DescriptionDocument {
    read_wadl(xml.as_bytes(), Some(fixtures::ROOT_URI)).expect("fixture should parse")
}

/// Run one reconciliation of `service` against `xml` with default options.
pub fn reconcile(service: &mut RestService, xml: &str) -> ChangeLog {
    reconcile_with(service, xml, &MemorySource::new())
}

/// Like [`reconcile`], resolving remote hrefs through `source`.
pub fn reconcile_with(service: &mut RestService, xml: &str, source: &MemorySource) -> ChangeLog {
    let document = document(xml);
    let options = ReconcileOptions::default();
    Reconciler::new(&document, source, &options)
        .apply(service)
        .expect("reconciliation should succeed")
}

// ── Workspaces ──────────────────────────────────────────────────

/// Open (or start) `workspace.json` in `dir` with JSON projects.
pub fn workspace_in(dir: &Path, presentation: ScriptedPresentation) -> Workspace {
    Workspace::open(
        dir.join("workspace.json"),
        Box::new(JsonProjectFactory),
        Box::new(presentation),
    )
    .expect("workspace should open")
}

/// Write an open project file called `name` into `dir`.
pub fn project_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(format!("{}.json", name.to_lowercase()));
    let mut project = Project::new(name).with_path(&path);
    project.services.push(RestService::new(format!("{name} API")));
    JsonProjectFactory
        .save(&project)
        .expect("project should save");
    path
}
