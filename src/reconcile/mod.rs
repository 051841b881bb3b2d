//! Definition-driven reconciliation of a resource tree.
//!
//! A run has two passes over the live tree:
//!
//! 1. **Prune**: top-level resources missing from the definition are
//!    deleted, and so are missing direct children of the ones that remain.
//! 2. **Merge**: every described resource is matched by path (or created),
//!    then its params, methods and resource types are applied. Methods are
//!    matched by display name.
//!
//! Each structural change is recorded in a [`ChangeLog`].

mod changes;
mod engine;
mod merge;
pub mod params;
mod prune;
mod update;

pub use changes::{Change, ChangeLog};
pub use engine::{ReconcileError, ReconcileOptions, Reconciler, Reconciliation, reconcile_service};
pub use params::extract_params;
pub use update::{DefinitionUpdater, UPDATE_REPORT_TITLE};
