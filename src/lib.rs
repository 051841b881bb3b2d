//! # wadl-sync
//!
//! WADL import and resource-tree reconciliation, with workspace and project
//! persistence.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! workspace → Projects list, workspace file, lifecycle events
//!   ↓
//! reconcile → Prune + merge a definition into a resource tree, change log
//!   ↓
//! wadl      → WADL reader, document sources, href resolution
//!   ↓
//! tree      → RestService / RestResource / RestMethod / params
//!   ↓
//! base      → Primitives (QName, ParamStyle, href/URI helpers)
//! ```
//!
//! `host` (prompts and messages) and `telemetry` (usage analytics) are
//! collaborators injected where they are needed.
//!
//! ## Quick start
//!
//! ```ignore
//! use wadlsync::reconcile::DefinitionUpdater;
//! use wadlsync::tree::RestService;
//! use wadlsync::wadl::UriSource;
//!
//! let mut service = RestService::new("Pet Store");
//! let changes = DefinitionUpdater::new(&UriSource)
//!     .update_from_definition(&mut service, "https://example.com/pets.wadl")?;
//! print!("{changes}");
//! ```

// ============================================================================
// MODULES (dependency order: base → tree → wadl → reconcile → workspace)
// ============================================================================

/// Foundation types: qualified names, parameter styles, URI helpers
pub mod base;

/// The live resource tree of a REST service
pub mod tree;

/// WADL documents: reading, sources, reference resolution
pub mod wadl;

/// Reconciliation of a resource tree with a WADL document
pub mod reconcile;

/// Workspace and project persistence
pub mod workspace;

/// Presentation collaborator: messages and prompts
pub mod host;

/// Usage analytics dispatch
pub mod telemetry;

// Re-export foundation types
pub use base::{ParamStyle, QName};
