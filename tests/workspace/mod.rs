//! Workspace tests
//!
//! Workspace file persistence, project lifecycle, listener fan-out and
//! save prompts, using temporary directories.

pub mod tests_lifecycle;
pub mod tests_persistence;
pub mod tests_save;
