//! Reconciliation tests
//!
//! End-to-end runs of WADL documents against resource trees:
//! - Prune and merge of resources
//! - Method matching and representation policies
//! - Href resolution across documents
//! - Service-level update action

pub mod tests_references;
