//! Foundation types shared by the definition model and the resource tree.
//!
//! - [`QName`] - Namespace-qualified names (`element`, `type` attributes)
//! - [`ParamStyle`] - How a parameter is carried in a request
//! - [`uri`] - Href and document URI helpers
//!
//! This module has NO dependencies on other wadlsync modules.

mod qname;
mod style;
pub mod uri;

pub use qname::QName;
pub use style::ParamStyle;
