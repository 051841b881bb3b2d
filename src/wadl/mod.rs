//! WADL definition documents.
//!
//! - [`reader`]: streaming XML reader producing a [`DescriptionDocument`]
//! - [`source`]: where document bytes come from ([`DocumentSource`])
//! - [`resolve`]: href resolution across documents with a per-call cache

mod error;
pub mod model;
pub mod reader;
pub mod resolve;
pub mod source;

pub use error::WadlError;
pub use model::{
    DescriptionDocument, Doc, LegacyFault, MethodDescriptor, ParamDescriptor,
    RepresentationDescriptor, RequestDescriptor, ResourceDescriptor, ResourceGroup,
    ResourceTypeDescriptor, ResponseDescriptor, WadlVersion, first_title,
};
pub use reader::read_wadl;
pub use resolve::{ReferenceResolver, Referenceable};
pub use source::{DocumentSource, MemorySource, UriSource, load_document};
