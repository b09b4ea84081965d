//! Strata Structure Builders
//!
//! Immutable builders for the navigable lists of a content studio's
//! structure tree, plus serialization into plain descriptors and async
//! child resolution on item activation.
//!
//! # Core Concepts
//!
//! - [`DocumentListBuilder`]: clone-on-write list configuration; deriving
//!   a builder runs schema-type and template inference
//! - [`DocumentTypeListBuilder`]: a list bound to exactly one type, with
//!   default-intent-handler discipline on child overrides
//! - [`DocumentList`]: the finalized, validated descriptor the navigation
//!   UI consumes
//! - [`Child`] / [`ChildResolver`]: async resolution of the next pane for
//!   an activated item
//! - [`StructureContext`]: collaborator wiring (templates, new-document
//!   options, document-type lookup) and the explicit default API version
//!
//! # Example
//!
//! ```rust
//! use strata_structure::{DocumentListBuilder, SerializeOptions, StructureContext};
//!
//! let context = StructureContext::default();
//! let list = DocumentListBuilder::new(context)
//!     .id("movies")
//!     .title("Movies")
//!     .filter(r#"_type == "movie""#)
//!     .serialize(&SerializeOptions::at_root())?;
//!
//! assert_eq!(list.schema_type_name.as_deref(), Some("movie"));
//! # Ok::<(), strata_structure::SerializeError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod child;
mod context;
mod document;
mod document_type_list;
mod error;
mod intent;
mod list;
mod nodes;
mod sort;
mod templates;

pub use child::{Child, ChildResolver, ChildResolverOptions, DefaultItemChildResolver};
pub use context::{
    DocumentTypeResolver, NewDocumentOptionsResolver, StructureContext, StructureContextBuilder,
    DEFAULT_API_VERSION,
};
pub use document::{DocumentBuilder, DocumentNode, PartialDocumentNode};
pub use document_type_list::DocumentTypeListBuilder;
pub use error::{
    ConfigurationError, HelpTag, ResolveError, SerializeError, SerializeErrorKind, HELP_URL_BASE,
};
pub use intent::{IntentChecker, IntentHandlerIdentity, IntentParams};
pub use list::{DocumentListBuilder, PartialDocumentList, SIMPLE_TYPE_FILTER};
pub use nodes::{
    DocumentList, DocumentListOptions, NodeType, PathSegment, SerializeId, SerializeOptions,
    SerializePath,
};
pub use sort::{SortDirection, SortOrderingItem};
pub use templates::{find_template, InitialValueTemplate, InitialValueTemplateItem};

pub use strata_filter::FilterParams;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
