//! Child resolution
//!
//! When the user activates an item in a finalized list, the navigation UI
//! asks the list's [`Child`] for the next pane. A child is either an eager
//! document builder or an async [`ChildResolver`]; the default resolver
//! infers the item's schema type and falls back to an untyped editor
//! placeholder when nothing can be determined.

use std::fmt;
use std::sync::Arc;

use crate::context::StructureContext;
use crate::document::DocumentBuilder;
use crate::error::ResolveError;
use crate::nodes::DocumentList;
use strata_filter::FilterParams;

/// Resolution context handed to a child resolver
#[derive(Debug, Clone, Default)]
pub struct ChildResolverOptions {
    /// Schema type the parent list is bound to, if any
    pub schema_type_name: Option<String>,
    /// Route parameters (`template`, ...) for the activation
    pub params: FilterParams,
}

impl ChildResolverOptions {
    /// Options with no parent type and no parameters
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for an item inside a finalized list
    #[must_use]
    pub fn for_list(list: &DocumentList) -> Self {
        Self {
            schema_type_name: list.schema_type_name.clone(),
            params: FilterParams::new(),
        }
    }

    /// Add a string route parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .insert(key.into(), serde_json::Value::String(value.into()));
        self
    }

    fn template_param(&self) -> Option<&str> {
        self.params.get("template").and_then(serde_json::Value::as_str)
    }
}

/// Resolves the next navigation node for an activated list item
#[async_trait::async_trait]
pub trait ChildResolver: Send + Sync {
    /// Resolve the pane for `item_id`
    ///
    /// # Errors
    /// Collaborator failures propagate as [`ResolveError`]; an
    /// undeterminable schema type is *not* an error (the resolver returns
    /// the untyped placeholder instead).
    async fn resolve(
        &self,
        item_id: &str,
        options: &ChildResolverOptions,
    ) -> Result<DocumentBuilder, ResolveError>;
}

/// Child of a structure node: an eager pane or a resolver
#[derive(Clone)]
pub enum Child {
    /// Fixed document pane
    Document(DocumentBuilder),
    /// Resolver invoked per activated item
    Resolver(Arc<dyn ChildResolver>),
}

impl Child {
    /// Wrap a resolver
    #[must_use]
    pub fn resolver(resolver: impl ChildResolver + 'static) -> Self {
        Self::Resolver(Arc::new(resolver))
    }

    /// Resolve the child pane for an item
    ///
    /// # Errors
    /// Propagates resolver failures; eager children never fail.
    pub async fn resolve(
        &self,
        item_id: &str,
        options: &ChildResolverOptions,
    ) -> Result<DocumentBuilder, ResolveError> {
        match self {
            Self::Document(builder) => Ok(builder.clone()),
            Self::Resolver(resolver) => resolver.resolve(item_id, options).await,
        }
    }
}

impl fmt::Debug for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document(builder) => f.debug_tuple("Document").field(builder).finish(),
            Self::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

impl From<DocumentBuilder> for Child {
    fn from(builder: DocumentBuilder) -> Self {
        Self::Document(builder)
    }
}

/// Default child resolver installed by list serialization
///
/// Type inference order: a template named in the route parameters, then
/// the parent list's bound type, then the async document-type
/// collaborator. No type at all yields the untyped editor placeholder.
pub struct DefaultItemChildResolver {
    context: StructureContext,
}

impl DefaultItemChildResolver {
    /// Resolver using the given context's collaborators
    #[inline]
    #[must_use]
    pub fn new(context: StructureContext) -> Self {
        Self { context }
    }
}

#[async_trait::async_trait]
impl ChildResolver for DefaultItemChildResolver {
    async fn resolve(
        &self,
        item_id: &str,
        options: &ChildResolverOptions,
    ) -> Result<DocumentBuilder, ResolveError> {
        let template = options
            .template_param()
            .and_then(|id| self.context.template(id));

        let schema_type = match template {
            Some(template) => Some(template.schema_type_name.clone()),
            None => match &options.schema_type_name {
                Some(name) => Some(name.clone()),
                None => self.context.resolve_document_type(item_id).await?,
            },
        };

        Ok(match schema_type.filter(|name| !name.is_empty()) {
            Some(name) => self.context.resolve_document_node(&name, item_id),
            None => DocumentBuilder::new()
                .id("editor")
                .document_id(item_id)
                .schema_type(""),
        })
    }
}
