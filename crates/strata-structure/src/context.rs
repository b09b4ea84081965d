//! Structure context
//!
//! Owns the collaborators and configuration the builders need: the
//! template registry, the new-document-options resolver, the async
//! document-type resolver, and the default API version. The API version is
//! explicit configuration passed in at construction, not ambient state.

use std::fmt;
use std::sync::Arc;

use crate::document::DocumentBuilder;
use crate::error::ResolveError;
use crate::templates::{find_template, InitialValueTemplate, InitialValueTemplateItem};

/// API version used when a list does not set one explicitly
pub const DEFAULT_API_VERSION: &str = "2024-03-12";

/// Resolves new-document options for a schema type
///
/// Consulted when a list infers its initial-value templates.
pub trait NewDocumentOptionsResolver: Send + Sync {
    /// Template items offered for creating a document of `type_name`
    fn options_for_type(&self, type_name: &str) -> Vec<InitialValueTemplateItem>;
}

/// Resolves the schema type of an existing document
///
/// Network-backed in production; callers must treat resolution as
/// asynchronous. `Ok(None)` means the document's type could not be
/// determined, which downstream code treats as a degraded (non-fatal)
/// state.
#[async_trait::async_trait]
pub trait DocumentTypeResolver: Send + Sync {
    /// Schema type of the document with the given published id
    async fn resolve_type(&self, document_id: &str) -> Result<Option<String>, ResolveError>;
}

/// Default new-document-options resolver backed by the template registry
///
/// Offers every registered template whose schema type matches.
struct RegistryNewDocumentOptions {
    templates: Arc<[InitialValueTemplate]>,
}

impl NewDocumentOptionsResolver for RegistryNewDocumentOptions {
    fn options_for_type(&self, type_name: &str) -> Vec<InitialValueTemplateItem> {
        self.templates
            .iter()
            .filter(|template| template.schema_type_name == type_name)
            .map(InitialValueTemplateItem::from_template)
            .collect()
    }
}

/// Default document-type resolver that knows no documents
struct UnknownDocumentTypes;

#[async_trait::async_trait]
impl DocumentTypeResolver for UnknownDocumentTypes {
    async fn resolve_type(&self, _document_id: &str) -> Result<Option<String>, ResolveError> {
        Ok(None)
    }
}

/// Collaborator wiring and configuration for structure building
///
/// Cheap to clone; builders carry one and every derived builder shares it.
#[derive(Clone)]
pub struct StructureContext {
    templates: Arc<[InitialValueTemplate]>,
    default_api_version: String,
    new_document_options: Arc<dyn NewDocumentOptionsResolver>,
    document_types: Arc<dyn DocumentTypeResolver>,
}

impl StructureContext {
    /// Start building a context
    #[inline]
    #[must_use]
    pub fn builder() -> StructureContextBuilder {
        StructureContextBuilder::new()
    }

    /// The template registry, in registration order
    #[inline]
    #[must_use]
    pub fn templates(&self) -> &[InitialValueTemplate] {
        &self.templates
    }

    /// Look up a template by id
    #[inline]
    #[must_use]
    pub fn template(&self, id: &str) -> Option<&InitialValueTemplate> {
        find_template(&self.templates, id)
    }

    /// API version applied when a list sets none
    #[inline]
    #[must_use]
    pub fn default_api_version(&self) -> &str {
        &self.default_api_version
    }

    /// New-document options for a schema type
    #[must_use]
    pub fn new_document_options(&self, type_name: &str) -> Vec<InitialValueTemplateItem> {
        self.new_document_options.options_for_type(type_name)
    }

    /// Resolve the schema type of a document by id
    ///
    /// Draft ids resolve to their published document's type.
    pub async fn resolve_document_type(
        &self,
        document_id: &str,
    ) -> Result<Option<String>, ResolveError> {
        let published_id = document_id.strip_prefix("drafts.").unwrap_or(document_id);
        self.document_types.resolve_type(published_id).await
    }

    /// Canonical editor pane for a typed document
    #[must_use]
    pub fn resolve_document_node(&self, schema_type: &str, document_id: &str) -> DocumentBuilder {
        DocumentBuilder::new()
            .id(document_id)
            .document_id(document_id)
            .schema_type(schema_type)
    }
}

impl Default for StructureContext {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for StructureContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureContext")
            .field("templates", &self.templates.len())
            .field("default_api_version", &self.default_api_version)
            .finish_non_exhaustive()
    }
}

/// Builder for [`StructureContext`]
pub struct StructureContextBuilder {
    templates: Vec<InitialValueTemplate>,
    default_api_version: String,
    new_document_options: Option<Arc<dyn NewDocumentOptionsResolver>>,
    document_types: Option<Arc<dyn DocumentTypeResolver>>,
}

impl StructureContextBuilder {
    /// Empty builder with the system default API version
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
            default_api_version: DEFAULT_API_VERSION.to_string(),
            new_document_options: None,
            document_types: None,
        }
    }

    /// Set the template registry
    #[must_use]
    pub fn templates(mut self, templates: Vec<InitialValueTemplate>) -> Self {
        self.templates = templates;
        self
    }

    /// Override the default API version
    #[must_use]
    pub fn default_api_version(mut self, version: impl Into<String>) -> Self {
        self.default_api_version = version.into();
        self
    }

    /// Install a custom new-document-options resolver
    #[must_use]
    pub fn new_document_options(mut self, resolver: Arc<dyn NewDocumentOptionsResolver>) -> Self {
        self.new_document_options = Some(resolver);
        self
    }

    /// Install a document-type resolver
    #[must_use]
    pub fn document_types(mut self, resolver: Arc<dyn DocumentTypeResolver>) -> Self {
        self.document_types = Some(resolver);
        self
    }

    /// Assemble the context
    ///
    /// Missing collaborators get no-op defaults: new-document options are
    /// derived from the template registry, and unknown document types
    /// resolve to `None`.
    #[must_use]
    pub fn build(self) -> StructureContext {
        let templates: Arc<[InitialValueTemplate]> = self.templates.into();
        let new_document_options = self.new_document_options.unwrap_or_else(|| {
            Arc::new(RegistryNewDocumentOptions {
                templates: Arc::clone(&templates),
            })
        });
        let document_types = self
            .document_types
            .unwrap_or_else(|| Arc::new(UnknownDocumentTypes));

        StructureContext {
            templates,
            default_api_version: self.default_api_version,
            new_document_options,
            document_types,
        }
    }
}

impl Default for StructureContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
