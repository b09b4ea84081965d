//! Document type list builder
//!
//! Specialization binding a list to exactly one schema type. Wraps the
//! generic [`DocumentListBuilder`] by composition and adds the
//! default-intent-handler discipline: overriding the child clears the
//! intent handler only while it is still the system default, so
//! caller-supplied intent wiring is never destroyed.

use crate::child::Child;
use crate::context::StructureContext;
use crate::error::{ConfigurationError, SerializeError};
use crate::intent::IntentChecker;
use crate::list::{DocumentListBuilder, PartialDocumentList, SIMPLE_TYPE_FILTER};
use crate::nodes::{DocumentList, SerializeOptions};
use crate::sort::SortOrderingItem;
use strata_filter::FilterParams;

/// Immutable builder for a list scoped to one document type
#[derive(Debug, Clone)]
pub struct DocumentTypeListBuilder {
    inner: DocumentListBuilder,
}

impl DocumentTypeListBuilder {
    /// Empty type list builder
    #[inline]
    #[must_use]
    pub fn new(context: StructureContext) -> Self {
        Self {
            inner: DocumentListBuilder::new(context),
        }
    }

    /// The canonical list of all documents of one type
    ///
    /// Uses the trivial `_type == $type` filter with the type bound as a
    /// parameter, and installs the default intent handler for `edit` and
    /// `create` intents targeting the type.
    #[must_use]
    pub fn documents_of_type(context: StructureContext, type_name: impl Into<String>) -> Self {
        let name = type_name.into();
        let mut params = FilterParams::new();
        params.insert("type".to_string(), serde_json::Value::String(name.clone()));

        let inner = DocumentListBuilder::new(context)
            .id(&name)
            .title(&name)
            .filter(SIMPLE_TYPE_FILTER)
            .params(params)
            .schema_type(&name)
            .can_handle_intent(IntentChecker::default_for_type(name));

        Self { inner }
    }

    /// Set the node id
    #[must_use]
    pub fn id(&self, id: impl Into<String>) -> Self {
        Self {
            inner: self.inner.id(id),
        }
    }

    /// Set the display title
    #[must_use]
    pub fn title(&self, title: impl Into<String>) -> Self {
        Self {
            inner: self.inner.title(title),
        }
    }

    /// Set the filter fragment
    #[must_use]
    pub fn filter(&self, filter: impl Into<String>) -> Self {
        Self {
            inner: self.inner.filter(filter),
        }
    }

    /// Set the filter parameters
    #[must_use]
    pub fn params(&self, params: FilterParams) -> Self {
        Self {
            inner: self.inner.params(params),
        }
    }

    /// Set the API version
    #[must_use]
    pub fn api_version(&self, api_version: impl Into<String>) -> Self {
        Self {
            inner: self.inner.api_version(api_version),
        }
    }

    /// Bind the schema type explicitly
    #[must_use]
    pub fn schema_type(&self, schema_type_name: impl Into<String>) -> Self {
        Self {
            inner: self.inner.schema_type(schema_type_name),
        }
    }

    /// Set the default sort ordering
    ///
    /// # Errors
    /// Same contract as [`DocumentListBuilder::default_ordering`].
    pub fn default_ordering(
        &self,
        ordering: Vec<SortOrderingItem>,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            inner: self.inner.default_ordering(ordering)?,
        })
    }

    /// Set a caller-supplied intent predicate
    #[must_use]
    pub fn can_handle_intent(&self, checker: IntentChecker) -> Self {
        Self {
            inner: self.inner.can_handle_intent(checker),
        }
    }

    /// Override the child node or resolver
    ///
    /// Routed through [`Self::clone_without_default_intent_handler`]: a
    /// still-default intent handler is cleared so it cannot keep answering
    /// intents for panes the custom child no longer produces.
    #[must_use]
    pub fn child(&self, child: impl Into<Child>) -> Self {
        self.clone_without_default_intent_handler(PartialDocumentList {
            child: Some(child.into()),
            ..PartialDocumentList::default()
        })
    }

    /// Derive a new builder with overrides merged over the current spec
    #[must_use]
    pub fn clone_with(&self, overrides: PartialDocumentList) -> Self {
        Self {
            inner: self.inner.clone_with(overrides),
        }
    }

    /// Derive a new builder, stripping a still-default intent handler
    ///
    /// Merge precedence is current spec, then explicit overrides, with the
    /// conditional clear applied last; it fires only when the handler
    /// before the merge is the system default and the overrides do not
    /// re-supply one.
    #[must_use]
    pub fn clone_without_default_intent_handler(&self, overrides: PartialDocumentList) -> Self {
        let current_is_default = self
            .inner
            .spec
            .can_handle_intent
            .as_ref()
            .is_some_and(IntentChecker::is_default);
        let override_supplies_handler = overrides.can_handle_intent.is_some();

        let mut inner = self.inner.clone_with(overrides);
        if current_is_default && !override_supplies_handler {
            inner.spec.can_handle_intent = None;
        }

        Self { inner }
    }

    /// Validate and freeze into a [`DocumentList`] descriptor
    ///
    /// # Errors
    /// Same contract as [`DocumentListBuilder::serialize`].
    pub fn serialize(&self, options: &SerializeOptions) -> Result<DocumentList, SerializeError> {
        self.inner.serialize(options)
    }

    /// View this builder as the generic list builder it wraps
    #[inline]
    #[must_use]
    pub fn as_document_list(&self) -> &DocumentListBuilder {
        &self.inner
    }
}
