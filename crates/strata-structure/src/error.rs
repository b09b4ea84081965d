//! Error types for structure building
//!
//! Provides the full taxonomy for the builder surface:
//! - Configuration mistakes caught at the setter call site
//! - Serialization failures with enough context to localize the offending
//!   node in the navigation tree
//! - Child-resolution failures propagated from async collaborators

use crate::nodes::{SerializeId, SerializePath};

/// Base URL for authoring help articles
pub const HELP_URL_BASE: &str = "https://docs.strata.dev/help";

/// Help-article tag attached to structured errors and warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTag {
    /// A structure node is missing its `id`
    StructureNodeId,
    /// A document list is missing its `filter`
    DocumentListFilter,
    /// A full query was supplied where a filter was expected
    QueryProvidedForFilter,
    /// A custom filter was supplied without an explicit API version
    ApiVersionRequiredForCustomFilter,
    /// A document node is missing its `document_id`
    DocumentNodeDocumentId,
}

impl HelpTag {
    /// Stable slug used in help URLs
    #[inline]
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            Self::StructureNodeId => "structure-node-id-required",
            Self::DocumentListFilter => "document-list-filter-required",
            Self::QueryProvidedForFilter => "query-provided-for-filter",
            Self::ApiVersionRequiredForCustomFilter => {
                "api-version-required-for-custom-filter"
            }
            Self::DocumentNodeDocumentId => "document-node-document-id-required",
        }
    }

    /// Full help URL for this tag
    #[must_use]
    pub fn url(&self) -> String {
        format!("{HELP_URL_BASE}/{}", self.slug())
    }
}

/// Configuration errors raised at the setter call site
///
/// These fail fast, before any new builder state is produced; nothing is
/// silently coerced.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigurationError {
    /// A setter received a value it cannot accept
    #[error("invalid argument to `{method}`: {reason}")]
    InvalidArgument {
        /// The builder method that rejected the value
        method: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

/// The specific validation that failed during serialization
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializeErrorKind {
    /// Node has no usable `id`
    #[error("`id` is required for structure nodes")]
    MissingId,

    /// Document list has no `filter`
    #[error("`filter` is required for document lists")]
    MissingFilter,

    /// The filter text is a full query, not a filter fragment
    #[error("`filter` cannot start with `{leading}` - looks like you are providing a query, not a filter")]
    QueryProvidedForFilter {
        /// The offending leading character (`*` or `{`)
        leading: char,
    },

    /// Document node has no `document_id`
    #[error("`document_id` is required for document nodes")]
    MissingDocumentId,
}

impl SerializeErrorKind {
    /// Help tag attached to this failure
    #[inline]
    #[must_use]
    pub fn help_tag(&self) -> HelpTag {
        match self {
            Self::MissingId => HelpTag::StructureNodeId,
            Self::MissingFilter => HelpTag::DocumentListFilter,
            Self::QueryProvidedForFilter { .. } => HelpTag::QueryProvidedForFilter,
            Self::MissingDocumentId => HelpTag::DocumentNodeDocumentId,
        }
    }
}

/// Serialization failure with authoring context
///
/// Always carries the position in the navigation tree plus whatever node
/// identity was available, so the authoring layer can point at the broken
/// spec. Never retried: the spec must be corrected and re-submitted.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind} (path: {path}) - see {}", .kind.help_tag().url())]
pub struct SerializeError {
    /// What failed
    pub kind: SerializeErrorKind,
    /// Position in the navigation tree
    pub path: SerializePath,
    /// Node id (or parent-assigned index) when known
    pub id: Option<SerializeId>,
    /// Node title when known
    pub title: Option<String>,
}

impl SerializeError {
    /// Create a serialize error at a tree position
    #[inline]
    #[must_use]
    pub fn new(kind: SerializeErrorKind, path: SerializePath) -> Self {
        Self {
            kind,
            path,
            id: None,
            title: None,
        }
    }

    /// Attach the node id (or index stand-in)
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<SerializeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach the node title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Help URL for this failure
    #[inline]
    #[must_use]
    pub fn help_url(&self) -> String {
        self.kind.help_tag().url()
    }
}

/// Child-resolution failures
///
/// Collaborator errors propagate unchanged; resolving to an untyped
/// placeholder node is deliberately *not* an error.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The document-type collaborator failed to answer
    #[error("document type lookup failed for `{document_id}`: {source}")]
    TypeLookup {
        /// Id of the document being resolved
        document_id: String,
        /// Underlying collaborator failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Serializing the resolved child node failed
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

impl ResolveError {
    /// Wrap a collaborator failure for a document lookup
    #[inline]
    pub fn type_lookup(
        document_id: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::TypeLookup {
            document_id: document_id.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::PathSegment;

    #[test]
    fn help_tag_urls() {
        assert_eq!(
            HelpTag::StructureNodeId.url(),
            "https://docs.strata.dev/help/structure-node-id-required"
        );
        assert_eq!(
            HelpTag::QueryProvidedForFilter.slug(),
            "query-provided-for-filter"
        );
    }

    #[test]
    fn serialize_error_display_carries_help_url() {
        let err = SerializeError::new(
            SerializeErrorKind::MissingFilter,
            SerializePath::from(vec![PathSegment::Key("root".to_string())]),
        )
        .with_id(SerializeId::Key("movies".to_string()))
        .with_title("Movies");

        let text = err.to_string();
        assert!(text.contains("`filter` is required"));
        assert!(text.contains("document-list-filter-required"));
        assert_eq!(err.id, Some(SerializeId::Key("movies".to_string())));
    }

    #[test]
    fn query_error_names_leading_char() {
        let err = SerializeErrorKind::QueryProvidedForFilter { leading: '*' };
        assert!(err.to_string().contains('*'));
        assert_eq!(err.help_tag(), HelpTag::QueryProvidedForFilter);
    }

    #[test]
    fn configuration_error_display() {
        let err = ConfigurationError::InvalidArgument {
            method: "default_ordering",
            reason: "order clauses must name a field".to_string(),
        };
        assert!(err.to_string().contains("default_ordering"));
    }
}
