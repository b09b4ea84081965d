//! Document list builder
//!
//! The central clone-on-write builder: every setter returns a fresh
//! builder and leaves the receiver untouched, so deriving many lists from
//! one parent builder is safe by construction. Derivation runs the
//! inference hooks: single-type inference from the filter populates
//! `schema_type_name` while it is unset, and initial-value templates are
//! recomputed until the caller supplies them explicitly.

use std::sync::Arc;

use crate::child::{Child, DefaultItemChildResolver};
use crate::context::StructureContext;
use crate::error::{ConfigurationError, HelpTag, SerializeError, SerializeErrorKind};
use crate::intent::IntentChecker;
use crate::nodes::{DocumentList, DocumentListOptions, NodeType, SerializeId, SerializeOptions};
use crate::sort::SortOrderingItem;
use crate::templates::InitialValueTemplateItem;
use strata_filter::{single_type_from_filter, type_names_from_filter, FilterParams};

/// The trivial type-scoped filter; lists using it may rely on the default
/// API version without a deprecation warning.
pub const SIMPLE_TYPE_FILTER: &str = "_type == $type";

/// Accumulating, partially-valid list configuration
///
/// Also the override payload for [`DocumentListBuilder::clone_with`]:
/// `Some` fields win over the current spec.
#[derive(Debug, Clone, Default)]
pub struct PartialDocumentList {
    /// Node id
    pub id: Option<String>,
    /// Display title
    pub title: Option<String>,
    /// Explicitly bound or inferred schema type
    pub schema_type_name: Option<String>,
    /// Filter fragment selecting list members
    pub filter: Option<String>,
    /// Bindings for `$name` references in the filter
    pub params: Option<FilterParams>,
    /// API version the list queries with
    pub api_version: Option<String>,
    /// Default sort ordering
    pub default_ordering: Option<Vec<SortOrderingItem>>,
    /// Child node or resolver
    pub child: Option<Child>,
    /// New-document template references
    pub initial_value_templates: Option<Vec<InitialValueTemplateItem>>,
    /// Intent predicate
    pub can_handle_intent: Option<IntentChecker>,
}

impl PartialDocumentList {
    /// Merge overrides over this spec; `Some` override fields win
    #[must_use]
    pub fn merged_with(&self, overrides: PartialDocumentList) -> PartialDocumentList {
        PartialDocumentList {
            id: overrides.id.or_else(|| self.id.clone()),
            title: overrides.title.or_else(|| self.title.clone()),
            schema_type_name: overrides
                .schema_type_name
                .or_else(|| self.schema_type_name.clone()),
            filter: overrides.filter.or_else(|| self.filter.clone()),
            params: overrides.params.or_else(|| self.params.clone()),
            api_version: overrides.api_version.or_else(|| self.api_version.clone()),
            default_ordering: overrides
                .default_ordering
                .or_else(|| self.default_ordering.clone()),
            child: overrides.child.or_else(|| self.child.clone()),
            initial_value_templates: overrides
                .initial_value_templates
                .or_else(|| self.initial_value_templates.clone()),
            can_handle_intent: overrides
                .can_handle_intent
                .or_else(|| self.can_handle_intent.clone()),
        }
    }
}

/// Immutable builder for navigable document lists
#[derive(Debug, Clone)]
pub struct DocumentListBuilder {
    pub(crate) context: StructureContext,
    pub(crate) spec: PartialDocumentList,
    pub(crate) templates_specified: bool,
}

impl DocumentListBuilder {
    /// Empty builder over a context
    #[inline]
    #[must_use]
    pub fn new(context: StructureContext) -> Self {
        Self {
            context,
            spec: PartialDocumentList::default(),
            templates_specified: false,
        }
    }

    /// Builder seeded from an initial partial spec
    ///
    /// Templates present in the input count as explicitly supplied and are
    /// never recomputed by inference.
    #[must_use]
    pub fn from_spec(context: StructureContext, spec: PartialDocumentList) -> Self {
        let templates_specified = spec.initial_value_templates.is_some();
        Self {
            context,
            spec,
            templates_specified,
        }
        .clone_with(PartialDocumentList::default())
    }

    /// Set the node id
    #[must_use]
    pub fn id(&self, id: impl Into<String>) -> Self {
        self.clone_with(PartialDocumentList {
            id: Some(id.into()),
            ..PartialDocumentList::default()
        })
    }

    /// Get the node id
    #[inline]
    #[must_use]
    pub fn get_id(&self) -> Option<&str> {
        self.spec.id.as_deref()
    }

    /// Set the display title
    #[must_use]
    pub fn title(&self, title: impl Into<String>) -> Self {
        self.clone_with(PartialDocumentList {
            title: Some(title.into()),
            ..PartialDocumentList::default()
        })
    }

    /// Get the display title
    #[inline]
    #[must_use]
    pub fn get_title(&self) -> Option<&str> {
        self.spec.title.as_deref()
    }

    /// Set the API version
    #[must_use]
    pub fn api_version(&self, api_version: impl Into<String>) -> Self {
        self.clone_with(PartialDocumentList {
            api_version: Some(api_version.into()),
            ..PartialDocumentList::default()
        })
    }

    /// Get the API version
    #[inline]
    #[must_use]
    pub fn get_api_version(&self) -> Option<&str> {
        self.spec.api_version.as_deref()
    }

    /// Set the filter fragment
    ///
    /// Filters select members of the list; full queries (starting with `*`
    /// or `{`) are rejected at serialization.
    #[must_use]
    pub fn filter(&self, filter: impl Into<String>) -> Self {
        self.clone_with(PartialDocumentList {
            filter: Some(filter.into()),
            ..PartialDocumentList::default()
        })
    }

    /// Get the filter fragment
    #[inline]
    #[must_use]
    pub fn get_filter(&self) -> Option<&str> {
        self.spec.filter.as_deref()
    }

    /// Bind the schema type explicitly
    ///
    /// An explicitly bound type is never overwritten by filter inference.
    #[must_use]
    pub fn schema_type(&self, schema_type_name: impl Into<String>) -> Self {
        self.clone_with(PartialDocumentList {
            schema_type_name: Some(schema_type_name.into()),
            ..PartialDocumentList::default()
        })
    }

    /// Get the bound schema type
    #[inline]
    #[must_use]
    pub fn get_schema_type(&self) -> Option<&str> {
        self.spec.schema_type_name.as_deref()
    }

    /// Set the filter parameters
    #[must_use]
    pub fn params(&self, params: FilterParams) -> Self {
        self.clone_with(PartialDocumentList {
            params: Some(params),
            ..PartialDocumentList::default()
        })
    }

    /// Get the filter parameters
    #[inline]
    #[must_use]
    pub fn get_params(&self) -> Option<&FilterParams> {
        self.spec.params.as_ref()
    }

    /// Set the default sort ordering
    ///
    /// # Errors
    /// `InvalidArgument` when a clause names no field; no new builder state
    /// is produced on failure.
    pub fn default_ordering(
        &self,
        ordering: Vec<SortOrderingItem>,
    ) -> Result<Self, ConfigurationError> {
        if ordering.iter().any(|clause| clause.field.trim().is_empty()) {
            return Err(ConfigurationError::InvalidArgument {
                method: "default_ordering",
                reason: "every order clause must name a field".to_string(),
            });
        }

        Ok(self.clone_with(PartialDocumentList {
            default_ordering: Some(ordering),
            ..PartialDocumentList::default()
        }))
    }

    /// Get the default sort ordering
    #[inline]
    #[must_use]
    pub fn get_default_ordering(&self) -> Option<&[SortOrderingItem]> {
        self.spec.default_ordering.as_deref()
    }

    /// Set the child node or resolver
    #[must_use]
    pub fn child(&self, child: impl Into<Child>) -> Self {
        self.clone_with(PartialDocumentList {
            child: Some(child.into()),
            ..PartialDocumentList::default()
        })
    }

    /// Get the child
    #[inline]
    #[must_use]
    pub fn get_child(&self) -> Option<&Child> {
        self.spec.child.as_ref()
    }

    /// Supply the new-document templates explicitly
    ///
    /// Disables template inference for this builder and everything derived
    /// from it.
    #[must_use]
    pub fn initial_value_templates(&self, templates: Vec<InitialValueTemplateItem>) -> Self {
        self.clone_with(PartialDocumentList {
            initial_value_templates: Some(templates),
            ..PartialDocumentList::default()
        })
    }

    /// Get the new-document templates
    #[inline]
    #[must_use]
    pub fn get_initial_value_templates(&self) -> Option<&[InitialValueTemplateItem]> {
        self.spec.initial_value_templates.as_deref()
    }

    /// Set the intent predicate
    #[must_use]
    pub fn can_handle_intent(&self, checker: IntentChecker) -> Self {
        self.clone_with(PartialDocumentList {
            can_handle_intent: Some(checker),
            ..PartialDocumentList::default()
        })
    }

    /// Get the intent predicate
    #[inline]
    #[must_use]
    pub fn get_can_handle_intent(&self) -> Option<&IntentChecker> {
        self.spec.can_handle_intent.as_ref()
    }

    /// The accumulated spec
    #[inline]
    #[must_use]
    pub fn spec(&self) -> &PartialDocumentList {
        &self.spec
    }

    /// Derive a new builder with overrides merged over the current spec
    ///
    /// The central mutation primitive every setter routes through. After
    /// the merge, initial-value templates are recomputed unless they were
    /// ever explicitly supplied, and `schema_type_name` is populated by
    /// single-type filter inference while it remains unset.
    #[must_use]
    pub fn clone_with(&self, overrides: PartialDocumentList) -> Self {
        let templates_specified =
            self.templates_specified || overrides.initial_value_templates.is_some();
        let mut spec = self.spec.merged_with(overrides);

        if !templates_specified {
            spec.initial_value_templates = infer_initial_value_templates(&self.context, &spec);
        }
        if spec.schema_type_name.is_none() {
            spec.schema_type_name = infer_type_name(&spec);
        }

        Self {
            context: self.context.clone(),
            spec,
            templates_specified,
        }
    }

    /// Validate and freeze into a [`DocumentList`] descriptor
    ///
    /// Defaults the API version from the context when unset and warns when
    /// a non-trivial filter relies on that default. The returned descriptor
    /// is a plain value owned by the caller.
    ///
    /// # Errors
    /// `MissingId`, `MissingFilter`, or `QueryProvidedForFilter`, each
    /// carrying the tree path and whatever node identity was available.
    pub fn serialize(&self, options: &SerializeOptions) -> Result<DocumentList, SerializeError> {
        let spec = &self.spec;

        let Some(id) = spec.id.clone().filter(|id| !id.is_empty()) else {
            let mut err =
                SerializeError::new(SerializeErrorKind::MissingId, options.path.clone());
            if let Some(index) = options.index {
                err = err.with_id(SerializeId::Index(index));
            }
            if let Some(title) = &spec.title {
                err = err.with_title(title.clone());
            }
            return Err(err);
        };

        let Some(filter) = spec.filter.clone().filter(|f| !f.trim().is_empty()) else {
            let mut err =
                SerializeError::new(SerializeErrorKind::MissingFilter, options.path.clone())
                    .with_id(SerializeId::Key(id));
            if let Some(title) = &spec.title {
                err = err.with_title(title.clone());
            }
            return Err(err);
        };

        let filter = filter.trim().to_string();
        if let Some(leading @ ('*' | '{')) = filter.chars().next() {
            let mut err = SerializeError::new(
                SerializeErrorKind::QueryProvidedForFilter { leading },
                options.path.clone(),
            )
            .with_id(SerializeId::Key(id));
            if let Some(title) = &spec.title {
                err = err.with_title(title.clone());
            }
            return Err(err);
        }

        if filter != SIMPLE_TYPE_FILTER && spec.api_version.is_none() {
            tracing::warn!(
                filter = %filter,
                help = %HelpTag::ApiVersionRequiredForCustomFilter.url(),
                "no apiVersion specified for document list with custom filter; \
                 this will be required in a future release"
            );
        }

        Ok(DocumentList {
            node_type: NodeType::DocumentList,
            id,
            title: spec.title.clone(),
            schema_type_name: spec.schema_type_name.clone(),
            child: spec.child.clone().unwrap_or_else(|| {
                Child::Resolver(Arc::new(DefaultItemChildResolver::new(self.context.clone())))
            }),
            initial_value_templates: spec.initial_value_templates.clone().unwrap_or_default(),
            can_handle_intent: spec.can_handle_intent.clone(),
            options: DocumentListOptions {
                filter,
                params: spec.params.clone().unwrap_or_default(),
                api_version: spec
                    .api_version
                    .clone()
                    .unwrap_or_else(|| self.context.default_api_version().to_string()),
                default_ordering: spec.default_ordering.clone().unwrap_or_default(),
            },
        })
    }
}

fn infer_initial_value_templates(
    context: &StructureContext,
    spec: &PartialDocumentList,
) -> Option<Vec<InitialValueTemplateItem>> {
    let filter = spec.filter.as_deref().unwrap_or("");
    let empty = FilterParams::new();
    let params = spec.params.as_ref().unwrap_or(&empty);

    let type_names = match &spec.schema_type_name {
        Some(name) => vec![name.clone()],
        None => type_names_from_filter(filter, params),
    };
    if type_names.is_empty() {
        return None;
    }

    Some(
        type_names
            .iter()
            .flat_map(|name| context.new_document_options(name))
            .collect(),
    )
}

fn infer_type_name(spec: &PartialDocumentList) -> Option<String> {
    let filter = spec.filter.as_deref().unwrap_or("");
    let empty = FilterParams::new();
    let params = spec.params.as_ref().unwrap_or(&empty);
    single_type_from_filter(filter, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::InitialValueTemplate;
    use pretty_assertions::assert_eq;

    fn context() -> StructureContext {
        StructureContext::builder()
            .templates(vec![
                InitialValueTemplate::new("movie", "movie"),
                InitialValueTemplate::new("book", "book"),
            ])
            .build()
    }

    #[test]
    fn setters_return_new_builders() {
        let base = DocumentListBuilder::new(context()).id("movies");
        let derived = base.filter(r#"_type == "movie""#).title("Movies");

        assert_eq!(base.get_filter(), None);
        assert_eq!(base.get_title(), None);
        assert_eq!(derived.get_filter(), Some(r#"_type == "movie""#));
        assert_eq!(derived.get_id(), Some("movies"));
    }

    #[test]
    fn filter_inference_binds_single_type() {
        let builder = DocumentListBuilder::new(context()).filter(r#"_type == "movie""#);
        assert_eq!(builder.get_schema_type(), Some("movie"));
    }

    #[test]
    fn param_filter_inference() {
        let mut params = FilterParams::new();
        params.insert("type".to_string(), serde_json::json!("book"));
        let builder = DocumentListBuilder::new(context())
            .params(params)
            .filter("_type == $type");
        assert_eq!(builder.get_schema_type(), Some("book"));
    }

    #[test]
    fn multiple_candidates_leave_type_unset() {
        let membership =
            DocumentListBuilder::new(context()).filter(r#"_type in ["dog", "cat"]"#);
        assert_eq!(membership.get_schema_type(), None);

        let disjunction =
            DocumentListBuilder::new(context()).filter(r#"_type == "a" || _type == "b""#);
        assert_eq!(disjunction.get_schema_type(), None);
    }

    #[test]
    fn explicit_type_is_never_overwritten() {
        let builder = DocumentListBuilder::new(context())
            .schema_type("book")
            .filter(r#"_type == "movie""#);
        assert_eq!(builder.get_schema_type(), Some("book"));
    }

    #[test]
    fn templates_inferred_from_bound_type() {
        let builder = DocumentListBuilder::new(context()).filter(r#"_type == "movie""#);
        let templates = builder.get_initial_value_templates().unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].schema_type_name, "movie");
    }

    #[test]
    fn explicit_templates_stop_inference() {
        let builder = DocumentListBuilder::new(context())
            .initial_value_templates(Vec::new())
            .filter(r#"_type == "movie""#);
        assert_eq!(builder.get_initial_value_templates(), Some(&[][..]));
    }

    #[test]
    fn default_ordering_rejects_empty_field() {
        let builder = DocumentListBuilder::new(context());
        let err = builder
            .default_ordering(vec![SortOrderingItem::asc("")])
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidArgument { .. }));
        // receiver unchanged
        assert_eq!(builder.get_default_ordering(), None);
    }

    #[test]
    fn serialize_requires_id() {
        let err = DocumentListBuilder::new(context())
            .filter(r#"_type == "movie""#)
            .serialize(&SerializeOptions::at_root().with_index(2))
            .unwrap_err();
        assert_eq!(err.kind, SerializeErrorKind::MissingId);
        assert_eq!(err.id, Some(SerializeId::Index(2)));
    }

    #[test]
    fn serialize_requires_filter() {
        let err = DocumentListBuilder::new(context())
            .id("movies")
            .title("Movies")
            .serialize(&SerializeOptions::at_root())
            .unwrap_err();
        assert_eq!(err.kind, SerializeErrorKind::MissingFilter);
        assert_eq!(err.id, Some(SerializeId::Key("movies".to_string())));
        assert_eq!(err.title.as_deref(), Some("Movies"));
    }

    #[test]
    fn serialize_rejects_whitespace_only_filter() {
        let err = DocumentListBuilder::new(context())
            .id("movies")
            .filter("   ")
            .serialize(&SerializeOptions::at_root())
            .unwrap_err();
        assert_eq!(err.kind, SerializeErrorKind::MissingFilter);
        assert_eq!(err.id, Some(SerializeId::Key("movies".to_string())));
    }

    #[test]
    fn serialize_error_carries_tree_path() {
        let path = crate::nodes::SerializePath::root()
            .child(crate::nodes::PathSegment::Key("content".to_string()));
        let err = DocumentListBuilder::new(context())
            .id("movies")
            .serialize(&SerializeOptions::at(path.clone()))
            .unwrap_err();
        assert_eq!(err.kind, SerializeErrorKind::MissingFilter);
        assert_eq!(err.path, path);
    }

    #[test]
    fn from_spec_runs_inference_on_the_seed() {
        let builder = DocumentListBuilder::from_spec(
            context(),
            PartialDocumentList {
                id: Some("movies".to_string()),
                filter: Some(r#"_type == "movie""#.to_string()),
                ..PartialDocumentList::default()
            },
        );

        assert_eq!(builder.get_schema_type(), Some("movie"));
        let templates = builder.get_initial_value_templates().unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].schema_type_name, "movie");
    }

    #[test]
    fn from_spec_seed_templates_count_as_explicit() {
        let pinned = InitialValueTemplateItem {
            id: "pinned".to_string(),
            template_id: "book".to_string(),
            schema_type_name: "book".to_string(),
            title: None,
        };
        let builder = DocumentListBuilder::from_spec(
            context(),
            PartialDocumentList {
                id: Some("library".to_string()),
                initial_value_templates: Some(vec![pinned.clone()]),
                ..PartialDocumentList::default()
            },
        );

        // deriving with a filter must not recompute the seeded templates
        let derived = builder.filter(r#"_type == "movie""#);
        assert_eq!(derived.get_schema_type(), Some("movie"));
        assert_eq!(
            derived.get_initial_value_templates(),
            Some(&[pinned][..])
        );
    }

    #[test]
    fn serialize_rejects_full_queries() {
        for (filter, leading) in [("*[_type == 'movie']", '*'), ("{docs}", '{')] {
            let err = DocumentListBuilder::new(context())
                .id("movies")
                .filter(filter)
                .serialize(&SerializeOptions::at_root())
                .unwrap_err();
            assert_eq!(
                err.kind,
                SerializeErrorKind::QueryProvidedForFilter { leading }
            );
        }
    }

    #[test]
    fn serialize_round_trip_and_defaults() {
        let list = DocumentListBuilder::new(context())
            .id("movies")
            .filter(r#"_type == "movie""#)
            .schema_type("movie")
            .serialize(&SerializeOptions::at_root())
            .unwrap();

        assert_eq!(list.node_type, NodeType::DocumentList);
        assert_eq!(list.options.filter, r#"_type == "movie""#);
        assert_eq!(list.schema_type_name.as_deref(), Some("movie"));
        assert_eq!(
            list.options.api_version,
            crate::context::DEFAULT_API_VERSION
        );
        assert!(matches!(list.child, Child::Resolver(_)));
    }

    #[test]
    fn serialize_trims_filter() {
        let list = DocumentListBuilder::new(context())
            .id("movies")
            .filter("  _type == $type  ")
            .serialize(&SerializeOptions::at_root())
            .unwrap();
        assert_eq!(list.options.filter, "_type == $type");
    }

    #[test]
    fn serialize_keeps_explicit_api_version() {
        let list = DocumentListBuilder::new(context())
            .id("movies")
            .filter(r#"_type == "movie""#)
            .api_version("2031-06-01")
            .serialize(&SerializeOptions::at_root())
            .unwrap();
        assert_eq!(list.options.api_version, "2031-06-01");
    }

    #[test]
    fn explicit_child_survives_serialization() {
        let pane = crate::document::DocumentBuilder::new()
            .id("fixed")
            .document_id("doc-1");
        let list = DocumentListBuilder::new(context())
            .id("movies")
            .filter(r#"_type == "movie""#)
            .child(pane)
            .serialize(&SerializeOptions::at_root())
            .unwrap();
        assert!(matches!(list.child, Child::Document(_)));
    }
}
