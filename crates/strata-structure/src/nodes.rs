//! Finalized structure-node descriptors
//!
//! Plain frozen values handed to the navigation UI by `serialize`. No
//! further mutation happens after serialization; the descriptors carry no
//! interior mutability.

use serde::Serialize;
use std::fmt::{self, Display, Formatter};

use crate::child::Child;
use crate::intent::IntentChecker;
use crate::sort::SortOrderingItem;
use crate::templates::InitialValueTemplateItem;
use strata_filter::FilterParams;

/// Discriminator for finalized structure nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    /// A navigable list of documents
    DocumentList,
    /// A document editor pane
    Document,
}

/// One step of a navigation-tree path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Node id
    Key(String),
    /// Positional index within the parent's children
    Index(usize),
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Position of a node in the navigation tree
///
/// Attached to serialization errors so the authoring layer can localize a
/// broken spec.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SerializePath(Vec<PathSegment>);

impl SerializePath {
    /// Empty path (tree root)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path segments, outermost first
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Derive a child path by appending a segment
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    /// Whether this is the root path
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PathSegment>> for SerializePath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl Display for SerializePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (position, segment) in self.0.iter().enumerate() {
            if position > 0 && matches!(segment, PathSegment::Key(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Identity carried by a serialization error
///
/// A node missing its own id is identified by the index its parent
/// assigned it instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializeId {
    /// The node's own id
    Key(String),
    /// Positional stand-in when the id itself is missing
    Index(usize),
}

impl From<String> for SerializeId {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&str> for SerializeId {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for SerializeId {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl Display for SerializeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// Options passed into `serialize`
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
    /// Position of the node being serialized
    pub path: SerializePath,
    /// Index the parent assigned this node, if any
    pub index: Option<usize>,
}

impl SerializeOptions {
    /// Serialize at the tree root
    #[inline]
    #[must_use]
    pub fn at_root() -> Self {
        Self::default()
    }

    /// Serialize at a path
    #[inline]
    #[must_use]
    pub fn at(path: SerializePath) -> Self {
        Self { path, index: None }
    }

    /// Set the parent-assigned index
    #[inline]
    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// Validated options of a finalized document list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListOptions {
    /// Filter fragment selecting list members
    pub filter: String,
    /// Bindings for `$name` references in the filter
    #[serde(skip_serializing_if = "FilterParams::is_empty")]
    pub params: FilterParams,
    /// API version the list queries with
    pub api_version: String,
    /// Default sort ordering
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub default_ordering: Vec<SortOrderingItem>,
}

/// Finalized document list descriptor
///
/// Produced exactly once per builder by `serialize`; owned by the
/// navigation UI from then on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentList {
    /// Always [`NodeType::DocumentList`]
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Node id, unique among siblings
    pub id: String,
    /// Display title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Bound schema type, explicit or inferred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_type_name: Option<String>,
    /// Validated list options
    pub options: DocumentListOptions,
    /// Child node or resolver invoked on item activation
    #[serde(skip)]
    pub child: Child,
    /// New-document templates offered by the list
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub initial_value_templates: Vec<InitialValueTemplateItem>,
    /// Intent predicate for external navigation requests
    #[serde(skip)]
    pub can_handle_intent: Option<IntentChecker>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_display_mixes_keys_and_indices() {
        let path = SerializePath::root()
            .child(PathSegment::Key("content".to_string()))
            .child(PathSegment::Index(2))
            .child(PathSegment::Key("movies".to_string()));
        assert_eq!(path.to_string(), "content[2].movies");
    }

    #[test]
    fn root_path_display() {
        assert_eq!(SerializePath::root().to_string(), "<root>");
        assert!(SerializePath::root().is_root());
    }

    #[test]
    fn child_path_leaves_parent_untouched() {
        let parent = SerializePath::root().child(PathSegment::Key("a".to_string()));
        let derived = parent.child(PathSegment::Key("b".to_string()));
        assert_eq!(parent.segments().len(), 1);
        assert_eq!(derived.segments().len(), 2);
    }

    #[test]
    fn serialize_id_conversions() {
        assert_eq!(SerializeId::from("movies"), SerializeId::Key("movies".to_string()));
        assert_eq!(SerializeId::from(3), SerializeId::Index(3));
        assert_eq!(SerializeId::Index(3).to_string(), "#3");
    }

    #[test]
    fn node_type_serializes_camel_case() {
        let json = serde_json::to_value(NodeType::DocumentList).unwrap();
        assert_eq!(json, "documentList");
    }
}
