//! Document editor-pane builder
//!
//! Minimal counterpart to the list builder for the editor pane a list item
//! navigates to. Same copy-on-write discipline: every setter returns a new
//! builder and leaves the receiver untouched.

use serde::Serialize;

use crate::error::{SerializeError, SerializeErrorKind};
use crate::nodes::{NodeType, SerializeId, SerializeOptions};

/// Accumulating spec for a document node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialDocumentNode {
    /// Node id
    pub id: Option<String>,
    /// Id of the document to edit
    pub document_id: Option<String>,
    /// Schema type of the document; empty marks the degraded placeholder
    pub schema_type_name: Option<String>,
    /// Display title
    pub title: Option<String>,
}

/// Finalized document editor-pane descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNode {
    /// Always [`NodeType::Document`]
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Node id
    pub id: String,
    /// Id of the document to edit
    pub document_id: String,
    /// Schema type; empty means the UI must prompt for one
    pub schema_type_name: String,
    /// Display title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Immutable builder for document editor panes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentBuilder {
    spec: PartialDocumentNode,
}

impl DocumentBuilder {
    /// Empty builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the node id
    #[must_use]
    pub fn id(&self, id: impl Into<String>) -> Self {
        let mut spec = self.spec.clone();
        spec.id = Some(id.into());
        Self { spec }
    }

    /// Get the node id
    #[inline]
    #[must_use]
    pub fn get_id(&self) -> Option<&str> {
        self.spec.id.as_deref()
    }

    /// Set the document id
    #[must_use]
    pub fn document_id(&self, document_id: impl Into<String>) -> Self {
        let mut spec = self.spec.clone();
        spec.document_id = Some(document_id.into());
        Self { spec }
    }

    /// Get the document id
    #[inline]
    #[must_use]
    pub fn get_document_id(&self) -> Option<&str> {
        self.spec.document_id.as_deref()
    }

    /// Set the schema type
    #[must_use]
    pub fn schema_type(&self, schema_type_name: impl Into<String>) -> Self {
        let mut spec = self.spec.clone();
        spec.schema_type_name = Some(schema_type_name.into());
        Self { spec }
    }

    /// Get the schema type
    #[inline]
    #[must_use]
    pub fn get_schema_type(&self) -> Option<&str> {
        self.spec.schema_type_name.as_deref()
    }

    /// Set the display title
    #[must_use]
    pub fn title(&self, title: impl Into<String>) -> Self {
        let mut spec = self.spec.clone();
        spec.title = Some(title.into());
        Self { spec }
    }

    /// Get the display title
    #[inline]
    #[must_use]
    pub fn get_title(&self) -> Option<&str> {
        self.spec.title.as_deref()
    }

    /// Whether this builder is the degraded untyped placeholder
    ///
    /// Produced by child resolution when no schema type could be
    /// determined; the editing UI prompts the user instead of crashing.
    #[must_use]
    pub fn is_untyped_placeholder(&self) -> bool {
        self.spec.schema_type_name.as_deref() == Some("")
    }

    /// Validate and freeze into a [`DocumentNode`]
    ///
    /// # Errors
    /// `MissingId` when no id is set (the parent-assigned index stands in
    /// for it in the error), `MissingDocumentId` when no document id is
    /// set.
    pub fn serialize(&self, options: &SerializeOptions) -> Result<DocumentNode, SerializeError> {
        let Some(id) = self.spec.id.clone().filter(|id| !id.is_empty()) else {
            let mut err =
                SerializeError::new(SerializeErrorKind::MissingId, options.path.clone());
            if let Some(index) = options.index {
                err = err.with_id(SerializeId::Index(index));
            }
            if let Some(title) = &self.spec.title {
                err = err.with_title(title.clone());
            }
            return Err(err);
        };

        let Some(document_id) = self
            .spec
            .document_id
            .clone()
            .filter(|doc| !doc.is_empty())
        else {
            let mut err =
                SerializeError::new(SerializeErrorKind::MissingDocumentId, options.path.clone())
                    .with_id(SerializeId::Key(id));
            if let Some(title) = &self.spec.title {
                err = err.with_title(title.clone());
            }
            return Err(err);
        };

        Ok(DocumentNode {
            node_type: NodeType::Document,
            id,
            document_id,
            schema_type_name: self.spec.schema_type_name.clone().unwrap_or_default(),
            title: self.spec.title.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn setters_do_not_mutate_receiver() {
        let base = DocumentBuilder::new().id("editor");
        let derived = base.document_id("doc-1").schema_type("movie");

        assert_eq!(base.get_document_id(), None);
        assert_eq!(derived.get_document_id(), Some("doc-1"));
        assert_eq!(derived.get_id(), Some("editor"));
    }

    #[test]
    fn serialize_round_trip() {
        let node = DocumentBuilder::new()
            .id("editor")
            .document_id("doc-1")
            .schema_type("movie")
            .title("Movie editor")
            .serialize(&SerializeOptions::at_root())
            .unwrap();

        assert_eq!(
            node,
            DocumentNode {
                node_type: NodeType::Document,
                id: "editor".to_string(),
                document_id: "doc-1".to_string(),
                schema_type_name: "movie".to_string(),
                title: Some("Movie editor".to_string()),
            }
        );
    }

    #[test]
    fn serialize_without_id_fails() {
        let err = DocumentBuilder::new()
            .document_id("doc-1")
            .serialize(&SerializeOptions::at_root().with_index(4))
            .unwrap_err();
        assert_eq!(err.kind, SerializeErrorKind::MissingId);
        assert_eq!(err.id, Some(SerializeId::Index(4)));
    }

    #[test]
    fn serialize_without_document_id_fails() {
        let err = DocumentBuilder::new()
            .id("editor")
            .serialize(&SerializeOptions::at_root())
            .unwrap_err();
        assert_eq!(err.kind, SerializeErrorKind::MissingDocumentId);
        assert_eq!(err.id, Some(SerializeId::Key("editor".to_string())));
    }

    #[test]
    fn untyped_placeholder_detection() {
        let placeholder = DocumentBuilder::new()
            .id("editor")
            .document_id("doc-1")
            .schema_type("");
        assert!(placeholder.is_untyped_placeholder());
        assert!(!placeholder.schema_type("movie").is_untyped_placeholder());
    }
}
