//! Initial-value templates
//!
//! Named presets used when creating a new document of a given type. Lists
//! surface them as new-document options; the registry is an ordered
//! sequence consulted by id.

use serde::{Deserialize, Serialize};

/// A registered initial-value template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialValueTemplate {
    /// Template id, unique within the registry
    pub id: String,
    /// Schema type the template creates
    pub schema_type_name: String,
    /// Display title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl InitialValueTemplate {
    /// Template with id and schema type, no title
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, schema_type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            schema_type_name: schema_type_name.into(),
            title: None,
        }
    }

    /// Set the display title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A template reference carried by a finalized list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialValueTemplateItem {
    /// Item id, unique within the list
    pub id: String,
    /// Referenced template id
    pub template_id: String,
    /// Schema type the item creates
    pub schema_type_name: String,
    /// Display title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl InitialValueTemplateItem {
    /// Item referencing a template directly
    #[must_use]
    pub fn from_template(template: &InitialValueTemplate) -> Self {
        Self {
            id: template.id.clone(),
            template_id: template.id.clone(),
            schema_type_name: template.schema_type_name.clone(),
            title: template.title.clone(),
        }
    }
}

/// Find a template by id in an ordered registry
#[must_use]
pub fn find_template<'a>(
    templates: &'a [InitialValueTemplate],
    id: &str,
) -> Option<&'a InitialValueTemplate> {
    templates.iter().find(|template| template.id == id)
}
