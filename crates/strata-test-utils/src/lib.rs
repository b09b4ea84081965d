//! Testing utilities for the Strata workspace
//!
//! Shared fixtures: canned contexts, map-backed collaborators, and a
//! failing resolver for error-propagation tests.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::Arc;

use strata_structure::{
    DocumentTypeResolver, InitialValueTemplate, ResolveError, StructureContext,
};

/// Document-type resolver answering from a fixed id-to-type map
#[derive(Debug, Default)]
pub struct MapDocumentTypeResolver {
    types: HashMap<String, String>,
}

impl MapDocumentTypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_type(mut self, document_id: &str, type_name: &str) -> Self {
        self.types
            .insert(document_id.to_string(), type_name.to_string());
        self
    }
}

#[async_trait::async_trait]
impl DocumentTypeResolver for MapDocumentTypeResolver {
    async fn resolve_type(&self, document_id: &str) -> Result<Option<String>, ResolveError> {
        Ok(self.types.get(document_id).cloned())
    }
}

/// Resolver whose lookups always fail, for propagation tests
#[derive(Debug, Default)]
pub struct FailingDocumentTypeResolver;

#[async_trait::async_trait]
impl DocumentTypeResolver for FailingDocumentTypeResolver {
    async fn resolve_type(&self, document_id: &str) -> Result<Option<String>, ResolveError> {
        Err(ResolveError::type_lookup(
            document_id,
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "lookup backend down"),
        ))
    }
}

pub fn movie_templates() -> Vec<InitialValueTemplate> {
    vec![
        InitialValueTemplate::new("movie", "movie").with_title("Movie"),
        InitialValueTemplate::new("movie-remake", "movie").with_title("Movie remake"),
        InitialValueTemplate::new("book", "book").with_title("Book"),
    ]
}

pub fn test_context() -> StructureContext {
    StructureContext::builder()
        .templates(movie_templates())
        .document_types(Arc::new(
            MapDocumentTypeResolver::new()
                .with_type("movie-1", "movie")
                .with_type("book-1", "book"),
        ))
        .build()
}

pub fn failing_context() -> StructureContext {
    StructureContext::builder()
        .templates(movie_templates())
        .document_types(Arc::new(FailingDocumentTypeResolver))
        .build()
}
