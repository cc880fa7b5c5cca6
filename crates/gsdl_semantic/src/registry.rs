//! Named document store.
//!
//! The pipeline resolves against and persists into a [`DocumentRegistry`].
//! Each document maps type names to definitions; one document is "current"
//! (explicitly activated) and one is the "default" used when nothing has
//! been activated.

use gsdl_syntax::{Document, TypeDef};
use indexmap::IndexMap;

/// Name of the document a fresh registry starts in.
pub const DEFAULT_DOCUMENT: &str = "DefaultDoc";

/// Registry failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("type \"{name}\" not found in document \"{document}\"")]
    NotFound { document: String, name: String },
}

impl RegistryError {
    /// Returns true for a missing document or type.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A keyed store of documents.
///
/// All operations except [`DocumentRegistry::delete_type`] are total, with
/// create-or-replace semantics.
pub trait DocumentRegistry {
    /// Looks up a type in a document.
    fn get_type(&self, document: &str, name: &str) -> Option<&TypeDef>;

    /// Stores a type, replacing any previous definition of `name`.
    fn set_type(&mut self, document: &str, name: &str, def: TypeDef);

    /// Removes a type from the current document.
    fn delete_type(&mut self, name: &str) -> Result<TypeDef, RegistryError>;

    /// Sets the document used when none is current.
    fn set_default_document(&mut self, name: &str);

    /// Activates a document.
    fn set_current_document(&mut self, name: &str);

    /// The current document, falling back to the default.
    fn current_document_name(&self) -> &str;

    fn document(&self, name: &str) -> Option<&Document>;

    /// Stores a whole document under its own name.
    fn replace_document(&mut self, document: Document);

    /// Printed SDL form of a document.
    fn print_document(&self, name: &str) -> Option<String> {
        self.document(name).map(gsdl_syntax::format)
    }
}

/// An in-process [`DocumentRegistry`].
#[derive(Debug, Clone)]
pub struct InMemoryRegistry {
    documents: IndexMap<String, Document>,
    current: Option<String>,
    default: String,
}

impl InMemoryRegistry {
    /// Creates an empty registry whose default document is [`DEFAULT_DOCUMENT`].
    pub fn new() -> Self {
        Self::with_default(DEFAULT_DOCUMENT)
    }

    /// Creates an empty registry with a custom default document name.
    pub fn with_default(name: impl Into<String>) -> Self {
        Self {
            documents: IndexMap::new(),
            current: None,
            default: name.into(),
        }
    }

    fn document_mut(&mut self, name: &str) -> &mut Document {
        self.documents
            .entry(name.to_string())
            .or_insert_with(|| Document::new(name))
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRegistry for InMemoryRegistry {
    fn get_type(&self, document: &str, name: &str) -> Option<&TypeDef> {
        self.documents.get(document)?.get(name)
    }

    fn set_type(&mut self, document: &str, name: &str, def: TypeDef) {
        tracing::debug!(document, name, "registry set type");
        self.document_mut(document).types.insert(name.to_string(), def);
    }

    fn delete_type(&mut self, name: &str) -> Result<TypeDef, RegistryError> {
        let document = self.current_document_name().to_string();
        let removed = self
            .documents
            .get_mut(&document)
            .and_then(|doc| doc.remove(name));
        match removed {
            Some(def) => {
                tracing::debug!(%document, name, "registry delete type");
                Ok(def)
            }
            None => Err(RegistryError::NotFound {
                document,
                name: name.to_string(),
            }),
        }
    }

    fn set_default_document(&mut self, name: &str) {
        self.default = name.to_string();
    }

    fn set_current_document(&mut self, name: &str) {
        self.current = Some(name.to_string());
    }

    fn current_document_name(&self) -> &str {
        self.current.as_deref().unwrap_or(&self.default)
    }

    fn document(&self, name: &str) -> Option<&Document> {
        self.documents.get(name)
    }

    fn replace_document(&mut self, document: Document) {
        tracing::debug!(document = %document.name, types = document.type_count(), "registry replace document");
        self.documents.insert(document.name.clone(), document);
    }
}
