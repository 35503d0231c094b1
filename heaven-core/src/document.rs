//! Document abstraction
//!
//! A document is anything holding elements addressable by id whose inner
//! content can be replaced wholesale. The reloader writes every fetched
//! fragment through this trait, so the same scheduling code can drive an
//! in-memory model, a file on disk, or a terminal.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// Errors raised while writing into a document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// No element with the given id exists
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// The element exists but its content could not be written
    #[error("failed to write element content: {0}")]
    Write(String),
}

/// Target of reloaded fragments
#[async_trait]
pub trait Document: Send + Sync {
    /// Replaces the inner content of element `id` with `content`, verbatim
    ///
    /// Fails with [`DocumentError::ElementNotFound`] when the element does
    /// not exist; the document is left untouched in that case.
    async fn replace_inner(&self, id: &str, content: &str) -> Result<(), DocumentError>;
}

/// In-memory document keyed by element id
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: Mutex<HashMap<String, String>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document holding a single empty element
    pub fn with_element(id: impl Into<String>) -> Self {
        let doc = Self::new();
        doc.insert_element(id, "");
        doc
    }

    /// Adds an element, or resets the content of an existing one
    pub fn insert_element(&self, id: impl Into<String>, content: impl Into<String>) {
        self.lock().insert(id.into(), content.into());
    }

    /// Removes an element, returning its last content
    pub fn remove_element(&self, id: &str) -> Option<String> {
        self.lock().remove(id)
    }

    /// Current inner content of an element
    pub fn inner(&self, id: &str) -> Option<String> {
        self.lock().get(id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.elements
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Document for MemoryDocument {
    async fn replace_inner(&self, id: &str, content: &str) -> Result<(), DocumentError> {
        let mut elements = self.lock();
        match elements.get_mut(id) {
            Some(inner) => {
                inner.clear();
                inner.push_str(content);
                Ok(())
            }
            None => Err(DocumentError::ElementNotFound(id.to_string())),
        }
    }
}
