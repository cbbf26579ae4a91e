use serde::{Deserialize, Serialize};

use crate::{
    data::{DocumentId, IndexError, DEFAULT_MAX_DOCUMENTS, DEFAULT_MAX_NAME_LEN},
    index_debug, index_warn,
    util::text::truncate_name,
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    #[serde(rename = "name", alias = "source")]
    pub name: String,
    /// Tokens from this document that made it into the index.
    #[serde(rename = "terms")]
    pub indexed_terms: usize,
}

/// Append-only table of ingested documents.
///
/// Identifiers are handed out densely from 0 and never reused; the table refuses new
/// entries once it holds `max_documents`.
#[derive(Debug, Clone)]
pub struct DocumentRegistry {
    documents: Vec<Document>,
    max_documents: usize,
    max_name_len: usize,
}

impl Default for DocumentRegistry {
    fn default() -> Self {
        DocumentRegistry::with_capacity(DEFAULT_MAX_DOCUMENTS, DEFAULT_MAX_NAME_LEN)
    }
}

impl DocumentRegistry {
    pub fn with_capacity(max_documents: usize, max_name_len: usize) -> DocumentRegistry {
        DocumentRegistry {
            documents: Vec::new(),
            max_documents,
            max_name_len,
        }
    }

    /// Record a new document and return its identifier.
    pub fn register(&mut self, name: &str) -> Result<DocumentId, IndexError> {
        if self.is_full() {
            index_warn!(
                "DocumentRegistry",
                "refusing '{}': capacity of {} documents reached",
                name,
                self.max_documents
            );
            return Err(IndexError::CapacityExceeded {
                max: self.max_documents,
            });
        }

        let stored = truncate_name(name, self.max_name_len);
        if stored.len() != name.len() {
            index_warn!(
                "DocumentRegistry",
                "document name truncated to {} bytes",
                self.max_name_len
            );
        }

        let id = self.documents.len();
        self.documents.push(Document {
            id,
            name: stored.to_string(),
            indexed_terms: 0,
        });
        index_debug!("DocumentRegistry", "registered doc_id={} name={}", id, stored);
        Ok(id)
    }

    /// Add `terms` to the indexed-term tally of a registered document.
    pub fn record_terms(&mut self, id: DocumentId, terms: usize) -> Result<(), IndexError> {
        let document = self
            .documents
            .get_mut(id)
            .ok_or(IndexError::UnknownDocument(id))?;
        document.indexed_terms += terms;
        Ok(())
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn name_of(&self, id: DocumentId) -> Option<&str> {
        self.documents.get(id).map(|doc| doc.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.documents.len() >= self.max_documents
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }
}
