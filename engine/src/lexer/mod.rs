//! Turning raw text into index terms, and answering queries over the built index.
//!
//! This module holds the document-side collaborators (tokenizer, document sources and
//! the stop-word filter) as well as the query engine with its ranking helpers.

use crate::data::DocumentId;

/// Describes an error that occurred while running a query
#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    #[error("Invalid query '{0}': a search term needs at least one letter")]
    InvalidQuery(String),
    #[error("The index has not been built yet")]
    IndexNotBuilt,
    #[error("Posting refers to unregistered document {0}")]
    UnknownDocument(DocumentId),
}

pub mod query;
pub mod scoring;
pub mod stopwords;
pub mod tokenizer;
