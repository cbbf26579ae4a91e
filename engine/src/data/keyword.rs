use serde::{Deserialize, Serialize};

use crate::data::DocumentId;

/// How many times one term occurs in one document.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Posting {
    #[serde(rename = "doc")]
    pub doc_id: DocumentId,
    #[serde(rename = "freq")]
    pub count: u32,
}

/// All postings for a single term.
///
/// Postings are kept in the order their documents were first seen, which is ascending
/// document id when documents are ingested in id order. A list is never empty: it is
/// only ever created together with its first posting.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PostingList {
    postings: Vec<Posting>,
}

impl PostingList {
    pub fn with_first(doc_id: DocumentId) -> PostingList {
        PostingList {
            postings: vec![Posting { doc_id, count: 1 }],
        }
    }

    /// Count one more occurrence for `doc_id`, adding a posting if it is new.
    pub fn record(&mut self, doc_id: DocumentId) {
        // Ingestion is document-at-a-time, so the match is almost always the last one.
        match self.postings.iter_mut().rev().find(|p| p.doc_id == doc_id) {
            Some(existing) => existing.count += 1,
            None => self.postings.push(Posting { doc_id, count: 1 }),
        }
    }

    pub fn get(&self, doc_id: DocumentId) -> Option<&Posting> {
        self.postings.iter().find(|p| p.doc_id == doc_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Posting> {
        self.postings.iter()
    }

    pub fn as_slice(&self) -> &[Posting] {
        &self.postings
    }

    /// Number of documents containing the term.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Sum of occurrence counts across every document.
    pub fn total_frequency(&self) -> u64 {
        self.postings.iter().map(|p| p.count as u64).sum()
    }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.iter()
    }
}
