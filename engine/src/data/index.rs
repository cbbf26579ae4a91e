use std::collections::HashMap;

use crate::data::{keyword::PostingList, DocumentId, Term};

/// Term to posting-list mapping.
///
/// Entries live in a vector in the order their term was first indexed, with a hash map
/// from term to slot. That order is the index's traversal order and is what the top-K
/// report uses to break ties.
#[derive(Default, Debug, Clone)]
pub struct InvertedIndex {
    entries: Vec<(Term, PostingList)>,
    slots: HashMap<Term, usize>,
}

impl InvertedIndex {
    pub fn new() -> InvertedIndex {
        InvertedIndex::default()
    }

    /// Count one occurrence of `term` in `doc_id`.
    ///
    /// `term` must already be normalized, non-empty and not a stop word; filtering is
    /// the builder's job.
    pub fn insert(&mut self, term: &str, doc_id: DocumentId) {
        debug_assert!(!term.is_empty(), "empty terms are filtered before insert");
        match self.slots.get(term) {
            Some(&slot) => self.entries[slot].1.record(doc_id),
            None => {
                self.slots.insert(term.to_string(), self.entries.len());
                self.entries
                    .push((term.to_string(), PostingList::with_first(doc_id)));
            }
        }
    }

    pub fn get(&self, term: &str) -> Option<&PostingList> {
        self.slots.get(term).map(|&slot| &self.entries[slot].1)
    }

    /// Terms with their postings, in first-indexed order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingList)> + '_ {
        self.entries
            .iter()
            .map(|(term, postings)| (term.as_str(), postings))
    }

    pub fn unique_terms(&self) -> usize {
        self.entries.len()
    }

    pub fn total_postings(&self) -> usize {
        self.entries.iter().map(|(_, postings)| postings.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every term and posting.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.slots.clear();
    }
}
