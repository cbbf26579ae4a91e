use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    data::{
        document::DocumentRegistry, index::InvertedIndex, DocumentId, Term,
        DEFAULT_MAX_TERM_LEN,
    },
    index_debug,
    lexer::{
        scoring::{combined_frequency, insert_bounded, rank_descending},
        QueryError,
    },
    util::text::normalize_bounded,
};

/// One ranked document in a search result. Rank 1 is the best match.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SearchResultRow {
    pub rank: usize,
    pub doc_id: DocumentId,
    pub document: String,
    pub frequency: u64,
}

/// One entry of the frequent-terms report.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TermFrequency {
    pub rank: usize,
    pub term: Term,
    pub frequency: u64,
    pub documents: usize,
}

/// Result of a term lookup.
///
/// `NotIndexed` names the query terms the index has never seen; it is a normal outcome,
/// not an error. `Matches` may be empty when every term is indexed but no document
/// holds all of them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    Matches { rows: Vec<SearchResultRow> },
    NotIndexed { terms: Vec<Term> },
}

impl SearchOutcome {
    /// Matching rows; empty when a term was not indexed.
    pub fn rows(&self) -> &[SearchResultRow] {
        match self {
            SearchOutcome::Matches { rows } => rows,
            SearchOutcome::NotIndexed { .. } => &[],
        }
    }

    pub fn is_not_indexed(&self) -> bool {
        matches!(self, SearchOutcome::NotIndexed { .. })
    }
}

/// QueryEngine answers the read-only queries over a built index.
///
/// It borrows the index and registry, so any number of engines can exist side by side;
/// none of its operations change what is indexed.
pub struct QueryEngine<'a> {
    index: &'a InvertedIndex,
    registry: &'a DocumentRegistry,
    max_term_len: usize,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a InvertedIndex, registry: &'a DocumentRegistry) -> QueryEngine<'a> {
        QueryEngine {
            index,
            registry,
            max_term_len: DEFAULT_MAX_TERM_LEN,
        }
    }

    /// Normalize query terms with the same bound the index was built with.
    pub fn with_max_term_len(mut self, max_term_len: usize) -> Self {
        self.max_term_len = max_term_len;
        self
    }

    /// Documents containing `raw_term`, most occurrences first.
    pub fn search(&self, raw_term: &str) -> Result<SearchOutcome, QueryError> {
        let term = self.prepare(raw_term)?;
        let postings = match self.index.get(&term) {
            Some(postings) => postings,
            None => {
                index_debug!("QueryEngine", "term '{}' is not indexed", term);
                return Ok(SearchOutcome::NotIndexed { terms: vec![term] });
            }
        };

        let mut ranked: Vec<(DocumentId, u64)> = postings
            .iter()
            .map(|posting| (posting.doc_id, posting.count as u64))
            .collect();
        rank_descending(&mut ranked, |(_, frequency)| *frequency);

        index_debug!(
            "QueryEngine",
            "search term={} matched_docs={}",
            term,
            ranked.len()
        );
        Ok(SearchOutcome::Matches {
            rows: self.resolve_rows(ranked)?,
        })
    }

    /// Documents containing both terms, ranked by their summed occurrence counts.
    ///
    /// Candidates are discovered in the posting order of `term_a`, which breaks ties
    /// between equal combined frequencies.
    pub fn search_and(&self, term_a: &str, term_b: &str) -> Result<SearchOutcome, QueryError> {
        let left_term = self.prepare(term_a)?;
        let right_term = self.prepare(term_b)?;

        let (left, right) = match (self.index.get(&left_term), self.index.get(&right_term)) {
            (Some(left), Some(right)) => (left, right),
            (left, right) => {
                let mut missing = Vec::new();
                if left.is_none() {
                    missing.push(left_term.clone());
                }
                if right.is_none() && right_term != left_term {
                    missing.push(right_term.clone());
                }
                index_debug!("QueryEngine", "conjunction terms not indexed: {:?}", missing);
                return Ok(SearchOutcome::NotIndexed { terms: missing });
            }
        };

        let right_counts: HashMap<DocumentId, u32> =
            right.iter().map(|posting| (posting.doc_id, posting.count)).collect();
        let mut ranked: Vec<(DocumentId, u64)> = left
            .iter()
            .filter_map(|posting| {
                right_counts
                    .get(&posting.doc_id)
                    .map(|&count| (posting.doc_id, combined_frequency(posting.count, count)))
            })
            .collect();
        rank_descending(&mut ranked, |(_, frequency)| *frequency);

        index_debug!(
            "QueryEngine",
            "search_and left={} right={} matched_docs={}",
            left_term,
            right_term,
            ranked.len()
        );
        Ok(SearchOutcome::Matches {
            rows: self.resolve_rows(ranked)?,
        })
    }

    /// The `k` terms with the highest total frequency across the corpus.
    ///
    /// Terms are visited in first-indexed order; among equal totals the term indexed
    /// first ranks higher.
    pub fn top_terms(&self, k: usize) -> Vec<TermFrequency> {
        let mut ranked: Vec<(&str, u64, usize)> =
            Vec::with_capacity(k.min(self.index.unique_terms()));
        for (term, postings) in self.index.iter() {
            insert_bounded(
                &mut ranked,
                (term, postings.total_frequency(), postings.len()),
                k,
                |(_, frequency, _)| *frequency,
            );
        }

        ranked
            .into_iter()
            .enumerate()
            .map(|(i, (term, frequency, documents))| TermFrequency {
                rank: i + 1,
                term: term.to_string(),
                frequency,
                documents,
            })
            .collect()
    }

    fn prepare(&self, raw_term: &str) -> Result<Term, QueryError> {
        let term = normalize_bounded(raw_term, self.max_term_len);
        if term.is_empty() {
            return Err(QueryError::InvalidQuery(raw_term.to_string()));
        }
        Ok(term)
    }

    fn resolve_rows(
        &self,
        ranked: Vec<(DocumentId, u64)>,
    ) -> Result<Vec<SearchResultRow>, QueryError> {
        ranked
            .into_iter()
            .enumerate()
            .map(|(i, (doc_id, frequency))| {
                let document = self
                    .registry
                    .name_of(doc_id)
                    .ok_or(QueryError::UnknownDocument(doc_id))?;
                Ok(SearchResultRow {
                    rank: i + 1,
                    doc_id,
                    document: document.to_string(),
                    frequency,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (InvertedIndex, DocumentRegistry) {
        let mut index = InvertedIndex::new();
        let mut registry = DocumentRegistry::default();
        let corpus = [
            ("doc0", "search engine search index"),
            ("doc1", "search index"),
            ("doc2", "engine index index"),
        ];
        for (name, body) in corpus {
            let id = registry.register(name).unwrap();
            for word in body.split_whitespace() {
                index.insert(word, id);
            }
        }
        (index, registry)
    }

    fn summary(outcome: &SearchOutcome) -> Vec<(&str, u64)> {
        outcome
            .rows()
            .iter()
            .map(|row| (row.document.as_str(), row.frequency))
            .collect()
    }

    #[test]
    fn test_search_ranks_by_frequency() {
        let (index, registry) = fixture();
        let engine = QueryEngine::new(&index, &registry);
        let outcome = engine.search("search").unwrap();
        assert_eq!(summary(&outcome), vec![("doc0", 2), ("doc1", 1)]);
        assert_eq!(outcome.rows()[0].rank, 1);
        assert_eq!(outcome.rows()[1].rank, 2);
    }

    #[test]
    fn test_search_normalizes_query() {
        let (index, registry) = fixture();
        let engine = QueryEngine::new(&index, &registry);
        let outcome = engine.search("  INDEX!! ").unwrap();
        assert_eq!(summary(&outcome), vec![("doc2", 2), ("doc0", 1), ("doc1", 1)]);
    }

    #[test]
    fn test_search_invalid_query() {
        let (index, registry) = fixture();
        let engine = QueryEngine::new(&index, &registry);
        assert!(matches!(
            engine.search("1234"),
            Err(QueryError::InvalidQuery(raw)) if raw == "1234"
        ));
    }

    #[test]
    fn test_search_not_indexed() {
        let (index, registry) = fixture();
        let engine = QueryEngine::new(&index, &registry);
        let outcome = engine.search("the").unwrap();
        assert_eq!(
            outcome,
            SearchOutcome::NotIndexed {
                terms: vec!["the".to_string()]
            }
        );
        assert!(outcome.rows().is_empty());
    }

    #[test]
    fn test_search_and_combines_frequencies() {
        let (index, registry) = fixture();
        let engine = QueryEngine::new(&index, &registry);
        let outcome = engine.search_and("search", "index").unwrap();
        assert_eq!(summary(&outcome), vec![("doc0", 3), ("doc1", 2)]);
    }

    #[test]
    fn test_search_and_either_term_order() {
        let (index, registry) = fixture();
        let engine = QueryEngine::new(&index, &registry);
        // doc0: engine 1 + index 1, doc2: engine 1 + index 2
        let outcome = engine.search_and("engine", "index").unwrap();
        assert_eq!(summary(&outcome), vec![("doc2", 3), ("doc0", 2)]);

        let outcome = engine.search_and("index", "search").unwrap();
        assert_eq!(summary(&outcome), vec![("doc0", 3), ("doc1", 2)]);
    }

    #[test]
    fn test_search_and_ties_follow_discovery_order() {
        let mut index = InvertedIndex::new();
        let mut registry = DocumentRegistry::default();
        for name in ["first", "second", "third"] {
            let id = registry.register(name).unwrap();
            index.insert("alpha", id);
            index.insert("beta", id);
        }
        let engine = QueryEngine::new(&index, &registry);
        let outcome = engine.search_and("beta", "alpha").unwrap();
        assert_eq!(
            summary(&outcome),
            vec![("first", 2), ("second", 2), ("third", 2)]
        );
    }

    #[test]
    fn test_search_and_reports_missing_terms() {
        let (index, registry) = fixture();
        let engine = QueryEngine::new(&index, &registry);
        assert_eq!(
            engine.search_and("search", "rust").unwrap(),
            SearchOutcome::NotIndexed {
                terms: vec!["rust".to_string()]
            }
        );
        assert_eq!(
            engine.search_and("go", "rust").unwrap(),
            SearchOutcome::NotIndexed {
                terms: vec!["go".to_string(), "rust".to_string()]
            }
        );
        assert_eq!(
            engine.search_and("rust", "Rust").unwrap(),
            SearchOutcome::NotIndexed {
                terms: vec!["rust".to_string()]
            }
        );
    }

    #[test]
    fn test_search_and_empty_intersection_is_matches() {
        let mut index = InvertedIndex::new();
        let mut registry = DocumentRegistry::default();
        let a = registry.register("a").unwrap();
        let b = registry.register("b").unwrap();
        index.insert("left", a);
        index.insert("right", b);
        let engine = QueryEngine::new(&index, &registry);
        let outcome = engine.search_and("left", "right").unwrap();
        assert!(!outcome.is_not_indexed());
        assert!(outcome.rows().is_empty());
    }

    #[test]
    fn test_search_and_invalid_side() {
        let (index, registry) = fixture();
        let engine = QueryEngine::new(&index, &registry);
        assert!(matches!(
            engine.search_and("search", "42"),
            Err(QueryError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_top_terms() {
        let (index, registry) = fixture();
        let engine = QueryEngine::new(&index, &registry);
        let top: Vec<(String, u64)> = engine
            .top_terms(10)
            .into_iter()
            .map(|t| (t.term, t.frequency))
            .collect();
        assert_eq!(
            top,
            vec![
                ("index".to_string(), 4),
                ("search".to_string(), 3),
                ("engine".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_top_terms_bounded_and_first_seen_ties() {
        let mut index = InvertedIndex::new();
        let mut registry = DocumentRegistry::default();
        let id = registry.register("doc").unwrap();
        for word in ["beta", "alpha", "gamma", "alpha", "beta", "delta"] {
            index.insert(word, id);
        }
        let engine = QueryEngine::new(&index, &registry);
        let top = engine.top_terms(3);
        let terms: Vec<&str> = top.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(terms, vec!["beta", "alpha", "gamma"]);
        assert_eq!(top[2].rank, 3);
        assert_eq!(top[2].documents, 1);
        assert!(engine.top_terms(0).is_empty());
    }

    #[test]
    fn test_unknown_document_is_structural_error() {
        let mut index = InvertedIndex::new();
        let registry = DocumentRegistry::default();
        index.insert("orphan", 5);
        let engine = QueryEngine::new(&index, &registry);
        assert!(matches!(
            engine.search("orphan"),
            Err(QueryError::UnknownDocument(5))
        ));
    }
}
