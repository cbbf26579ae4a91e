use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    data::{document::DocumentRegistry, index::InvertedIndex},
    util::hash::bucket_of,
};

/// Structural health of the index.
///
/// Terms are laid out over `bucket_count` buckets with the djb2 hash, so `used_buckets`,
/// `load_factor` and `longest_chain` describe how a fixed-size chained hash table of that
/// capacity would hold the current vocabulary.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IndexStats {
    pub bucket_count: usize,
    pub used_buckets: usize,
    pub load_factor: f64,
    pub unique_terms: usize,
    pub total_postings: usize,
    pub total_occurrences: u64,
    pub longest_chain: usize,
    pub average_chain: f64,
    pub document_count: usize,
}

impl IndexStats {
    pub fn collect(
        index: &InvertedIndex,
        registry: &DocumentRegistry,
        bucket_count: usize,
    ) -> IndexStats {
        let bucket_count = bucket_count.max(1);
        let mut chains: HashMap<usize, usize> = HashMap::new();
        let mut total_postings = 0usize;
        let mut total_occurrences = 0u64;
        for (term, postings) in index.iter() {
            *chains.entry(bucket_of(term, bucket_count)).or_insert(0) += 1;
            total_postings += postings.len();
            total_occurrences += postings.total_frequency();
        }

        let used_buckets = chains.len();
        let unique_terms = index.unique_terms();
        IndexStats {
            bucket_count,
            used_buckets,
            load_factor: used_buckets as f64 / bucket_count as f64,
            unique_terms,
            total_postings,
            total_occurrences,
            longest_chain: chains.values().copied().max().unwrap_or(0),
            average_chain: if used_buckets == 0 {
                0.0
            } else {
                unique_terms as f64 / used_buckets as f64
            },
            document_count: registry.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let stats = IndexStats::collect(&InvertedIndex::new(), &DocumentRegistry::default(), 1024);
        assert_eq!(stats.used_buckets, 0);
        assert_eq!(stats.load_factor, 0.0);
        assert_eq!(stats.longest_chain, 0);
        assert_eq!(stats.average_chain, 0.0);
        assert_eq!(stats.document_count, 0);
    }

    #[test]
    fn test_counts() {
        let mut index = InvertedIndex::new();
        let mut registry = DocumentRegistry::default();
        let a = registry.register("a").unwrap();
        let b = registry.register("b").unwrap();
        index.insert("search", a);
        index.insert("search", a);
        index.insert("search", b);
        index.insert("index", b);

        let stats = IndexStats::collect(&index, &registry, 1024);
        assert_eq!(stats.bucket_count, 1024);
        assert_eq!(stats.unique_terms, 2);
        assert_eq!(stats.total_postings, 3);
        assert_eq!(stats.total_occurrences, 4);
        assert_eq!(stats.document_count, 2);
        assert!(stats.used_buckets >= 1 && stats.used_buckets <= 2);
        assert_eq!(stats.load_factor, stats.used_buckets as f64 / 1024.0);
    }

    #[test]
    fn test_single_bucket_chains_everything() {
        let mut index = InvertedIndex::new();
        let mut registry = DocumentRegistry::default();
        let id = registry.register("doc").unwrap();
        for term in ["one", "two", "three"] {
            index.insert(term, id);
        }
        let stats = IndexStats::collect(&index, &registry, 1);
        assert_eq!(stats.used_buckets, 1);
        assert_eq!(stats.longest_chain, 3);
        assert_eq!(stats.load_factor, 1.0);
        assert_eq!(stats.average_chain, 3.0);
    }
}
