use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Common English words that are never indexed.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "it", "in", "on", "at", "to", "of", "and", "or", "but", "for", "nor",
    "so", "yet", "be", "was", "are", "were", "has", "have", "had", "do", "does", "did", "with",
    "this", "that", "from", "by", "as", "not", "no", "if", "its", "he", "she", "we", "they",
    "you", "i", "my", "his", "her", "our", "their", "your",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Whether an already-normalized term is a stop word.
pub fn is_stop_word(term: &str) -> bool {
    STOP_WORD_SET.contains(term)
}
