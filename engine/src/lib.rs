//! An in-memory inverted index over a small corpus of text documents.
//!
//! Documents are ingested one at a time through a [`Session`]; every whitespace token is
//! normalized, stop words are dropped and the rest land in the [`InvertedIndex`]. Once
//! built, the index answers ranked single-term lookups, two-term conjunctions, a
//! top-K frequent-terms report and structural diagnostics.

#![forbid(unsafe_code)]

mod util;
pub mod config;
pub mod data;
pub mod lexer;
pub mod session;

#[doc(hidden)]
pub use tracing;

pub use config::EngineConfig;
pub use data::{
    builder::IndexBuilder,
    document::{Document, DocumentRegistry},
    index::InvertedIndex,
    keyword::{Posting, PostingList},
    stats::IndexStats,
    DocumentId, IndexError, Term,
};
pub use lexer::{
    query::{QueryEngine, SearchOutcome, SearchResultRow, TermFrequency},
    stopwords::is_stop_word,
    tokenizer::{DocumentSource, FileSource, TextSource, Tokenable, WhitespaceTokenizer},
    QueryError,
};
pub use session::{BuildReport, Session};
pub use util::text::normalize;

/// Log at info level, prefixed with the emitting component.
#[macro_export]
macro_rules! index_log {
    ($module:expr, $msg:literal $(, $args:expr)* $(,)?) => {
        $crate::tracing::info!("[{}] {}", $module, format!($msg $(, $args)*))
    };
}

#[macro_export]
macro_rules! index_warn {
    ($module:expr, $msg:literal $(, $args:expr)* $(,)?) => {
        $crate::tracing::warn!("[{}] {}", $module, format!($msg $(, $args)*))
    };
}

#[macro_export]
macro_rules! index_debug {
    ($module:expr, $msg:literal $(, $args:expr)* $(,)?) => {
        $crate::tracing::debug!("[{}] {}", $module, format!($msg $(, $args)*))
    };
}
