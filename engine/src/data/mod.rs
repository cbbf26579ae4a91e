use thiserror::Error;

/// Dense document identifier, assigned in registration order starting at 0.
pub type DocumentId = usize;
/// A normalized index key: ASCII letters only, lower-cased.
pub type Term = String;

pub const DEFAULT_MAX_DOCUMENTS: usize = 256;
pub const DEFAULT_BUCKET_COUNT: usize = 1024;
pub const DEFAULT_TOP_TERMS: usize = 10;
pub const DEFAULT_MAX_TERM_LEN: usize = 127;
pub const DEFAULT_MAX_NAME_LEN: usize = 511;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Document capacity of {max} reached, no further documents can be indexed")]
    CapacityExceeded { max: usize },
    #[error("Document source '{name}' could not be read: {source}")]
    Unreadable {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("No document with id {0} is registered")]
    UnknownDocument(DocumentId),
}

pub mod builder;
pub mod document;
pub mod index;
pub mod keyword;
pub mod stats;
