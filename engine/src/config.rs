use serde::{Deserialize, Serialize};

use crate::data::{
    DEFAULT_BUCKET_COUNT, DEFAULT_MAX_DOCUMENTS, DEFAULT_MAX_NAME_LEN, DEFAULT_MAX_TERM_LEN,
    DEFAULT_TOP_TERMS,
};

pub static ENV_VAR_MAX_DOCS: &str = "WORDINDEX_MAX_DOCS";
pub static ENV_VAR_BUCKETS: &str = "WORDINDEX_BUCKETS";
pub static ENV_VAR_TOP_TERMS: &str = "WORDINDEX_TOP_TERMS";
pub static ENV_VAR_MAX_TERM_LEN: &str = "WORDINDEX_MAX_TERM_LEN";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Registry capacity; documents past it are refused.
    pub max_documents: usize,
    /// Bucket count the diagnostics lay terms out over.
    pub bucket_count: usize,
    /// K used by the frequent-terms report when none is given.
    pub top_terms: usize,
    pub max_term_len: usize,
    pub max_name_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_documents: DEFAULT_MAX_DOCUMENTS,
            bucket_count: DEFAULT_BUCKET_COUNT,
            top_terms: DEFAULT_TOP_TERMS,
            max_term_len: DEFAULT_MAX_TERM_LEN,
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

impl EngineConfig {
    /// Defaults, overridden by any `WORDINDEX_*` variable that holds a positive integer.
    pub fn from_env() -> EngineConfig {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> EngineConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: usize| {
            lookup(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };

        EngineConfig {
            max_documents: read(ENV_VAR_MAX_DOCS, DEFAULT_MAX_DOCUMENTS),
            bucket_count: read(ENV_VAR_BUCKETS, DEFAULT_BUCKET_COUNT),
            top_terms: read(ENV_VAR_TOP_TERMS, DEFAULT_TOP_TERMS),
            max_term_len: read(ENV_VAR_MAX_TERM_LEN, DEFAULT_MAX_TERM_LEN),
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}
