use crate::{
    data::{
        document::DocumentRegistry, index::InvertedIndex, DocumentId, IndexError,
        DEFAULT_MAX_TERM_LEN,
    },
    index_debug, index_log,
    lexer::{
        stopwords::is_stop_word,
        tokenizer::{DocumentSource, Tokenable, WhitespaceTokenizer},
    },
    util::text::normalize_bounded,
};

/// Feeds documents into the index and the registry.
///
/// Each token is normalized, dropped if nothing is left or it is a stop word, and
/// otherwise counted against its document.
pub struct IndexBuilder<'a> {
    index: &'a mut InvertedIndex,
    registry: &'a mut DocumentRegistry,
    max_term_len: usize,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(
        index: &'a mut InvertedIndex,
        registry: &'a mut DocumentRegistry,
    ) -> IndexBuilder<'a> {
        IndexBuilder {
            index,
            registry,
            max_term_len: DEFAULT_MAX_TERM_LEN,
        }
    }

    pub fn with_max_term_len(mut self, max_term_len: usize) -> Self {
        self.max_term_len = max_term_len;
        self
    }

    /// Register a source, read it and index its tokens.
    ///
    /// The document is registered before its source is read, so an unreadable source
    /// still holds an identifier and a capacity slot; it just contributes no terms.
    /// Returns the identifier and the number of terms indexed.
    pub fn ingest<S: DocumentSource>(
        &mut self,
        source: &S,
    ) -> Result<(DocumentId, usize), IndexError> {
        let (doc_id, indexed) = self.register_and_read(source)?;
        Ok((doc_id, indexed?))
    }

    /// Like [`IndexBuilder::ingest`], but a read failure comes back alongside the
    /// identifier the document was registered under. Only a refused registration is
    /// an outer error.
    pub fn register_and_read<S: DocumentSource>(
        &mut self,
        source: &S,
    ) -> Result<(DocumentId, Result<usize, IndexError>), IndexError> {
        let doc_id = self.registry.register(source.name())?;
        Ok((doc_id, self.read_into(doc_id, source)))
    }

    fn read_into<S: DocumentSource>(
        &mut self,
        doc_id: DocumentId,
        source: &S,
    ) -> Result<usize, IndexError> {
        let body = source.read()?;
        let tokens = WhitespaceTokenizer::tokenize(body.as_slice());
        let indexed = self.index_tokens(doc_id, tokens)?;
        index_log!(
            "IndexBuilder",
            "indexed doc_id={} name={} terms={}",
            doc_id,
            source.name(),
            indexed
        );
        Ok(indexed)
    }

    /// Index a token stream for an already registered document.
    pub fn index_tokens<I, T>(
        &mut self,
        doc_id: DocumentId,
        tokens: I,
    ) -> Result<usize, IndexError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        if self.registry.get(doc_id).is_none() {
            return Err(IndexError::UnknownDocument(doc_id));
        }

        let mut indexed = 0usize;
        let mut skipped = 0usize;
        for token in tokens {
            if self.index_token(doc_id, token) {
                indexed += 1;
            } else {
                skipped += 1;
            }
        }
        self.registry.record_terms(doc_id, indexed)?;
        index_debug!(
            "IndexBuilder",
            "doc_id={} indexed={} skipped={}",
            doc_id,
            indexed,
            skipped
        );
        Ok(indexed)
    }

    /// Returns whether the token made it into the index.
    fn index_token<T: AsRef<[u8]>>(&mut self, doc_id: DocumentId, token: T) -> bool {
        let term = normalize_bounded(token, self.max_term_len);
        if term.is_empty() || is_stop_word(&term) {
            return false;
        }
        self.index.insert(&term, doc_id);
        true
    }
}
