use serde::{Deserialize, Serialize};

use crate::{
    config::EngineConfig,
    data::{
        builder::IndexBuilder,
        document::{Document, DocumentRegistry},
        index::InvertedIndex,
        stats::IndexStats,
        DocumentId, IndexError,
    },
    index_log, index_warn,
    lexer::{
        query::{QueryEngine, SearchOutcome, TermFrequency},
        tokenizer::DocumentSource,
        QueryError,
    },
};

/// A source that could not contribute to the index during a build.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BuildFailure {
    /// Set when the document was registered before the failure.
    pub doc_id: Option<DocumentId>,
    pub name: String,
    pub reason: String,
}

/// Summary of one [`Session::build`] call.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub documents_indexed: usize,
    pub terms_indexed: usize,
    pub failures: Vec<BuildFailure>,
    /// Sources not attempted because the registry was full.
    pub refused: Vec<String>,
}

/// Owns everything one indexing run needs: configuration, the index and the
/// document registry.
///
/// Documents go in through [`Session::ingest`] or [`Session::build`]; queries are
/// answered once at least one document has been registered.
#[derive(Debug, Clone)]
pub struct Session {
    config: EngineConfig,
    index: InvertedIndex,
    registry: DocumentRegistry,
    built: bool,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(EngineConfig::default())
    }
}

impl Session {
    pub fn new(config: EngineConfig) -> Session {
        let registry = DocumentRegistry::with_capacity(config.max_documents, config.max_name_len);
        Session {
            config,
            index: InvertedIndex::new(),
            registry,
            built: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Registered documents, in identifier order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> + '_ {
        self.registry.iter()
    }

    /// Index a single source. See [`IndexBuilder::ingest`].
    pub fn ingest<S: DocumentSource>(
        &mut self,
        source: &S,
    ) -> Result<(DocumentId, usize), IndexError> {
        let result = self.builder().ingest(source);
        self.mark_built();
        result
    }

    fn register_and_read<S: DocumentSource>(
        &mut self,
        source: &S,
    ) -> Result<(DocumentId, Result<usize, IndexError>), IndexError> {
        let result = self.builder().register_and_read(source);
        self.mark_built();
        result
    }

    fn builder(&mut self) -> IndexBuilder<'_> {
        IndexBuilder::new(&mut self.index, &mut self.registry)
            .with_max_term_len(self.config.max_term_len)
    }

    fn mark_built(&mut self) {
        if !self.registry.is_empty() {
            self.built = true;
        }
    }

    /// Index every source in turn.
    ///
    /// A source that cannot be read is recorded in the report and skipped. Once the
    /// registry is full the remaining sources are refused; everything indexed so far
    /// stays queryable.
    pub fn build<I, S>(&mut self, sources: I) -> BuildReport
    where
        I: IntoIterator<Item = S>,
        S: DocumentSource,
    {
        let mut report = BuildReport::default();
        let mut sources = sources.into_iter();
        while let Some(source) = sources.next() {
            match self.register_and_read(&source) {
                Ok((_, Ok(terms))) => {
                    report.documents_indexed += 1;
                    report.terms_indexed += terms;
                }
                Err(IndexError::CapacityExceeded { max }) => {
                    report.refused.push(source.name().to_string());
                    report
                        .refused
                        .extend(sources.by_ref().map(|rest| rest.name().to_string()));
                    index_warn!(
                        "Session",
                        "document limit of {} reached, {} source(s) refused",
                        max,
                        report.refused.len()
                    );
                    break;
                }
                Ok((doc_id, Err(err))) => {
                    index_warn!("Session", "skipping '{}': {}", source.name(), err);
                    report.failures.push(BuildFailure {
                        doc_id: Some(doc_id),
                        name: source.name().to_string(),
                        reason: err.to_string(),
                    });
                }
                Err(err) => {
                    index_warn!("Session", "skipping '{}': {}", source.name(), err);
                    report.failures.push(BuildFailure {
                        doc_id: None,
                        name: source.name().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        index_log!(
            "Session",
            "build finished documents={} terms={} unique_terms={} failures={} refused={}",
            report.documents_indexed,
            report.terms_indexed,
            self.index.unique_terms(),
            report.failures.len(),
            report.refused.len()
        );
        report
    }

    pub fn search(&self, raw_term: &str) -> Result<SearchOutcome, QueryError> {
        self.engine()?.search(raw_term)
    }

    pub fn search_and(&self, term_a: &str, term_b: &str) -> Result<SearchOutcome, QueryError> {
        self.engine()?.search_and(term_a, term_b)
    }

    /// Top `k` terms by total frequency; `None` uses the configured default.
    pub fn top_terms(&self, k: Option<usize>) -> Result<Vec<TermFrequency>, QueryError> {
        Ok(self.engine()?.top_terms(k.unwrap_or(self.config.top_terms)))
    }

    pub fn stats(&self) -> Result<IndexStats, QueryError> {
        if !self.built {
            return Err(QueryError::IndexNotBuilt);
        }
        Ok(IndexStats::collect(
            &self.index,
            &self.registry,
            self.config.bucket_count,
        ))
    }

    /// Release the index and registry so a fresh corpus can be built.
    pub fn reset(&mut self) {
        self.index.clear();
        self.registry.clear();
        self.built = false;
        index_log!("Session", "index released");
    }

    fn engine(&self) -> Result<QueryEngine<'_>, QueryError> {
        if !self.built {
            return Err(QueryError::IndexNotBuilt);
        }
        Ok(QueryEngine::new(&self.index, &self.registry)
            .with_max_term_len(self.config.max_term_len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenizer::{FileSource, TextSource};

    #[test]
    fn test_queries_before_build() {
        let session = Session::default();
        assert!(!session.is_built());
        assert!(matches!(session.search("x"), Err(QueryError::IndexNotBuilt)));
        assert!(matches!(
            session.search_and("x", "y"),
            Err(QueryError::IndexNotBuilt)
        ));
        assert!(matches!(
            session.top_terms(None),
            Err(QueryError::IndexNotBuilt)
        ));
        assert!(matches!(session.stats(), Err(QueryError::IndexNotBuilt)));
    }

    #[test]
    fn test_build_reports_failures_and_continues() {
        let mut session = Session::default();
        let sources: Vec<Box<dyn DocumentSource>> = vec![
            Box::new(TextSource::new("doc0", "search engine")),
            Box::new(FileSource::new("/missing/doc1.txt")),
            Box::new(TextSource::new("doc2", "engine index")),
        ];
        let report = session.build(sources.iter().map(|s| &**s));

        assert_eq!(report.documents_indexed, 2);
        assert_eq!(report.terms_indexed, 4);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].doc_id, Some(1));
        assert_eq!(report.failures[0].name, "/missing/doc1.txt");
        assert!(report.refused.is_empty());
        assert_eq!(session.registry().len(), 3);
        assert_eq!(session.search("engine").unwrap().rows().len(), 2);
    }

    #[test]
    fn test_build_failure_keeps_id_of_long_name() {
        let mut session = Session::default();
        let path = format!("/missing/{}.txt", "x".repeat(600));
        let report = session.build(vec![
            TextSource::new("doc0", "search"),
            TextSource::new("doc1", "index"),
        ]);
        assert_eq!(report.documents_indexed, 2);

        let report = session.build(vec![FileSource::new(&path)]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].doc_id, Some(2));
        assert_eq!(report.failures[0].name, path);
        assert_eq!(session.registry().len(), 3);
        assert_eq!(session.registry().get(2).map(|d| d.name.len()), Some(511));
    }

    #[test]
    fn test_build_stops_at_capacity() {
        let config = EngineConfig {
            max_documents: 2,
            ..EngineConfig::default()
        };
        let mut session = Session::new(config);
        let report = session.build(vec![
            TextSource::new("a", "alpha"),
            TextSource::new("b", "beta"),
            TextSource::new("c", "gamma"),
            TextSource::new("d", "delta"),
        ]);
        assert_eq!(report.documents_indexed, 2);
        assert_eq!(report.refused, vec!["c".to_string(), "d".to_string()]);
        assert!(session.search("gamma").unwrap().is_not_indexed());
        assert_eq!(session.search("beta").unwrap().rows().len(), 1);
        assert!(matches!(
            session.ingest(&TextSource::new("e", "epsilon")),
            Err(IndexError::CapacityExceeded { max: 2 })
        ));
    }

    #[test]
    fn test_unreadable_only_build_is_still_built() {
        let mut session = Session::default();
        let report = session.build(vec![FileSource::new("/missing/only.txt")]);
        assert_eq!(report.failures.len(), 1);
        assert!(session.is_built());
        assert_eq!(session.stats().unwrap().document_count, 1);
        assert!(session.search("anything").unwrap().is_not_indexed());
    }

    #[test]
    fn test_top_terms_default_k() {
        let config = EngineConfig {
            top_terms: 2,
            ..EngineConfig::default()
        };
        let mut session = Session::new(config);
        session.build(vec![TextSource::new("doc", "one two two three three three")]);
        let top = session.top_terms(None).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].term, "three");
        assert_eq!(session.top_terms(Some(5)).unwrap().len(), 3);
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut session = Session::default();
        session.build(vec![TextSource::new("doc", "search")]);
        session.reset();
        assert!(!session.is_built());
        assert_eq!(session.documents().count(), 0);
        assert!(session.index().is_empty());

        session.build(vec![TextSource::new("next", "index")]);
        assert_eq!(session.documents().next().map(|d| d.id), Some(0));
        assert!(session.search("search").unwrap().is_not_indexed());
    }
}
