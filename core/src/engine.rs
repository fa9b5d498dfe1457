use crate::config::SearchConfig;
use crate::document::{DocId, Document};
use crate::error::{EngineError, IndexError};
use crate::index::{DocumentStore, InvertedIndex};
use crate::query::{Corpus, SearchResults};
use parking_lot::RwLock;
use std::sync::Arc;

/// Owned search engine. Starts out not ready; queries fail with
/// [`EngineError::NotReady`] until a complete corpus is installed.
///
/// The corpus is swapped in whole under the write lock, so concurrent readers
/// see either no corpus or a fully populated one. Readers only hold the read
/// lock long enough to clone the `Arc`.
pub struct SearchEngine {
    corpus: RwLock<Option<Arc<Corpus>>>,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { corpus: RwLock::new(None), config }
    }

    /// An engine that is ready from the start.
    pub fn with_corpus(corpus: Corpus, config: SearchConfig) -> Self {
        Self { corpus: RwLock::new(Some(Arc::new(corpus))), config }
    }

    pub fn config(&self) -> SearchConfig { self.config }

    pub fn is_ready(&self) -> bool { self.corpus.read().is_some() }

    /// Install an index and its document store, then flip readiness.
    pub fn load(&self, index: InvertedIndex, store: DocumentStore) -> Result<(), IndexError> {
        let corpus = Corpus::from_parts(index, store)?;
        self.install(corpus);
        Ok(())
    }

    /// Replace the current corpus, if any, with `corpus`.
    pub fn install(&self, corpus: Corpus) {
        let num_docs = corpus.store().len();
        let num_terms = corpus.index().num_terms();
        let corpus = Arc::new(corpus);
        *self.corpus.write() = Some(corpus);
        tracing::info!(num_docs, num_terms, "index loaded, ready for search");
    }

    fn snapshot(&self) -> Result<Arc<Corpus>, EngineError> {
        self.corpus.read().clone().ok_or(EngineError::NotReady)
    }

    /// Ranked documents for `query`, at most `top_k` (default from config).
    pub fn search(&self, query: &str, top_k: Option<usize>) -> Result<Vec<Document>, EngineError> {
        Ok(self.search_hits(query, top_k)?.into_documents())
    }

    pub fn search_hits(&self, query: &str, top_k: Option<usize>) -> Result<SearchResults, EngineError> {
        let corpus = self.snapshot()?;
        let k = top_k.unwrap_or(self.config.default_top_k);
        Ok(corpus.search_hits(query, k))
    }

    pub fn get_document(&self, id: DocId) -> Result<Document, EngineError> {
        let corpus = self.snapshot()?;
        corpus.get(id).cloned().ok_or(EngineError::NotFound(id))
    }

    pub fn list(&self, limit: usize) -> Result<Vec<Document>, EngineError> {
        Ok(self.snapshot()?.list(limit))
    }
}

impl Default for SearchEngine {
    fn default() -> Self { Self::new(SearchConfig::default()) }
}
