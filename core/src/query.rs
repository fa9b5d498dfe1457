use crate::document::{DocId, Document};
use crate::error::IndexError;
use crate::index::{DocumentStore, InvertedIndex};
use crate::tokenizer::tokenize;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// A document with the relevance score it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub score: f64,
    #[serde(flatten)]
    pub document: Document,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    /// Number of stored documents that matched any query term, before truncation.
    pub total_hits: usize,
    pub hits: Vec<ScoredDocument>,
}

impl SearchResults {
    pub fn into_documents(self) -> Vec<Document> {
        self.hits.into_iter().map(|h| h.document).collect()
    }
}

/// An inverted index together with the documents its postings refer to. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    index: InvertedIndex,
    store: DocumentStore,
}

impl Corpus {
    pub(crate) fn new(index: InvertedIndex, store: DocumentStore) -> Self {
        Self { index, store }
    }

    /// Pair an index with a store, checking that every posting refers to a stored document.
    pub fn from_parts(index: InvertedIndex, store: DocumentStore) -> Result<Self, IndexError> {
        for (term, postings) in index.terms() {
            if let Some(p) = postings.iter().find(|p| !store.contains(p.doc_id)) {
                return Err(IndexError::Inconsistent(format!(
                    "term {term:?} has a posting for unknown document {}",
                    p.doc_id
                )));
            }
        }
        Ok(Self { index, store })
    }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn store(&self) -> &DocumentStore { &self.store }

    pub fn into_parts(self) -> (InvertedIndex, DocumentStore) { (self.index, self.store) }

    /// Every matching document id with its summed score, best first.
    /// Equal scores are ordered by ascending id.
    pub fn rank(&self, query: &str) -> Vec<(DocId, f64)> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut scores: HashMap<DocId, f64> = HashMap::new();
        for term in &tokens {
            for p in self.index.postings(term) {
                *scores.entry(p.doc_id).or_insert(0.0) += p.score;
            }
        }

        let mut scored: Vec<(DocId, f64)> = scores.into_iter().collect();
        scored.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            Ordering::Equal => a.0.cmp(&b.0),
            other => other,
        });
        tracing::debug!(query, tokens = ?tokens, matched = scored.len(), "ranked query");
        scored
    }

    /// The `top_k` best documents for `query` with their scores.
    pub fn search_hits(&self, query: &str, top_k: usize) -> SearchResults {
        let resolved: Vec<(&Document, f64)> = self
            .rank(query)
            .into_iter()
            .filter_map(|(id, score)| self.store.get(id).map(|doc| (doc, score)))
            .collect();
        let total_hits = resolved.len();
        let hits = resolved
            .into_iter()
            .take(top_k)
            .map(|(doc, score)| ScoredDocument { score, document: doc.clone() })
            .collect();
        SearchResults { total_hits, hits }
    }

    pub fn search(&self, query: &str, top_k: usize) -> Vec<Document> {
        self.search_hits(query, top_k).into_documents()
    }

    pub fn get(&self, id: DocId) -> Option<&Document> { self.store.get(id) }

    /// The first `limit` documents by id.
    pub fn list(&self, limit: usize) -> Vec<Document> {
        self.store.sorted().into_iter().take(limit).cloned().collect()
    }
}
