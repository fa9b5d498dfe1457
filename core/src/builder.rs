use crate::config::FieldWeights;
use crate::document::{DocId, Document, Recipe, TokenizedDocument};
use crate::error::BuildError;
use crate::index::{DocumentStore, InvertedIndex, Posting};
use crate::query::Corpus;
use std::collections::{BTreeMap, HashMap};

/// Occurrences of one term in each field group of one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldCounts {
    pub title: u32,
    pub category: u32,
    pub tag: u32,
}

impl FieldCounts {
    fn weighted(&self, w: &FieldWeights) -> f64 {
        w.title * self.title as f64 + w.category * self.category as f64 + w.tag * self.tag as f64
    }
}

/// Per-term counts for every distinct term of a tokenized document.
pub fn count_terms(doc: &TokenizedDocument) -> HashMap<&str, FieldCounts> {
    let mut counts: HashMap<&str, FieldCounts> = HashMap::new();
    for t in &doc.title_tokens {
        counts.entry(t.as_str()).or_default().title += 1;
    }
    for t in &doc.category_tokens {
        counts.entry(t.as_str()).or_default().category += 1;
    }
    for t in &doc.tag_tokens {
        counts.entry(t.as_str()).or_default().tag += 1;
    }
    counts
}

pub struct IndexBuilder {
    weights: FieldWeights,
}

impl Default for IndexBuilder {
    fn default() -> Self { Self::new(FieldWeights::default()) }
}

impl IndexBuilder {
    pub fn new(weights: FieldWeights) -> Self { Self { weights } }

    pub fn weights(&self) -> FieldWeights { self.weights }

    /// Build the inverted index and document store over the whole collection.
    /// The Nth recipe receives id N-1.
    pub fn build(&self, recipes: Vec<Recipe>) -> Result<Corpus, BuildError> {
        self.weights.validate().map_err(BuildError::InvalidWeights)?;
        if recipes.len() > DocId::MAX as usize {
            return Err(BuildError::TooManyDocuments(recipes.len()));
        }

        let docs: Vec<Document> = recipes
            .into_iter()
            .enumerate()
            .map(|(pos, recipe)| Document::new(pos as DocId, recipe))
            .collect();
        let num_docs = docs.len();

        // First pass: field counts per (term, doc). Documents are visited in id
        // order so each posting list comes out sorted by doc_id.
        let mut raw: HashMap<String, Vec<(DocId, FieldCounts)>> = HashMap::new();
        for doc in &docs {
            let tokenized = TokenizedDocument::from_document(doc);
            for (term, counts) in count_terms(&tokenized) {
                if let Some(plist) = raw.get_mut(term) {
                    plist.push((doc.id, counts));
                } else {
                    raw.insert(term.to_string(), vec![(doc.id, counts)]);
                }
            }
        }
        tracing::info!(num_docs, num_terms = raw.len(), "tokenized documents");

        // Second pass: df is the posting list length, idf = ln(N / df).
        let n = num_docs as f64;
        let postings: BTreeMap<String, Vec<Posting>> = raw
            .into_iter()
            .map(|(term, plist)| {
                let idf = (n / plist.len() as f64).ln();
                let out = plist
                    .into_iter()
                    .map(|(doc_id, counts)| Posting { doc_id, score: counts.weighted(&self.weights) * idf })
                    .collect();
                (term, out)
            })
            .collect();

        let index = InvertedIndex::from_postings(postings);
        let store = DocumentStore::from(docs);
        tracing::info!(num_docs, num_terms = index.num_terms(), "index build complete");
        Ok(Corpus::new(index, store))
    }
}
