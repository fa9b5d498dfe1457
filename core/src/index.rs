use crate::document::{DocId, Document};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    #[serde(rename = "id")]
    pub doc_id: DocId,
    pub score: f64, // weighted tf * idf, never negative
}

/// Term to postings. Postings are sorted by doc_id; terms serialize in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Vec<Posting>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn from_postings(postings: BTreeMap<String, Vec<Posting>>) -> Self {
        Self { postings }
    }

    /// Postings for a term; unknown terms have none.
    pub fn postings(&self, term: &str) -> &[Posting] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &[Posting])> {
        self.postings.iter().map(|(t, p)| (t.as_str(), p.as_slice()))
    }
}

/// Documents keyed by id. Persisted as a JSON array ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Document>", into = "Vec<Document>")]
pub struct DocumentStore {
    docs: HashMap<DocId, Document>,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, id: DocId) -> Option<&Document> { self.docs.get(&id) }

    pub fn contains(&self, id: DocId) -> bool { self.docs.contains_key(&id) }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    /// Documents in ascending id order.
    pub fn sorted(&self) -> Vec<&Document> {
        let mut docs: Vec<&Document> = self.docs.values().collect();
        docs.sort_by_key(|d| d.id);
        docs
    }
}

impl From<Vec<Document>> for DocumentStore {
    fn from(docs: Vec<Document>) -> Self {
        Self { docs: docs.into_iter().map(|d| (d.id, d)).collect() }
    }
}

impl From<DocumentStore> for Vec<Document> {
    fn from(store: DocumentStore) -> Self {
        let mut docs: Vec<Document> = store.docs.into_values().collect();
        docs.sort_by_key(|d| d.id);
        docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Recipe;

    #[test]
    fn unknown_term_has_no_postings() {
        let index = InvertedIndex::new();
        assert!(index.postings("nothing").is_empty());
    }

    #[test]
    fn store_serializes_as_sorted_array() {
        let store = DocumentStore::from(vec![
            Document::new(2, Recipe::new("c")),
            Document::new(0, Recipe::new("a")),
            Document::new(1, Recipe::new("b")),
        ]);
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"[{"id":0,"title":"a"},{"id":1,"title":"b"},{"id":2,"title":"c"}]"#);
        let back: DocumentStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn posting_uses_short_keys() {
        let json = serde_json::to_string(&Posting { doc_id: 4, score: 1.5 }).unwrap();
        assert_eq!(json, r#"{"id":4,"score":1.5}"#);
    }
}
