//! Recipe full-text search: a shared tokenizer, a batch TF-IDF index builder,
//! and an in-memory query engine over the resulting inverted index.

pub mod builder;
pub mod collection;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod persist;
pub mod query;
pub mod tokenizer;

pub use builder::IndexBuilder;
pub use config::{FieldWeights, SearchConfig};
pub use document::{DocId, Document, Recipe, TokenizedDocument};
pub use engine::SearchEngine;
pub use error::{BuildError, EngineError, IndexError};
pub use index::{DocumentStore, InvertedIndex, Posting};
pub use query::{Corpus, ScoredDocument, SearchResults};
