use crate::config::FieldWeights;
use crate::error::IndexError;
use crate::index::{DocumentStore, InvertedIndex};
use crate::query::Corpus;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, create_dir_all, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMeta {
    pub total_docs: usize,
    pub num_terms: usize,
    pub weights: FieldWeights,
    pub created_at: String,
    pub version: u32,
}

impl IndexMeta {
    pub fn for_corpus(corpus: &Corpus, weights: FieldWeights, created_at: impl Into<String>) -> Self {
        Self {
            total_docs: corpus.store().len(),
            num_terms: corpus.index().num_terms(),
            weights,
            created_at: created_at.into(),
            version: FORMAT_VERSION,
        }
    }
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn inverted(&self) -> PathBuf { self.root.join("inverted.json") }
    pub fn documents(&self) -> PathBuf { self.root.join("documents.json") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> IndexError {
    let path = path.to_path_buf();
    move |source| IndexError::Io { path, source }
}

/// Write `value` as JSON to a sibling temp file, then rename it over `path`.
fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<(), IndexError> {
    let tmp = path.with_extension("json.tmp");
    let f = File::create(&tmp).map_err(io_err(&tmp))?;
    let mut w = BufWriter::new(f);
    let res = if pretty { serde_json::to_writer_pretty(&mut w, value) } else { serde_json::to_writer(&mut w, value) };
    res.map_err(|source| IndexError::Json { path: tmp.clone(), source })?;
    w.flush().map_err(io_err(&tmp))?;
    fs::rename(&tmp, path).map_err(io_err(path))?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, IndexError> {
    if !path.exists() {
        return Err(IndexError::MissingArtifact(path.to_path_buf()));
    }
    let f = File::open(path).map_err(io_err(path))?;
    serde_json::from_reader(BufReader::new(f)).map_err(|source| IndexError::Json { path: path.to_path_buf(), source })
}

/// Persist the index, the document store and, last, the meta file.
/// An index directory without `meta.json` is not loadable.
pub fn save_corpus(paths: &IndexPaths, corpus: &Corpus, meta: &IndexMeta) -> Result<(), IndexError> {
    create_dir_all(&paths.root).map_err(io_err(&paths.root))?;
    let meta_path = paths.meta();
    if meta_path.exists() {
        fs::remove_file(&meta_path).map_err(io_err(&meta_path))?;
    }
    write_json(&paths.inverted(), corpus.index(), false)?;
    write_json(&paths.documents(), corpus.store(), false)?;
    write_json(&meta_path, meta, true)?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<IndexMeta, IndexError> {
    read_json(&paths.meta())
}

/// Load all artifacts and check them against each other.
pub fn load_corpus(paths: &IndexPaths) -> Result<(Corpus, IndexMeta), IndexError> {
    let meta = load_meta(paths)?;
    if meta.version != FORMAT_VERSION {
        return Err(IndexError::Inconsistent(format!(
            "unsupported index version {} (expected {FORMAT_VERSION})",
            meta.version
        )));
    }
    let store: DocumentStore = read_json(&paths.documents())?;
    if store.len() != meta.total_docs {
        return Err(IndexError::Inconsistent(format!(
            "meta.json reports {} documents but documents.json holds {}",
            meta.total_docs,
            store.len()
        )));
    }
    let index: InvertedIndex = read_json(&paths.inverted())?;
    let corpus = Corpus::from_parts(index, store)?;
    tracing::info!(root = %paths.root.display(), total_docs = meta.total_docs, num_terms = meta.num_terms, "loaded index artifacts");
    Ok((corpus, meta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::IndexBuilder;
    use crate::document::Recipe;
    use tempfile::tempdir;

    fn corpus() -> Corpus {
        let mut soup = Recipe::new("Tomato Soup");
        soup.categories = Some(vec!["Soup".into(), "Vegetarian".into()]);
        soup.calories = Some(213.7);
        IndexBuilder::default().build(vec![soup, Recipe::new("Grilled Cheese"), Recipe::new("Café Latte")]).unwrap()
    }

    #[test]
    fn save_then_load_is_identical() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        let c = corpus();
        let meta = IndexMeta::for_corpus(&c, FieldWeights::default(), "2024-01-01T00:00:00Z");
        save_corpus(&paths, &c, &meta).unwrap();

        let (loaded, loaded_meta) = load_corpus(&paths).unwrap();
        assert_eq!(loaded_meta, meta);
        assert_eq!(loaded.index(), c.index());
        assert_eq!(loaded.store(), c.store());
        assert!(!dir.path().join("inverted.json.tmp").exists());
    }

    #[test]
    fn missing_meta_is_not_loadable() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        let c = corpus();
        let meta = IndexMeta::for_corpus(&c, FieldWeights::default(), "");
        save_corpus(&paths, &c, &meta).unwrap();
        fs::remove_file(paths.meta()).unwrap();
        assert!(matches!(load_corpus(&paths), Err(IndexError::MissingArtifact(_))));
    }

    #[test]
    fn document_count_mismatch_is_rejected() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        let c = corpus();
        let mut meta = IndexMeta::for_corpus(&c, FieldWeights::default(), "");
        meta.total_docs = 7;
        save_corpus(&paths, &c, &meta).unwrap();
        assert!(matches!(load_corpus(&paths), Err(IndexError::Inconsistent(_))));
    }
}
