use crate::DocId;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems with the input collection. No artifacts are written when one occurs.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed recipe in {}{}: {source}", .path.display(), line_suffix(.line))]
    Parse {
        path: PathBuf,
        line: Option<usize>,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: expected an array of recipes or a single recipe object", .path.display())]
    InvalidShape { path: PathBuf },

    #[error("invalid field weights: {0}")]
    InvalidWeights(String),

    #[error("collection has {0} documents, more than document ids can address")]
    TooManyDocuments(usize),
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

/// Outcomes of query-time operations that are not results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("index is still loading")]
    NotReady,

    #[error("no document with id {0}")]
    NotFound(DocId),
}

/// Problems reading or writing persisted index artifacts.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("index artifact missing: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("inconsistent index: {0}")]
    Inconsistent(String),
}
