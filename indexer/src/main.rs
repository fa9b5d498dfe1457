use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use recipes_core::collection::read_collection_file;
use recipes_core::persist::{load_corpus, save_corpus, IndexMeta, IndexPaths};
use recipes_core::{FieldWeights, IndexBuilder, Recipe};
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query the recipe TF-IDF inverted index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from input JSON/JSONL files or a directory
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output index directory
        #[arg(long)]
        output: String,
        /// Weight of a title occurrence
        #[arg(long, default_value_t = 3.0)]
        title_weight: f64,
        /// Weight of a category occurrence
        #[arg(long, default_value_t = 2.0)]
        category_weight: f64,
        /// Weight of a description/directions/ingredients occurrence
        #[arg(long, default_value_t = 1.0)]
        tag_weight: f64,
    },
    /// Run a query against a built index and print the ranked recipes
    Search {
        /// Index directory
        #[arg(long, default_value = "./index")]
        index: String,
        /// Maximum number of results
        #[arg(long, default_value_t = 20)]
        k: usize,
        /// Free-text query
        query: Vec<String>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, title_weight, category_weight, tag_weight } => {
            let weights = FieldWeights { title: title_weight, category: category_weight, tag: tag_weight };
            build_index(Path::new(&input), Path::new(&output), weights)
        }
        Commands::Search { index, k, query } => search_index(Path::new(&index), &query.join(" "), k),
    }
}

/// Files to ingest, in a stable order so positional ids survive rebuilds.
fn input_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walking {}", input.display()))?;
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input path {} does not exist", input.display());
    }
    Ok(files)
}

fn read_recipes(input: &Path) -> Result<Vec<Recipe>> {
    let mut recipes = Vec::new();
    for file in input_files(input)? {
        let batch = read_collection_file(&file)?;
        tracing::info!(file = %file.display(), recipes = batch.len(), "read input file");
        recipes.extend(batch);
    }
    Ok(recipes)
}

fn build_index(input: &Path, output: &Path, weights: FieldWeights) -> Result<()> {
    // Everything is built in memory first; a bad input leaves the output untouched.
    let recipes = read_recipes(input)?;
    tracing::info!(num_docs = recipes.len(), "ingested recipes");
    let corpus = IndexBuilder::new(weights).build(recipes)?;

    let created_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default();
    let meta = IndexMeta::for_corpus(&corpus, weights, created_at);
    save_corpus(&IndexPaths::new(output), &corpus, &meta)
        .with_context(|| format!("writing index to {}", output.display()))?;

    tracing::info!(output = %output.display(), total_docs = meta.total_docs, num_terms = meta.num_terms, "index build complete");
    Ok(())
}

fn search_index(index: &Path, query: &str, k: usize) -> Result<()> {
    let (corpus, _meta) = load_corpus(&IndexPaths::new(index))?;
    let results = corpus.search_hits(query, k);
    println!("{} matching recipes", results.total_hits);
    for hit in results.hits {
        println!("{:>10.4}  [{}] {}", hit.score, hit.document.id, hit.document.recipe.title);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipes_core::BuildError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn directory_files_are_read_in_name_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.jsonl"), "{\"title\": \"Second\"}\n{\"title\": \"Third\"}\n").unwrap();
        fs::write(dir.path().join("a.json"), r#"[{"title": "First"}]"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let titles: Vec<String> = read_recipes(dir.path()).unwrap().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn build_writes_loadable_artifacts() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("recipes.json");
        fs::write(&input, r#"[{"title": "Chicken Soup", "categories": ["Soup"]}, {"title": "Beef Stew", "desc": null}]"#).unwrap();
        let out = dir.path().join("index");
        build_index(&input, &out, FieldWeights::default()).unwrap();

        let (corpus, meta) = load_corpus(&IndexPaths::new(&out)).unwrap();
        assert_eq!(meta.total_docs, 2);
        assert_eq!(corpus.search("soup", 20)[0].recipe.title, "Chicken Soup");
    }

    #[test]
    fn malformed_input_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("recipes.json");
        fs::write(&input, r#"[{"title": "Ok"}, {"calories": 100}]"#).unwrap();
        let out = dir.path().join("index");
        let err = build_index(&input, &out, FieldWeights::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<BuildError>(), Some(BuildError::Parse { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(read_recipes(&dir.path().join("nope.json")).is_err());
    }
}
