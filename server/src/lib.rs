use axum::{extract::{Path, Query, State}, http::StatusCode, response::{IntoResponse, Response}, routing::get, Json, Router};
use recipes_core::persist::{load_corpus, IndexPaths};
use recipes_core::{Corpus, Document, DocumentStore, EngineError, InvertedIndex, Posting, Recipe, ScoredDocument, SearchEngine};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

const DEFAULT_LIST_LIMIT: usize = 15;
const MAX_LIST_LIMIT: usize = 100;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default, deserialize_with = "lenient_usize")]
    pub k: Option<usize>,
}

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default, deserialize_with = "lenient_usize")]
    pub limit: Option<usize>,
}

/// Numeric query parameters that do not parse fall back to the route default.
fn lenient_usize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_ms: f64,
    pub total_hits: usize,
    pub results: Vec<ScoredDocument>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
}

/// Errors surfaced to HTTP clients.
#[derive(Debug)]
pub enum ApiError {
    NotReady,
    NotFound(String),
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::NotReady => ApiError::NotReady,
            EngineError::NotFound(id) => ApiError::NotFound(id.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotReady => (StatusCode::SERVICE_UNAVAILABLE, "Data still loading. Retry in a minute."),
            ApiError::NotFound(id) => {
                tracing::info!(id = %id, "recipe not found");
                (StatusCode::NOT_FOUND, "Recipe not found")
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub fn build_app(engine: Arc<SearchEngine>) -> Router {
    let app_state = AppState { engine };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/recipe/:id", get(recipe_handler))
        .route("/recipes", get(list_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Load persisted artifacts on a blocking thread and install them once complete.
/// The engine keeps answering `NotReady` until then, and stays that way if loading fails.
pub fn spawn_index_load(engine: Arc<SearchEngine>, index_dir: PathBuf) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        tracing::info!(index = %index_dir.display(), "loading index in background");
        match load_corpus(&IndexPaths::new(&index_dir)) {
            Ok((corpus, _meta)) => engine.install(corpus),
            Err(e) => tracing::error!(error = %e, "failed to load index"),
        }
    })
}

/// One-recipe corpus for running the API without built artifacts.
/// Postings carry a fixed score of 1 so the sample ranks visibly.
pub fn lite_corpus() -> Corpus {
    let mut soup = Recipe::new("Chicken Soup (test)");
    soup.calories = Some(200.0);
    let store = DocumentStore::from(vec![Document::new(0, soup)]);
    let postings: BTreeMap<String, Vec<Posting>> = ["chicken", "soup", "test"]
        .into_iter()
        .map(|term| (term.to_string(), vec![Posting { doc_id: 0, score: 1.0 }]))
        .collect();
    Corpus::from_parts(InvertedIndex::from_postings(postings), store).unwrap_or_default()
}

async fn root_handler(State(state): State<AppState>) -> &'static str {
    if state.engine.is_ready() {
        "Search API is running. Try /search?q=chicken"
    } else {
        "Search API is running. Loading data... try /search?q=chicken in a minute."
    }
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    let config = state.engine.config();
    let k = params.k.unwrap_or(config.default_top_k).min(config.max_top_k);
    let results = state.engine.search_hits(&params.q, Some(k))?;
    tracing::info!(query = %params.q, matched = results.total_hits, returned = results.hits.len(), "search");
    Ok(Json(SearchResponse {
        query: params.q,
        took_ms: start.elapsed().as_secs_f64() * 1000.0,
        total_hits: results.total_hits,
        results: results.hits,
    }))
}

pub async fn recipe_handler(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<Json<Document>, ApiError> {
    if !state.engine.is_ready() {
        return Err(ApiError::NotReady);
    }
    // Ids that are not valid document ids (negative, non-numeric, too large) name no recipe.
    let id = raw_id.parse().map_err(|_| ApiError::NotFound(raw_id.clone()))?;
    let doc = state.engine.get_document(id)?;
    tracing::info!(id, title = %doc.recipe.title, "recipe");
    Ok(Json(doc))
}

pub async fn list_handler(State(state): State<AppState>, Query(params): Query<ListParams>) -> Result<Json<Vec<Document>>, ApiError> {
    let limit = params.limit.filter(|&l| l > 0).unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);
    Ok(Json(state.engine.list(limit)?))
}
