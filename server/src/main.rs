use anyhow::Result;
use axum::Router;
use clap::Parser;
use recipes_core::{SearchConfig, SearchEngine};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};
use server::{build_app, lite_corpus, spawn_index_load};
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Index directory path
    #[arg(long, default_value = "./index")]
    index: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 3000)]
    port: u16,
    /// Results returned when a query does not pass `k`
    #[arg(long, default_value_t = 20)]
    k: usize,
    /// Upper bound on `k`
    #[arg(long, default_value_t = 100)]
    max_k: usize,
    /// Serve a one-recipe sample instead of loading the index
    #[arg(long, default_value_t = false)]
    lite: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = SearchConfig { default_top_k: args.k, max_top_k: args.max_k };

    let engine = Arc::new(SearchEngine::new(config));
    if args.lite {
        engine.install(lite_corpus());
        tracing::info!("lite mode: serving sample data");
    } else {
        // Accept requests right away; data routes answer 503 until the load completes.
        spawn_index_load(Arc::clone(&engine), args.index.clone());
    }
    let app: Router = build_app(engine);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
