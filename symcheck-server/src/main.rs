//! The `symcheck` launcher.
//!
//! Startup order is fixed: resolve the API key (fatal if absent, before the
//! dataset is touched), build the corpus once (fatal on any read, schema,
//! or embedding failure), then serve. The engine handle is immutable and
//! shared for the process lifetime; rebuilding requires a restart.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use symcheck_server::{AppState, prepare_engine, router};

#[derive(Parser)]
#[command(name = "symcheck", about = "Medical symptom checker with case-grounded advice")]
struct Args {
    /// Path to the case dataset (.csv, .xlsx, or .xls).
    #[arg(long, default_value = "medical_symptom_dataset.xlsx")]
    dataset: PathBuf,

    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Path to the TOML secrets file tried before the environment.
    #[arg(long, default_value = "secrets.toml")]
    secrets: PathBuf,

    /// Embedding model name.
    #[arg(long, default_value = symcheck_rag::openai::DEFAULT_EMBEDDING_MODEL)]
    embedding_model: String,

    /// Chat model name.
    #[arg(long, default_value = symcheck_model::DEFAULT_CHAT_MODEL)]
    chat_model: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let engine = prepare_engine(
        &args.secrets,
        &args.dataset,
        &args.embedding_model,
        &args.chat_model,
    )
    .await?;
    info!(
        cases = engine.case_count(),
        chunks = engine.indexed_chunks().await,
        "corpus ready"
    );

    let app = router(AppState { engine: Arc::new(engine) });
    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!(addr = %listener.local_addr()?, "symcheck listening");
    axum::serve(listener, app).await?;
    Ok(())
}
