//! Startup wiring for the `symcheck` binary.
//!
//! The order is fixed: resolve the API key, construct the hosted clients,
//! then build the corpus. A missing key is fatal before the dataset file is
//! touched.

use std::path::Path;
use std::sync::Arc;

use symcheck_engine::{AnswerEngine, EngineBuilder};
use symcheck_model::OpenAIChatModel;
use symcheck_rag::OpenAIEmbedder;

use crate::credentials::resolve_api_key_from;
use crate::error::Result;

/// Resolve credentials and run the one-time corpus build.
///
/// Loads `.env` into the environment (best effort) before resolving.
///
/// # Errors
///
/// Returns [`ServerError::Config`](crate::ServerError::Config) when no API
/// key is found, and propagates client-construction and corpus-build
/// failures. All of these are fatal at startup.
pub async fn prepare_engine(
    secrets_path: &Path,
    dataset_path: &Path,
    embedding_model: &str,
    chat_model: &str,
) -> Result<AnswerEngine> {
    dotenvy::dotenv().ok();
    prepare_engine_with(secrets_path, dataset_path, embedding_model, chat_model, |name| {
        std::env::var(name).ok()
    })
    .await
}

async fn prepare_engine_with(
    secrets_path: &Path,
    dataset_path: &Path,
    embedding_model: &str,
    chat_model: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Result<AnswerEngine> {
    // Credentials first: nothing operates without the key.
    let api_key = resolve_api_key_from(secrets_path, env)?;

    let embedder = Arc::new(OpenAIEmbedder::new(&api_key)?.with_model(embedding_model));
    let chat = Arc::new(OpenAIChatModel::new(&api_key)?.with_model(chat_model));

    Ok(EngineBuilder::new(embedder, chat).build(dataset_path).await?)
}
