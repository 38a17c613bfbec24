//! End-to-end engine tests against deterministic fakes.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use symcheck_engine::{AnswerEngine, EngineBuilder, EngineError};
use symcheck_model::MockChatModel;
use symcheck_rag::{EmbeddingProvider, RagConfig, RagError};
use tempfile::NamedTempFile;

const DIM: usize = 32;

/// Deterministic hash-based embedder with per-method call counters.
struct HashEmbedder {
    embed_calls: AtomicUsize,
    batch_calls: AtomicUsize,
    fail: bool,
}

impl HashEmbedder {
    fn new() -> Self {
        Self { embed_calls: AtomicUsize::new(0), batch_calls: AtomicUsize::new(0), fail: false }
    }

    fn failing() -> Self {
        Self { embed_calls: AtomicUsize::new(0), batch_calls: AtomicUsize::new(0), fail: true }
    }

    fn embed_text(text: &str) -> Vec<f32> {
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut emb = vec![0.0f32; DIM];
        for (i, v) in emb.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            emb.iter_mut().for_each(|x| *x /= norm);
        }
        emb
    }

    fn error() -> RagError {
        RagError::Embedding { provider: "mock".into(), message: "service unavailable".into() }
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> symcheck_rag::Result<Vec<f32>> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Self::error());
        }
        Ok(Self::embed_text(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> symcheck_rag::Result<Vec<Vec<f32>>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Self::error());
        }
        Ok(texts.iter().map(|t| Self::embed_text(t)).collect())
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

fn dataset_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(
        file,
        "Patient_ID,Reported_Symptoms,Suspected_Condition,Severity_Score,Medications_Used"
    )
    .unwrap();
    writeln!(file, "P-1,\"fever, dry cough\",Influenza,6,Paracetamol").unwrap();
    writeln!(file, "P-2,\"chest pain, breathlessness\",Angina,8,Nitroglycerin").unwrap();
    writeln!(file, "P-3,\"headache, nausea\",Migraine,4,Ibuprofen").unwrap();
    file
}

async fn build_engine(
    embedder: Arc<HashEmbedder>,
    chat: Arc<MockChatModel>,
) -> Result<AnswerEngine, EngineError> {
    let file = dataset_file();
    EngineBuilder::new(embedder, chat).build(file.path()).await
}

#[tokio::test]
async fn build_indexes_one_chunk_per_short_case() {
    let embedder = Arc::new(HashEmbedder::new());
    let chat = Arc::new(MockChatModel::new("advice"));
    let engine = build_engine(embedder.clone(), chat).await.unwrap();

    assert_eq!(engine.case_count(), 3);
    // Each rendered sentence fits in one 300-char chunk.
    assert_eq!(engine.indexed_chunks().await, 3);
    assert_eq!(embedder.batch_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn blank_input_rejected_without_outbound_calls() {
    let embedder = Arc::new(HashEmbedder::new());
    let chat = Arc::new(MockChatModel::new("advice"));
    let engine = build_engine(embedder.clone(), chat.clone()).await.unwrap();

    for input in ["", "   ", "\n\t"] {
        let err = engine.answer(input).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }
    assert_eq!(embedder.embed_calls.load(Ordering::SeqCst), 0);
    assert_eq!(chat.calls(), 0);
}

#[tokio::test]
async fn answer_issues_one_query_embedding_and_one_chat_call() {
    let embedder = Arc::new(HashEmbedder::new());
    let chat = Arc::new(MockChatModel::new("You may have influenza."));
    let engine = build_engine(embedder.clone(), chat.clone()).await.unwrap();

    let advice = engine.answer("fever, cough").await.unwrap();
    assert_eq!(advice, "You may have influenza.");
    assert_eq!(embedder.embed_calls.load(Ordering::SeqCst), 1);
    assert_eq!(chat.calls(), 1);

    // The chat request carries the filled template and retrieved context.
    let request = chat.last_request().unwrap();
    assert_eq!(request.temperature, 0.0);
    assert!(request.user.contains("fever, cough"));
    assert!(request.system.unwrap().contains("This is case for Patient"));
}

#[tokio::test]
async fn embedding_failure_during_build_returns_no_engine() {
    let embedder = Arc::new(HashEmbedder::failing());
    let chat = Arc::new(MockChatModel::new("advice"));
    let result = build_engine(embedder, chat).await;
    assert!(matches!(result, Err(EngineError::Retrieval(_))));
}

#[tokio::test]
async fn chat_failure_is_local_to_one_request() {
    let embedder = Arc::new(HashEmbedder::new());
    let chat = Arc::new(MockChatModel::new("advice"));
    let engine = build_engine(embedder, chat.clone()).await.unwrap();
    let chunks_before = engine.indexed_chunks().await;

    chat.fail_next();
    let err = engine.answer("fever").await.unwrap_err();
    assert!(matches!(err, EngineError::Model(_)));

    // The same unrebuilt index serves the next request.
    assert_eq!(engine.indexed_chunks().await, chunks_before);
    assert_eq!(engine.answer("fever").await.unwrap(), "advice");
}

#[tokio::test]
async fn inconsistent_chunk_config_aborts_build() {
    let embedder = Arc::new(HashEmbedder::new());
    let chat = Arc::new(MockChatModel::new("advice"));
    let file = dataset_file();

    // Config fields are public, so a value can skip builder validation;
    // the chunker itself must still reject it.
    let config = RagConfig { chunk_overlap: 300, ..RagConfig::default() };
    let result =
        EngineBuilder::new(embedder.clone(), chat).with_config(config).build(file.path()).await;
    assert!(matches!(result, Err(EngineError::Retrieval(_))));
    assert_eq!(embedder.batch_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn schema_violation_aborts_build() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "Patient_ID,Reported_Symptoms").unwrap();
    writeln!(file, "P-1,fever").unwrap();

    let embedder = Arc::new(HashEmbedder::new());
    let chat = Arc::new(MockChatModel::new("advice"));
    let result = EngineBuilder::new(embedder.clone(), chat).build(file.path()).await;
    assert!(matches!(result, Err(EngineError::Dataset(_))));
    // The dataset is validated before any embedding call is made.
    assert_eq!(embedder.batch_calls.load(Ordering::SeqCst), 0);
}
