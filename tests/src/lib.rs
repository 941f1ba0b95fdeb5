//! Stub embedding collaborators shared by the integration tests.

use domain::embedding::Embedder;
use domain::error::EmbedError;
use domain::models::{EmbeddingVector, FaqEntry};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct Counters {
    embed: AtomicUsize,
    batch: AtomicUsize,
}

/// Returns preset vectors per exact string and counts every call.
/// Clones share their counters.
#[derive(Clone, Default)]
pub struct FixedEmbedder {
    vectors: HashMap<String, EmbeddingVector>,
    counters: Arc<Counters>,
    fail_queries: bool,
    query_delay: Option<Duration>,
}

impl FixedEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }

    /// `embed` fails with `Unavailable`; `embed_batch` still works.
    pub fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    pub fn slow_queries(mut self, delay: Duration) -> Self {
        self.query_delay = Some(delay);
        self
    }

    pub fn embed_calls(&self) -> usize {
        self.counters.embed.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.counters.batch.load(Ordering::SeqCst)
    }

    fn lookup(&self, text: &str) -> Result<EmbeddingVector, EmbedError> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| EmbedError::InvalidInput(format!("no stub vector for {text:?}")))
    }
}

impl Embedder for FixedEmbedder {
    fn model_id(&self) -> &str {
        "fixed-stub"
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbedError> {
        self.counters.embed.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.query_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_queries {
            return Err(EmbedError::Unavailable("stub backend is down".to_string()));
        }
        self.lookup(text)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbedError> {
        self.counters.batch.fetch_add(1, Ordering::SeqCst);
        texts.iter().map(|t| self.lookup(t)).collect()
    }
}

/// Corpus of `n` entries, each with its own one-hot vector.
pub fn one_hot_corpus(n: usize) -> (Vec<FaqEntry>, FixedEmbedder) {
    let mut embedder = FixedEmbedder::new();
    let mut corpus = Vec::with_capacity(n);
    for i in 0..n {
        let question = format!("question {i}");
        let mut vector = vec![0.0; n];
        vector[i] = 1.0;
        embedder = embedder.with(&question, vector);
        corpus.push(FaqEntry::new(question, format!("answer {i}")));
    }
    (corpus, embedder)
}
