use super::config::{Config, EmbeddingProvider};
use super::hash_embedder::HashEmbedder;
use super::ollama_client::{BatchOutcome, OllamaClient};
use domain::embedding::Embedder;
use domain::error::EmbedError;
use domain::models::EmbeddingVector;
use futures::stream::{self, StreamExt, TryStreamExt};

const FALLBACK_CONCURRENCY: usize = 8;

/// Embeds through a running Ollama server.
pub struct OllamaEmbedder {
    client: OllamaClient,
    batch_size: usize,
}

impl OllamaEmbedder {
    pub fn new(client: OllamaClient, batch_size: usize) -> Self {
        Self {
            client,
            batch_size: batch_size.max(1),
        }
    }

    async fn generate_batch_embeddings(
        &self,
        inputs: &[String],
    ) -> Result<Vec<EmbeddingVector>, EmbedError> {
        match self.client.generate_embeddings(inputs).await? {
            BatchOutcome::Embedded(vectors) => Ok(vectors),
            BatchOutcome::Unsupported => {
                tracing::warn!(
                    "Ollama server has no batch endpoint; embedding {} texts one by one",
                    inputs.len()
                );
                let requests: Vec<_> = inputs
                    .iter()
                    .map(|text| self.client.generate_embedding(text))
                    .collect();
                // `buffered` keeps results in input order.
                stream::iter(requests)
                    .buffered(FALLBACK_CONCURRENCY)
                    .try_collect()
                    .await
            }
        }
    }
}

impl Embedder for OllamaEmbedder {
    fn model_id(&self) -> &str {
        self.client.model()
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbedError> {
        self.client.generate_embedding(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbedError> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.batch_size) {
            tracing::debug!("Generating embeddings for {} questions...", chunk.len());
            embeddings.extend(self.generate_batch_embeddings(chunk).await?);
        }
        Ok(embeddings)
    }
}

/// The embedder selected by configuration.
pub enum EmbeddingBackend {
    Hash(HashEmbedder),
    Ollama(OllamaEmbedder),
}

impl EmbeddingBackend {
    pub fn from_config(config: &Config) -> Self {
        match config.provider {
            EmbeddingProvider::Hash => Self::Hash(HashEmbedder::new(config.hash_dimension)),
            EmbeddingProvider::Ollama => Self::Ollama(OllamaEmbedder::new(
                OllamaClient::new(&config.ollama_base_url, &config.ollama_model),
                config.ollama_batch_size,
            )),
        }
    }
}

impl Embedder for EmbeddingBackend {
    fn model_id(&self) -> &str {
        match self {
            Self::Hash(e) => e.model_id(),
            Self::Ollama(e) => e.model_id(),
        }
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbedError> {
        match self {
            Self::Hash(e) => e.embed(text).await,
            Self::Ollama(e) => e.embed(text).await,
        }
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbedError> {
        match self {
            Self::Hash(e) => e.embed_batch(texts).await,
            Self::Ollama(e) => e.embed_batch(texts).await,
        }
    }
}
