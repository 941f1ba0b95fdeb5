use domain::embedding::Embedder;
use domain::error::EmbedError;
use domain::models::EmbeddingVector;
use infrastructure::hash_embedder::HashEmbedder;

/// Builds caches like [`HashEmbedder`] but fails every query.
pub struct DownEmbedder(pub HashEmbedder);

impl Embedder for DownEmbedder {
    fn model_id(&self) -> &str {
        self.0.model_id()
    }

    async fn embed(&self, _text: &str) -> Result<EmbeddingVector, EmbedError> {
        Err(EmbedError::Unavailable("connection refused".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbedError> {
        self.0.embed_batch(texts).await
    }
}
