use crate::error::EmbedError;
use crate::models::EmbeddingVector;
use std::future::Future;

/// Text-to-vector collaborator used by the FAQ matcher.
///
/// Implementations must be deterministic for a fixed `model_id`: the same
/// string always yields the same vector.
pub trait Embedder: Send + Sync {
    /// Identifies the model and its version. Part of snapshot fingerprints.
    fn model_id(&self) -> &str;

    fn embed(&self, text: &str) -> impl Future<Output = Result<EmbeddingVector, EmbedError>> + Send;

    /// One vector per input, in input order.
    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<EmbeddingVector>, EmbedError>> + Send;
}
