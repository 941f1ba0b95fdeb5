use crate::embedding_cache::EmbeddingCache;
use anyhow::Context;
use domain::embedding::Embedder;
use domain::models::FaqEntry;
use infrastructure::corpus::corpus_fingerprint;
use infrastructure::embedding_storage::EmbeddingStorage;
use shared::types::Result;

/// Produce the start-up cache, reusing a stored snapshot when one matches
/// the corpus and model.
///
/// Snapshot read/write failures are logged and never block start-up;
/// embedding and validation failures are returned.
pub async fn provision_cache<E: Embedder>(
    corpus: Vec<FaqEntry>,
    embedder: &E,
    storage: Option<&EmbeddingStorage>,
    force_rebuild: bool,
) -> Result<EmbeddingCache> {
    let fingerprint = corpus_fingerprint(embedder.model_id(), &corpus);

    if let (Some(storage), false) = (storage, force_rebuild) {
        match storage.load_snapshot(&fingerprint) {
            Ok(Some(vectors)) => match EmbeddingCache::validate(&corpus, &vectors) {
                Ok(_) => {
                    tracing::info!(%fingerprint, entries = vectors.len(), "reusing stored embedding snapshot");
                    return Ok(EmbeddingCache::from_parts(corpus, vectors)?);
                }
                Err(e) => tracing::warn!(%fingerprint, error = %e, "stored snapshot rejected; rebuilding"),
            },
            Ok(None) => tracing::info!(%fingerprint, "no stored embedding snapshot"),
            Err(e) => tracing::warn!(error = %e, "failed to read embedding snapshot; rebuilding"),
        }
    }

    let cache = EmbeddingCache::build(corpus, embedder)
        .await
        .context("Failed to build FAQ embedding cache")?;

    if let Some(storage) = storage {
        if let Err(e) = storage.save_snapshot(&fingerprint, embedder.model_id(), cache.vectors()) {
            tracing::warn!(error = %e, "failed to store embedding snapshot");
        }
    }
    Ok(cache)
}
