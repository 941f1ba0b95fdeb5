use domain::embedding::Embedder;
use domain::error::MatcherError;
use domain::models::{EmbeddingVector, FaqEntry};
use shared::telemetry::Telemetry;

/// FAQ corpus together with one embedding per question, index for index.
///
/// Never mutated once built. A changed corpus needs a new cache.
#[derive(Debug, Clone)]
pub struct EmbeddingCache {
    corpus: Vec<FaqEntry>,
    vectors: Vec<EmbeddingVector>,
    dimension: usize,
}

impl EmbeddingCache {
    /// Embed every question with a single batch call.
    pub async fn build<E: Embedder>(
        corpus: Vec<FaqEntry>,
        embedder: &E,
    ) -> Result<Self, MatcherError> {
        if corpus.is_empty() {
            return Err(MatcherError::EmptyCorpus);
        }
        let telemetry = Telemetry::new();
        let questions: Vec<String> = corpus.iter().map(|e| e.question.clone()).collect();
        let vectors = embedder.embed_batch(&questions).await?;
        let cache = Self::from_parts(corpus, vectors)?;
        tracing::info!(
            entries = cache.len(),
            dimension = cache.dimension,
            model = embedder.model_id(),
            elapsed_ms = telemetry.elapsed_ms() as u64,
            "built FAQ embedding cache"
        );
        Ok(cache)
    }

    /// Bind precomputed vectors (e.g. from a snapshot) to the corpus.
    pub fn from_parts(
        corpus: Vec<FaqEntry>,
        vectors: Vec<EmbeddingVector>,
    ) -> Result<Self, MatcherError> {
        let dimension = Self::validate(&corpus, &vectors)?;
        Ok(Self {
            corpus,
            vectors,
            dimension,
        })
    }

    /// Checks the 1:1 pairing and a shared, non-zero dimension.
    /// Returns that dimension.
    pub fn validate(corpus: &[FaqEntry], vectors: &[EmbeddingVector]) -> Result<usize, MatcherError> {
        if corpus.is_empty() {
            return Err(MatcherError::EmptyCorpus);
        }
        if corpus.len() != vectors.len() {
            return Err(MatcherError::CacheLengthMismatch {
                corpus: corpus.len(),
                cache: vectors.len(),
            });
        }
        let dimension = vectors[0].len();
        if dimension == 0 {
            return Err(MatcherError::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(MatcherError::DimensionMismatch {
                expected: dimension,
                actual: bad.len(),
            });
        }
        Ok(dimension)
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    /// Always false for a constructed cache.
    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn corpus(&self) -> &[FaqEntry] {
        &self.corpus
    }

    pub fn vectors(&self) -> &[EmbeddingVector] {
        &self.vectors
    }

    pub fn entry(&self, index: usize) -> Option<&FaqEntry> {
        self.corpus.get(index)
    }
}
