use domain::embedding::Embedder;
use domain::error::EmbedError;
use domain::models::EmbeddingVector;
use siphasher::sip::SipHasher13;
use std::hash::{Hash, Hasher};

// Changing the seeds or tokenisation changes every vector: bump HASH_VERSION.
const HASH_SEED_K0: u64 = 0x0123_4567_89ab_cdef;
const HASH_SEED_K1: u64 = 0xfedc_ba98_7654_3210;
const HASH_VERSION: &str = "v1";

/// Offline embedder based on signed feature hashing of word tokens.
///
/// Deterministic across runs and Rust versions, which makes its vectors
/// safe to persist in snapshots.
pub struct HashEmbedder {
    dimension: usize,
    model_id: String,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        let dimension = dimension.max(1);
        Self {
            dimension,
            model_id: format!("hash-{HASH_VERSION}-{dimension}"),
        }
    }

    fn hash(token: &str, salt: u8) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        salt.hash(&mut hasher);
        token.hash(&mut hasher);
        hasher.finish()
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    /// Text without word tokens (emoji, punctuation) embeds to the zero
    /// vector, which scores 0.0 against every question.
    pub fn embed_text(&self, text: &str) -> EmbeddingVector {
        let mut vector = vec![0.0f32; self.dimension];
        for token in Self::tokenize(text) {
            let idx = (Self::hash(&token, 0) % self.dimension as u64) as usize;
            let sign = if Self::hash(&token, 1) % 2 == 0 { 1.0 } else { -1.0 };
            vector[idx] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Embedder for HashEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbedError> {
        Ok(self.embed_text(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>, EmbedError> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}
