use domain::models::EmbeddingVector;

pub struct SearchEngine;

impl SearchEngine {
    /// Cosine similarity in [-1, 1]. A zero vector scores 0.0.
    pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len(), "embedding dimensions must match");
        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        (dot_product / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }

    /// Index and score of the most similar vector. Ties keep the lowest index.
    pub fn best_match(query: &[f32], vectors: &[EmbeddingVector]) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, vector) in vectors.iter().enumerate() {
            let score = Self::cosine_similarity(query, vector);
            if score.is_nan() {
                continue;
            }
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((idx, score)),
            }
        }
        best
    }
}
