use crate::embedding_cache::EmbeddingCache;
use domain::embedding::Embedder;
use domain::error::MatcherError;
use domain::match_policy::MatchPolicy;
use domain::models::MatchResult;
use infrastructure::search::SearchEngine;
use shared::utils::non_blank;
use std::sync::Arc;

/// Picks the canned answer whose question is most similar to the user input.
pub struct FaqMatcher<E> {
    cache: Arc<EmbeddingCache>,
    policy: MatchPolicy,
    embedder: E,
}

impl<E: Embedder> FaqMatcher<E> {
    pub fn new(cache: Arc<EmbeddingCache>, policy: MatchPolicy, embedder: E) -> Self {
        Self {
            cache,
            policy,
            embedder,
        }
    }

    /// Blank input never reaches the embedder. Embedding failures are
    /// returned as errors, never replaced by the fallback answer.
    pub async fn find_match(&self, input: &str) -> Result<MatchResult, MatcherError> {
        let Some(question) = non_blank(input) else {
            return Ok(MatchResult {
                answer: self.policy.empty_input_answer.clone(),
                score: 0.0,
                matched: false,
            });
        };

        let query = self.embedder.embed(question).await?;
        if query.len() != self.cache.dimension() {
            return Err(MatcherError::DimensionMismatch {
                expected: self.cache.dimension(),
                actual: query.len(),
            });
        }

        let fallback = |score| MatchResult {
            answer: self.policy.fallback_answer.clone(),
            score,
            matched: false,
        };
        let (index, result) = match SearchEngine::best_match(&query, self.cache.vectors())
            .and_then(|(index, score)| self.cache.entry(index).map(|entry| (index, entry, score)))
        {
            Some((index, entry, score)) if self.policy.accepts(score) => (
                Some(index),
                MatchResult {
                    answer: entry.answer.clone(),
                    score,
                    matched: true,
                },
            ),
            Some((index, _, score)) => (Some(index), fallback(score)),
            None => (None, fallback(0.0)),
        };
        tracing::debug!(
            index = ?index,
            score = result.score,
            matched = result.matched,
            threshold = self.policy.threshold,
            "matched FAQ query"
        );
        Ok(result)
    }
}
