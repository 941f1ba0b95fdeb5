use application::embedding_cache::EmbeddingCache;
use application::faq_matcher::FaqMatcher;
use domain::error::{EmbedError, MatcherError};
use domain::match_policy::{MatchPolicy, EMPTY_INPUT_ANSWER, FALLBACK_ANSWER};
use domain::models::{FaqEntry, MatchResult};
use std::sync::Arc;
use tests::{one_hot_corpus, FixedEmbedder};

async fn matcher_for(
    corpus: Vec<FaqEntry>,
    embedder: FixedEmbedder,
    threshold: f32,
) -> FaqMatcher<FixedEmbedder> {
    let cache = EmbeddingCache::build(corpus, &embedder).await.unwrap();
    FaqMatcher::new(Arc::new(cache), MatchPolicy::new(threshold).unwrap(), embedder)
}

fn hi_corpus() -> Vec<FaqEntry> {
    vec![FaqEntry::new("Hi", "Hello!")]
}

#[tokio::test]
async fn cache_has_one_vector_per_entry_in_order() {
    for n in [1, 2, 7, 50] {
        let (corpus, embedder) = one_hot_corpus(n);
        let cache = EmbeddingCache::build(corpus.clone(), &embedder).await.unwrap();
        assert_eq!(cache.len(), n);
        assert_eq!(cache.vectors().len(), n);
        for (i, vector) in cache.vectors().iter().enumerate() {
            assert_eq!(cache.corpus()[i], corpus[i]);
            assert_eq!(vector[i], 1.0, "vector {i} is not bound to entry {i}");
        }
    }
}

#[tokio::test]
async fn cache_build_uses_a_single_batch_call() {
    let (corpus, embedder) = one_hot_corpus(25);
    EmbeddingCache::build(corpus, &embedder).await.unwrap();
    assert_eq!(embedder.batch_calls(), 1);
    assert_eq!(embedder.embed_calls(), 0);
}

#[tokio::test]
async fn every_corpus_question_matches_its_own_answer() {
    let (corpus, embedder) = one_hot_corpus(12);
    let matcher = matcher_for(corpus.clone(), embedder, 0.6).await;
    for entry in &corpus {
        let result = matcher.find_match(&entry.question).await.unwrap();
        assert!(result.matched, "{} did not match", entry.question);
        assert!(result.score >= 0.6);
        assert_eq!(result.answer, entry.answer);
    }
}

#[tokio::test]
async fn blank_input_never_calls_the_embedder() {
    let embedder = FixedEmbedder::new().with("Hi", vec![1.0, 0.0]);
    let matcher = matcher_for(hi_corpus(), embedder.clone(), 0.6).await;

    for blank in ["", "   ", "\t\n", " \r\n "] {
        let result = matcher.find_match(blank).await.unwrap();
        assert!(!result.matched);
        assert_eq!(result.answer, EMPTY_INPUT_ANSWER);
    }
    assert_eq!(embedder.embed_calls(), 0);
}

#[tokio::test]
async fn input_is_trimmed_before_embedding() {
    let embedder = FixedEmbedder::new().with("Hi", vec![1.0, 0.0]);
    let matcher = matcher_for(hi_corpus(), embedder.clone(), 0.6).await;
    let result = matcher.find_match("  Hi\n").await.unwrap();
    assert!(result.matched);
    assert_eq!(embedder.embed_calls(), 1);
}

#[tokio::test]
async fn repeated_queries_give_identical_results() {
    let embedder = FixedEmbedder::new()
        .with("Hi", vec![1.0, 0.0])
        .with("Hello there", vec![0.8, 0.6]);
    let matcher = matcher_for(hi_corpus(), embedder, 0.6).await;
    let first = matcher.find_match("Hello there").await.unwrap();
    let second = matcher.find_match("Hello there").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn score_equal_to_threshold_is_a_match() {
    // cos([3, 4], [1, 0]) = 3 / 5 = 0.6 exactly in f32.
    let embedder = FixedEmbedder::new()
        .with("Hi", vec![1.0, 0.0])
        .with("Hiya", vec![3.0, 4.0]);
    let matcher = matcher_for(hi_corpus(), embedder, 0.6).await;
    let result = matcher.find_match("Hiya").await.unwrap();
    assert_eq!(result.score, 0.6);
    assert!(result.matched);
    assert_eq!(result.answer, "Hello!");
}

#[tokio::test]
async fn greeting_scenario_matches_with_full_score() {
    let embedder = FixedEmbedder::new().with("Hi", vec![1.0, 0.0]);
    let matcher = matcher_for(hi_corpus(), embedder, 0.6).await;
    assert_eq!(
        matcher.find_match("Hi").await.unwrap(),
        MatchResult {
            answer: "Hello!".to_string(),
            score: 1.0,
            matched: true,
        }
    );
}

#[tokio::test]
async fn gibberish_scenario_falls_back_with_score() {
    // cos([1, 9, 3, 3], [1, 0, 0, 0]) = 1 / 10 = 0.1 exactly in f32.
    let embedder = FixedEmbedder::new()
        .with("Hi", vec![1.0, 0.0, 0.0, 0.0])
        .with("asdkjasdkj", vec![1.0, 9.0, 3.0, 3.0]);
    let matcher = matcher_for(hi_corpus(), embedder, 0.6).await;
    assert_eq!(
        matcher.find_match("asdkjasdkj").await.unwrap(),
        MatchResult {
            answer: FALLBACK_ANSWER.to_string(),
            score: 0.1,
            matched: false,
        }
    );
}

#[tokio::test]
async fn ties_resolve_to_the_first_entry() {
    let corpus = vec![
        FaqEntry::new("Hey", "first"),
        FaqEntry::new("Hey there", "second"),
    ];
    let embedder = FixedEmbedder::new()
        .with("Hey", vec![0.0, 1.0])
        .with("Hey there", vec![0.0, 2.0])
        .with("hey!", vec![0.0, 5.0]);
    let matcher = matcher_for(corpus, embedder, 0.6).await;
    assert_eq!(matcher.find_match("hey!").await.unwrap().answer, "first");
}

#[tokio::test]
async fn embedding_failures_are_not_masked() {
    let embedder = FixedEmbedder::new()
        .with("Hi", vec![1.0, 0.0])
        .failing_queries();
    let matcher = matcher_for(hi_corpus(), embedder, 0.6).await;
    assert_eq!(
        matcher.find_match("Hi").await.unwrap_err(),
        MatcherError::Embedding(EmbedError::Unavailable("stub backend is down".to_string()))
    );
}

#[tokio::test]
async fn query_dimension_must_match_cache() {
    let embedder = FixedEmbedder::new()
        .with("Hi", vec![1.0, 0.0])
        .with("Hi?", vec![1.0, 0.0, 0.0]);
    let matcher = matcher_for(hi_corpus(), embedder, 0.6).await;
    assert_eq!(
        matcher.find_match("Hi?").await.unwrap_err(),
        MatcherError::DimensionMismatch {
            expected: 2,
            actual: 3
        }
    );
}

#[tokio::test]
async fn cache_build_failure_surfaces_as_embedding_error() {
    // No stub vector for the question.
    let err = EmbeddingCache::build(hi_corpus(), &FixedEmbedder::new())
        .await
        .unwrap_err();
    assert!(matches!(err, MatcherError::Embedding(EmbedError::InvalidInput(_))));
}

#[tokio::test]
async fn matcher_serves_concurrent_readers() {
    let (corpus, embedder) = one_hot_corpus(8);
    let matcher = Arc::new(matcher_for(corpus, embedder.clone(), 0.6).await);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let matcher = Arc::clone(&matcher);
            tokio::spawn(async move { matcher.find_match(&format!("question {i}")).await })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.answer, format!("answer {i}"));
    }
    assert_eq!(embedder.embed_calls(), 8);
}
