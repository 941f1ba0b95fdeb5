use crate::faq_matcher::FaqMatcher;
use domain::embedding::Embedder;
use domain::models::{ChatbotRequest, ChatbotResponse, MatchResult};
use std::time::Duration;

pub const UNAVAILABLE_ANSWER: &str =
    "⚠️ The assistant is temporarily unavailable. Please try again later.";

/// Request-facing wrapper around [`FaqMatcher`]: applies the timeout and
/// turns infrastructure failures into a user-facing answer.
pub struct ChatbotService<E> {
    matcher: FaqMatcher<E>,
    timeout: Option<Duration>,
}

impl<E: Embedder> ChatbotService<E> {
    pub fn new(matcher: FaqMatcher<E>, timeout: Option<Duration>) -> Self {
        Self { matcher, timeout }
    }

    pub async fn answer(&self, message: &str) -> MatchResult {
        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.matcher.find_match(message)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    tracing::warn!(timeout_ms = limit.as_millis() as u64, "FAQ match timed out");
                    return Self::unavailable();
                }
            },
            None => self.matcher.find_match(message).await,
        };

        outcome.unwrap_or_else(|e| {
            if e.is_configuration() {
                tracing::error!(error = %e, "embedding model no longer fits the FAQ cache");
            } else {
                tracing::warn!(error = %e, "embedding backend failed");
            }
            Self::unavailable()
        })
    }

    pub async fn respond(&self, request: &ChatbotRequest) -> ChatbotResponse {
        self.answer(&request.message).await.into()
    }

    /// Handle a raw JSON body. Malformed JSON is treated as an empty message.
    pub async fn respond_raw(&self, body: &str) -> ChatbotResponse {
        let request = serde_json::from_str::<ChatbotRequest>(body).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "malformed chatbot request");
            ChatbotRequest::default()
        });
        self.respond(&request).await
    }

    fn unavailable() -> MatchResult {
        MatchResult {
            answer: UNAVAILABLE_ANSWER.to_string(),
            score: 0.0,
            matched: false,
        }
    }
}
