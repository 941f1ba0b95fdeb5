use serde::{Deserialize, Serialize};

/// Fixed-length numeric representation of a piece of text.
pub type EmbeddingVector = Vec<f32>;

/// One canned question/answer pair of the FAQ corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub answer: String,
    pub score: f32,
    pub matched: bool,
}

/// Body of a `POST /chatbot` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatbotRequest {
    #[serde(default)]
    pub message: String,
}

/// Body of a `POST /chatbot` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotResponse {
    pub response: String,
}

impl From<MatchResult> for ChatbotResponse {
    fn from(result: MatchResult) -> Self {
        Self {
            response: result.answer,
        }
    }
}
