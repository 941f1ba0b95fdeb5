use crate::error::MatcherError;

pub const EMPTY_INPUT_ANSWER: &str = "❓ Please enter a valid question.";
pub const FALLBACK_ANSWER: &str =
    "❓ I'm not sure how to help with that. Please contact your department for support.";

/// Threshold and canned answers applied to every match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPolicy {
    pub threshold: f32,
    pub empty_input_answer: String,
    pub fallback_answer: String,
}

impl MatchPolicy {
    /// No default threshold exists; callers must supply one.
    pub fn new(threshold: f32) -> Result<Self, MatcherError> {
        if !threshold.is_finite() || !(-1.0..=1.0).contains(&threshold) {
            return Err(MatcherError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            empty_input_answer: EMPTY_INPUT_ANSWER.to_string(),
            fallback_answer: FALLBACK_ANSWER.to_string(),
        })
    }

    pub fn with_fallback_answer(mut self, answer: impl Into<String>) -> Self {
        self.fallback_answer = answer.into();
        self
    }

    /// Inclusive: a score equal to the threshold is accepted.
    pub fn accepts(&self, score: f32) -> bool {
        score >= self.threshold
    }
}
