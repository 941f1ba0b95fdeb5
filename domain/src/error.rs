use thiserror::Error;

/// Failures of the embedding collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbedError {
    #[error("input cannot be embedded: {0}")]
    InvalidInput(String),

    #[error("embedding backend unavailable: {0}")]
    Unavailable(String),

    #[error("embedding backend returned {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("malformed embedding response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatcherError {
    #[error("FAQ corpus is empty")]
    EmptyCorpus,

    #[error("embedding cache has {cache} vectors for {corpus} corpus entries")]
    CacheLengthMismatch { corpus: usize, cache: usize },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("match threshold {0} is outside [-1, 1]")]
    InvalidThreshold(f32),

    #[error(transparent)]
    Embedding(#[from] EmbedError),
}

impl MatcherError {
    /// Errors caused by the corpus or settings rather than the
    /// embedding backend.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, MatcherError::Embedding(_))
    }
}
