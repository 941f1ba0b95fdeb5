use domain::error::EmbedError;
use domain::models::EmbeddingVector;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct BatchEmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct BatchEmbeddingResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Result of a batch call. Older Ollama servers have no `/api/embed`.
pub enum BatchOutcome {
    Embedded(Vec<EmbeddingVector>),
    Unsupported,
}

#[derive(Clone)]
pub struct OllamaClient {
    client: Arc<Client>,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_embedding(&self, text: &str) -> Result<EmbeddingVector, EmbedError> {
        let url = format!("{}/api/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(unavailable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(backend_error(status, response).await);
        }
        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbedError::Malformed(e.to_string()))?;
        if embedding_response.embedding.is_empty() {
            return Err(EmbedError::Malformed(format!(
                "model '{}' returned an empty embedding",
                self.model
            )));
        }
        Ok(embedding_response.embedding)
    }

    pub async fn generate_embeddings(&self, texts: &[String]) -> Result<BatchOutcome, EmbedError> {
        let url = format!("{}/api/embed", self.base_url);
        let request = BatchEmbeddingRequest {
            model: &self.model,
            input: texts,
        };
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(unavailable)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(BatchOutcome::Unsupported);
        }
        if !status.is_success() {
            return Err(backend_error(status, response).await);
        }
        let batch: BatchEmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbedError::Malformed(e.to_string()))?;
        if batch.embeddings.len() != texts.len() {
            return Err(EmbedError::Malformed(format!(
                "requested {} embeddings, received {}",
                texts.len(),
                batch.embeddings.len()
            )));
        }
        Ok(BatchOutcome::Embedded(batch.embeddings))
    }
}

fn unavailable(err: reqwest::Error) -> EmbedError {
    EmbedError::Unavailable(err.to_string())
}

async fn backend_error(status: StatusCode, response: reqwest::Response) -> EmbedError {
    let body = response.text().await.unwrap_or_default();
    EmbedError::Backend {
        status: status.as_u16(),
        body,
    }
}
