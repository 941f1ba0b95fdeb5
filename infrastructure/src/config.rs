use anyhow::{anyhow, bail, Context};
use dotenvy::dotenv;
use shared::types::Result;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_EMBED_MODEL: &str = "all-minilm";
const DEFAULT_OLLAMA_BATCH_SIZE: usize = 32;
const DEFAULT_HASH_DIMENSION: usize = 256;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    Hash,
    Ollama,
}

impl FromStr for EmbeddingProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Ok(Self::Hash),
            "ollama" => Ok(Self::Ollama),
            other => Err(anyhow!(
                "unknown embedding provider '{other}' (expected 'hash' or 'ollama')"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// No default on purpose. Must come from `FAQ_MATCH_THRESHOLD` or the CLI.
    pub threshold: Option<f32>,
    pub corpus_path: Option<PathBuf>,
    /// Replaces the built-in no-match answer when set.
    pub fallback_answer: Option<String>,
    pub provider: EmbeddingProvider,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub ollama_batch_size: usize,
    pub hash_dimension: usize,
    pub db_path: Option<PathBuf>,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. `load` feeds it the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let threshold = get("FAQ_MATCH_THRESHOLD")
            .map(|v| parse_var::<f32>("FAQ_MATCH_THRESHOLD", &v))
            .transpose()?;
        let provider = match get("EMBEDDING_PROVIDER") {
            Some(v) => v.parse().context("EMBEDDING_PROVIDER")?,
            None => EmbeddingProvider::Hash,
        };
        let ollama_batch_size = get("OLLAMA_BATCH_SIZE")
            .map(|v| parse_var::<usize>("OLLAMA_BATCH_SIZE", &v))
            .transpose()?
            .unwrap_or(DEFAULT_OLLAMA_BATCH_SIZE);
        if ollama_batch_size == 0 {
            bail!("OLLAMA_BATCH_SIZE must be at least 1");
        }
        let hash_dimension = get("HASH_EMBEDDING_DIM")
            .map(|v| parse_var::<usize>("HASH_EMBEDDING_DIM", &v))
            .transpose()?
            .unwrap_or(DEFAULT_HASH_DIMENSION);
        if hash_dimension == 0 {
            bail!("HASH_EMBEDDING_DIM must be at least 1");
        }
        let timeout_secs = get("CHATBOT_TIMEOUT_SECS")
            .map(|v| parse_var::<u64>("CHATBOT_TIMEOUT_SECS", &v))
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            threshold,
            corpus_path: get("FAQ_CORPUS_PATH").map(PathBuf::from),
            fallback_answer: get("FAQ_FALLBACK_ANSWER").map(|v| v.trim().to_string()),
            provider,
            ollama_base_url: get("OLLAMA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
            ollama_model: get("OLLAMA_EMBED_MODEL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_EMBED_MODEL.to_string()),
            ollama_batch_size,
            hash_dimension,
            db_path: get("EMBEDDING_DB_PATH").map(PathBuf::from),
            request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        })
    }

    pub fn require_threshold(&self) -> Result<f32> {
        self.threshold.ok_or_else(|| {
            anyhow!("no match threshold configured; set FAQ_MATCH_THRESHOLD or pass --threshold")
        })
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow!("invalid {key} value '{raw}': {e}"))
}
