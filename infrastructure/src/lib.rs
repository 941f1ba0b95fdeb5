pub mod config;
pub mod corpus;
pub mod embedder;
pub mod embedding_storage;
pub mod hash_embedder;
pub mod ollama_client;
pub mod search;
