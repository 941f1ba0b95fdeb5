pub mod embedding;
pub mod error;
pub mod match_policy;
pub mod models;
