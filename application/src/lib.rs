pub mod cache_service;
pub mod chatbot_service;
pub mod embedding_cache;
pub mod faq_matcher;

#[cfg(test)]
mod test_support;
