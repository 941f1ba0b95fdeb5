use std::path::Path;

pub fn is_corpus_file(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    ext.eq_ignore_ascii_case("json")
}

/// Trimmed user text, or `None` when nothing but whitespace is left.
pub fn non_blank(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
