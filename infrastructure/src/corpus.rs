use anyhow::{bail, Context};
use domain::models::FaqEntry;
use shared::types::Result;
use shared::utils::is_corpus_file;
use std::fs;
use std::path::Path;

const GREETINGS: &[(&str, &str)] = &[
    ("Hi", "👋 Hello! How can I assist you today?"),
    ("Hello", "Hi there! Need any help?"),
    ("Hey", "Hey! I'm here to help you."),
    ("Good morning", "Good morning! How can I assist you?"),
    ("Good evening", "Good evening! What can I help you with?"),
];

const PORTAL_FAQS: &[(&str, &str)] = &[
    (
        "How can I reset my password?",
        "Go to 'Account Settings' and click on 'Reset Password.'",
    ),
    (
        "How can I check my marks?",
        "View them under the 'Marks' section in the Student Portal.",
    ),
    (
        "How do I view my attendance?",
        "Check it in the 'Attendance' section of the Student Portal.",
    ),
    (
        "How do I update my profile?",
        "Go to 'Profile' and click 'Edit Profile'.",
    ),
    (
        "How do I contact support?",
        "Contact support via the 'Contact Us' page or email support@campus.com.",
    ),
    (
        "Where can I find my class schedule?",
        "You can view it under the 'Timetable' section.",
    ),
    (
        "What should I do if I miss a class?",
        "Contact your faculty and submit a leave application.",
    ),
    (
        "How do I apply for leave?",
        "Apply for leave through the 'Leave Request' tab.",
    ),
    (
        "Where do I submit my assignments?",
        "Assignments can be submitted via the 'Assignments' section.",
    ),
    (
        "Can I change my registered email?",
        "Go to 'Account Settings' to update your email.",
    ),
    (
        "How to download my fee receipt?",
        "Download fee receipts from the 'Finance' tab.",
    ),
    (
        "Is there a mobile app for the portal?",
        "Yes, download it from the App Store or Play Store.",
    ),
    (
        "How do I change my course?",
        "Visit the 'Course Registration' page for changes.",
    ),
    (
        "How to access study materials?",
        "Study materials are available under 'Resources'.",
    ),
    (
        "How do I log out of the portal?",
        "Click on your profile icon and select 'Logout'.",
    ),
];

/// The campus portal FAQ shipped with the binary.
pub fn builtin_corpus() -> Vec<FaqEntry> {
    PORTAL_FAQS
        .iter()
        .take(5)
        .chain(GREETINGS)
        .chain(PORTAL_FAQS.iter().skip(5))
        .map(|(q, a)| FaqEntry::new(*q, *a))
        .collect()
}

/// Read a `[{"question": .., "answer": ..}]` file.
///
/// An empty array is returned as-is; rejecting it is the cache's job.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<FaqEntry>> {
    let path = path.as_ref();
    if !is_corpus_file(path) {
        bail!("corpus file must be JSON: {}", path.display());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file at {}", path.display()))?;
    let corpus: Vec<FaqEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid corpus JSON in {}", path.display()))?;

    if let Some(pos) = corpus.iter().position(|e| e.question.trim().is_empty()) {
        bail!(
            "corpus entry #{pos} in {} has a blank question",
            path.display()
        );
    }
    tracing::info!(entries = corpus.len(), path = %path.display(), "loaded FAQ corpus");
    Ok(corpus)
}

pub fn write_corpus(path: impl AsRef<Path>, corpus: &[FaqEntry]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(corpus)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write corpus file at {}", path.display()))?;
    Ok(())
}

/// Identifies a (model, corpus questions) pair. Answers are not part of it
/// since they do not affect the embeddings.
pub fn corpus_fingerprint(model_id: &str, corpus: &[FaqEntry]) -> String {
    let mut ctx = md5::Context::new();
    ctx.consume(model_id.as_bytes());
    for entry in corpus {
        ctx.consume([0u8]);
        ctx.consume(entry.question.as_bytes());
    }
    format!("{:x}", ctx.compute())
}
