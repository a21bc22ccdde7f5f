use serde::Serialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub const DEFAULT_PREFIX: &str = "INFO";

/// Echoes `input`, confirming the helper library is reachable.
pub fn import_checking1(input: &str) -> String {
    format!("Import import_checking1 successful, and here is your input: {input}")
}

/// Same as [`import_checking1`], for the text demo.
pub fn import_checking2(input: &str) -> String {
    format!("Import import_checking2 successful, and here is your input: {input}")
}

/// `"{prefix}: {message}"`, with [`DEFAULT_PREFIX`] when no prefix is given.
pub fn format_message(message: &str, prefix: Option<&str>) -> String {
    format!("{}: {}", prefix.unwrap_or(DEFAULT_PREFIX), message)
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TextAnalysis {
    pub word_count: usize,
    pub char_count: usize,
    /// RFC 3339 time of the analysis
    pub processed_at: String,
    pub original_text: String,
}

pub fn process_text(text: &str) -> TextAnalysis {
    TextAnalysis {
        word_count: text.split_whitespace().count(),
        char_count: text.chars().count(),
        processed_at: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default(),
        original_text: text.to_string(),
    }
}

/// True when `value` has at least `min_length` characters once trimmed.
pub fn validate_input(value: &str, min_length: usize) -> bool {
    value.trim().chars().count() >= min_length
}

/// First 50 characters of user input, for logs.
pub fn preview(text: &str) -> String {
    let mut preview: String = text.chars().take(50).collect();
    if preview.len() < text.len() {
        preview.push_str("...");
    }
    preview
}
