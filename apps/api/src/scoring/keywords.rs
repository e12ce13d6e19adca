use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::stop_words::KEYWORD_STOP_WORDS;

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| KEYWORD_STOP_WORDS.iter().copied().collect());

/// Significant words of `text`, in order, duplicates kept.
///
/// Punctuation is deleted (not replaced), so "node.js" becomes "nodejs".
/// Tokens of two characters or fewer and stop words are dropped.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() > 2 && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Fraction of job keyword occurrences whose word appears in the résumé,
/// clamped to [0, 1]. 0.0 when the job has no keywords.
pub fn density(resume_text: &str, job_text: &str) -> f64 {
    let job_keywords = extract_keywords(job_text);
    if job_keywords.is_empty() {
        return 0.0;
    }

    let resume_keywords: HashSet<String> = extract_keywords(resume_text).into_iter().collect();
    let matched = job_keywords
        .iter()
        .filter(|keyword| resume_keywords.contains(*keyword))
        .count();

    (matched as f64 / job_keywords.len() as f64).min(1.0)
}
