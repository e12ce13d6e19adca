//! TF-IDF cosine similarity over exactly two documents.
//!
//! Term weighting follows the common smoothed-IDF convention:
//! `tfidf = count * (ln((1 + n) / (1 + df)) + 1)`, vectors L2-normalised.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::stop_words::ENGLISH_STOP_WORDS;

// Tokens are runs of two or more word characters.
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token regex is valid"));

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Lexical similarity in [0, 1]. Empty input or an empty vocabulary after
/// stop-word removal yields 0.0.
pub fn similarity(resume_text: &str, job_text: &str) -> f64 {
    if resume_text.trim().is_empty() || job_text.trim().is_empty() {
        return 0.0;
    }

    let resume_counts = term_counts(resume_text);
    let job_counts = term_counts(job_text);

    let vocabulary: HashSet<&str> = resume_counts
        .keys()
        .chain(job_counts.keys())
        .map(String::as_str)
        .collect();
    if vocabulary.is_empty() {
        return 0.0;
    }

    let documents = [&resume_counts, &job_counts];
    let n = documents.len() as f64;
    let idf: HashMap<&str, f64> = vocabulary
        .iter()
        .map(|term| {
            let df = documents.iter().filter(|d| d.contains_key(*term)).count() as f64;
            (*term, ((1.0 + n) / (1.0 + df)).ln() + 1.0)
        })
        .collect();

    let resume_vector = weighted(&resume_counts, &idf);
    let job_vector = weighted(&job_counts, &idf);

    let resume_norm = norm(&resume_vector);
    let job_norm = norm(&job_vector);
    if resume_norm == 0.0 || job_norm == 0.0 {
        return 0.0;
    }

    let dot: f64 = resume_vector
        .iter()
        .filter_map(|(term, weight)| job_vector.get(term).map(|other| weight * other))
        .sum();

    (dot / (resume_norm * job_norm)).clamp(0.0, 1.0)
}

fn term_counts(text: &str) -> HashMap<String, u32> {
    let lowered = text.to_lowercase();
    let mut counts = HashMap::new();
    for token in TOKEN.find_iter(&lowered).map(|m| m.as_str()) {
        if !STOP_WORDS.contains(token) {
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

fn weighted<'a>(counts: &'a HashMap<String, u32>, idf: &HashMap<&str, f64>) -> HashMap<&'a str, f64> {
    counts
        .iter()
        .map(|(term, count)| {
            let weight = idf.get(term.as_str()).copied().unwrap_or(1.0);
            (term.as_str(), *count as f64 * weight)
        })
        .collect()
}

fn norm(vector: &HashMap<&str, f64>) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(similarity("", "Rust engineer"), 0.0);
        assert_eq!(similarity("Rust engineer", "   \n"), 0.0);
        assert_eq!(similarity(" ", " "), 0.0);
    }

    #[test]
    fn test_identical_documents_score_one() {
        let text = "Senior Rust engineer building distributed storage engines";
        assert!((similarity(text, text) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_documents_score_zero() {
        assert_eq!(similarity("python django", "rust tokio"), 0.0);
    }

    #[test]
    fn test_stop_word_only_vocabulary_scores_zero() {
        assert_eq!(similarity("the and of", "a an the"), 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        let score = similarity("RUST Kubernetes", "rust kubernetes");
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_overlap_matches_hand_computed_value() {
        // Shared term "rust" has idf 1.0, unique terms ln(1.5) + 1.
        // doc1 = [rust, python], doc2 = [rust, golang]
        // cos = 1 / (1 + u^2) where u = ln(1.5) + 1.
        let unique = 1.5_f64.ln() + 1.0;
        let expected = 1.0 / (1.0 + unique * unique);
        let score = similarity("rust python", "rust golang");
        assert!((score - expected).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_more_overlap_scores_higher() {
        let job = "rust tokio postgres kubernetes";
        let weak = similarity("rust java spring oracle", job);
        let strong = similarity("rust tokio postgres docker", job);
        assert!(strong > weak);
    }
}
