//! Knockout checks — must-have requirements from the job description that the
//! résumé never mentions.
//!
//! Purely textual: requirement clauses are located with fixed patterns, split
//! on commas, and each token is searched literally in the serialized sections.
//! No synonyms, no stemming, semicolons are not separators.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::sections::SectionMap;

/// Clause markers; each capture runs to the next period.
static REQUIREMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)required.*?skills?[:\s]*([^.]*)",
        r"(?i)must.*?have[:\s]*([^.]*)",
        r"(?i)requirements[:\s]*([^.]*)",
        r"(?i)qualifications[:\s]*([^.]*)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("knockout pattern is valid"))
    .collect()
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnockoutChecks {
    pub required_skills_missing: bool,
    /// "Missing required skill: X", in discovery order.
    pub knockout_reasons: Vec<String>,
    /// Not evaluated; always false. Kept so clients of the older response
    /// shape still find the key.
    #[serde(default)]
    pub experience_gap: bool,
    /// Not evaluated; always false.
    #[serde(default)]
    pub education_mismatch: bool,
}

impl KnockoutChecks {
    pub fn violation_count(&self) -> usize {
        self.knockout_reasons.len()
    }
}

/// Requirement clauses captured from the job description, lowercased.
pub fn requirement_clauses(job_text: &str) -> Vec<String> {
    let lowered = job_text.to_lowercase();
    REQUIREMENT_PATTERNS
        .iter()
        .flat_map(|pattern| {
            pattern
                .captures_iter(&lowered)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn check_knockouts(sections: &SectionMap, job_text: &str) -> KnockoutChecks {
    let mut checks = KnockoutChecks::default();

    let clauses = requirement_clauses(job_text);
    if clauses.is_empty() {
        return checks;
    }

    let resume_text = sections.to_json_string().to_lowercase();
    for clause in &clauses {
        for requirement in clause.split(',').map(str::trim).filter(|r| !r.is_empty()) {
            if !resume_text.contains(requirement) {
                checks.required_skills_missing = true;
                checks
                    .knockout_reasons
                    .push(format!("Missing required skill: {requirement}"));
            }
        }
    }

    checks
}
