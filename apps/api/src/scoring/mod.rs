// Deterministic match signals between a résumé and a job description.
// All scorers are pure, CPU-bound and independent of each other.

pub mod keywords;
pub mod knockout;
pub mod similarity;
mod stop_words;

use serde::{Deserialize, Serialize};

use crate::sections::SectionMap;

pub use keywords::density;
pub use knockout::{check_knockouts, KnockoutChecks};
pub use similarity::similarity;

/// The three deterministic signals for one evaluation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricBundle {
    pub cosine_similarity: f64,
    pub keyword_density: f64,
    pub knockout: KnockoutChecks,
}

/// Serialized subset of `MetricBundle` reported with every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalMetrics {
    pub cosine_similarity: f64,
    pub keyword_density: f64,
    pub knockout_violations: usize,
}

impl MetricBundle {
    pub fn compute(sections: &SectionMap, job_text: &str) -> Self {
        let resume_text = sections.to_search_text();
        Self {
            cosine_similarity: similarity(&resume_text, job_text),
            keyword_density: density(&resume_text, job_text),
            knockout: check_knockouts(sections, job_text),
        }
    }

    pub fn technical_metrics(&self) -> TechnicalMetrics {
        TechnicalMetrics {
            cosine_similarity: self.cosine_similarity,
            keyword_density: self.keyword_density,
            knockout_violations: self.knockout.violation_count(),
        }
    }

    /// Metric-only score used when the model's verdict cannot be parsed:
    /// `round(clamp((similarity + density) * 5, 0, 10))`.
    pub fn fallback_score(&self) -> u8 {
        ((self.cosine_similarity + self.keyword_density) * 5.0)
            .clamp(0.0, 10.0)
            .round() as u8
    }
}
