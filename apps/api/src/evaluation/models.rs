//! Evaluation data models and the repair/fallback rules that turn a
//! collaborator outcome into a final `EvaluationResult`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::scoring::{KnockoutChecks, MetricBundle, TechnicalMetrics};

pub const MAX_SCORE: u8 = 10;

/// Which terminal path produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    /// The model's verdict parsed.
    Success,
    /// The model replied but the verdict was unusable; score is metric-only.
    Degraded,
    /// The model could not be reached.
    Failed,
}

/// Terminal artifact of an evaluation. `technical_metrics` and
/// `knockout_checks` always carry the independently computed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub status: EvaluationStatus,
    pub suitability_score: u8,
    pub reasoning: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub technical_metrics: TechnicalMetrics,
    pub knockout_checks: KnockoutChecks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The verdict shape requested from the model. Only `suitability_score` is
/// mandatory; any `technical_metrics` or `knockout_checks` it echoes back are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LlmVerdict {
    #[serde(deserialize_with = "deserialize_score")]
    pub suitability_score: f64,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Models sometimes quote the score ("7") or use a fraction (7.5).
fn deserialize_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Score {
        Number(f64),
        Text(String),
    }

    match Score::deserialize(deserializer)? {
        Score::Number(n) => Ok(n),
        Score::Text(s) => s
            .trim()
            .trim_end_matches("/10")
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid suitability_score '{s}'"))),
    }
}

/// Result of the collaborator step.
#[derive(Debug, Clone, PartialEq)]
pub enum LlmOutcome {
    Parsed(LlmVerdict),
    Unparseable { detail: String, raw: String },
    CallFailed(String),
}

impl EvaluationResult {
    /// Merges the collaborator outcome with the deterministic metrics.
    pub fn from_outcome(outcome: LlmOutcome, metrics: &MetricBundle) -> Self {
        let technical_metrics = metrics.technical_metrics();
        let knockout_checks = metrics.knockout.clone();

        match outcome {
            LlmOutcome::Parsed(verdict) => EvaluationResult {
                status: EvaluationStatus::Success,
                suitability_score: clamp_score(verdict.suitability_score),
                reasoning: verdict.reasoning,
                strengths: verdict.strengths,
                weaknesses: verdict.weaknesses,
                recommendations: verdict.recommendations,
                technical_metrics,
                knockout_checks,
                error: None,
            },
            LlmOutcome::Unparseable { detail, raw } => EvaluationResult {
                status: EvaluationStatus::Degraded,
                suitability_score: metrics.fallback_score(),
                reasoning: "Automated scoring based on technical metrics due to parsing error"
                    .to_string(),
                strengths: vec!["Technical analysis completed".to_string()],
                weaknesses: vec!["Could not parse detailed evaluation".to_string()],
                recommendations: vec!["Review resume manually for detailed feedback".to_string()],
                technical_metrics,
                knockout_checks,
                error: Some(format!("JSON parsing failed: {detail}; raw response: {raw}")),
            },
            LlmOutcome::CallFailed(detail) => EvaluationResult {
                status: EvaluationStatus::Failed,
                suitability_score: 0,
                reasoning: format!("Evaluation failed: {detail}"),
                strengths: vec![],
                weaknesses: vec!["Technical error in evaluation".to_string()],
                recommendations: vec!["Please try again or contact support".to_string()],
                technical_metrics,
                knockout_checks,
                error: Some(format!("LLM API call failed: {detail}")),
            },
        }
    }
}

fn clamp_score(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, f64::from(MAX_SCORE)) as u8
}
