//! Evaluation pipeline.
//!
//! Flow: sections → metrics (similarity, density, knockouts) → evaluation
//! prompt → collaborator → repair/fallback → `EvaluationResult`.
//!
//! `evaluate` never fails. A collaborator error yields a `failed` result and
//! an unusable reply yields a `degraded` result; both keep the metrics.

use tracing::{info, warn};

use crate::evaluation::models::{EvaluationResult, LlmOutcome, LlmVerdict};
use crate::evaluation::prompts::{EVALUATION_PROMPT_TEMPLATE, EVALUATION_SYSTEM};
use crate::llm_client::prompts::{fill_template, UNTRUSTED_INPUT_INSTRUCTION};
use crate::llm_client::{strip_fences_and_parse, Collaborator};
use crate::scoring::MetricBundle;
use crate::sections::SectionMap;

/// Scores `sections` against `job_description`.
pub async fn evaluate(
    collaborator: &dyn Collaborator,
    sections: &SectionMap,
    job_description: &str,
) -> EvaluationResult {
    let metrics = MetricBundle::compute(sections, job_description);
    info!(
        "Metrics computed: similarity={:.3}, density={:.3}, knockouts={}",
        metrics.cosine_similarity,
        metrics.keyword_density,
        metrics.knockout.violation_count()
    );

    let outcome = request_verdict(collaborator, sections, job_description, &metrics).await;
    let result = EvaluationResult::from_outcome(outcome, &metrics);

    info!(
        "Evaluation finished: status={:?}, score={}/10",
        result.status, result.suitability_score
    );
    result
}

/// Asks the collaborator for a verdict and classifies the reply.
pub async fn request_verdict(
    collaborator: &dyn Collaborator,
    sections: &SectionMap,
    job_description: &str,
    metrics: &MetricBundle,
) -> LlmOutcome {
    let prompt = build_evaluation_prompt(sections, job_description, metrics);

    let raw = match collaborator.complete(&prompt, EVALUATION_SYSTEM).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Evaluation call failed: {e}");
            return LlmOutcome::CallFailed(e.to_string());
        }
    };

    let parsed = strip_fences_and_parse(&raw)
        .map_err(|e| e.to_string())
        .and_then(|value| serde_json::from_value::<LlmVerdict>(value).map_err(|e| e.to_string()));

    match parsed {
        Ok(verdict) => LlmOutcome::Parsed(verdict),
        Err(detail) => {
            warn!("Evaluation reply unusable, falling back to metric score: {detail}");
            LlmOutcome::Unparseable { detail, raw }
        }
    }
}

pub fn build_evaluation_prompt(
    sections: &SectionMap,
    job_description: &str,
    metrics: &MetricBundle,
) -> String {
    let sections_json = serde_json::to_string_pretty(sections).unwrap_or_default();
    let cosine_similarity = format!("{:.3}", metrics.cosine_similarity);
    let keyword_density = format!("{:.3}", metrics.keyword_density);
    let knockout_violations = metrics.knockout.violation_count().to_string();

    fill_template(
        EVALUATION_PROMPT_TEMPLATE,
        &[
            ("untrusted_instruction", UNTRUSTED_INPUT_INSTRUCTION),
            ("cosine_similarity", &cosine_similarity),
            ("keyword_density", &keyword_density),
            ("knockout_violations", &knockout_violations),
            ("job_description", job_description),
            ("sections_json", &sections_json),
        ],
    )
}
