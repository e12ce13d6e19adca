// LLM prompt templates for the suitability evaluation.

/// System prompt for evaluation — enforces JSON-only output.
pub const EVALUATION_SYSTEM: &str = "You are an expert HR professional evaluating a resume \
    against a job description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT include explanations or apologies.";

/// Evaluation prompt template.
/// Replace: {untrusted_instruction}, {job_description}, {sections_json},
///          {cosine_similarity}, {keyword_density}, {knockout_violations}
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Evaluate this resume for the job below.

{untrusted_instruction}

JOB DESCRIPTION:
{job_description}

PARSED RESUME SECTIONS:
{sections_json}

TECHNICAL METRICS:
- Cosine Similarity Score: {cosine_similarity}
- Keyword Density Score: {keyword_density}
- Knockout Criteria Violations: {knockout_violations}

Provide:
1. A suitability score out of 10 (considering relevance, experience match, skills alignment)
2. Detailed reasoning for the score
3. Key strengths and weaknesses
4. Specific recommendations for improvement

Consider experience relevance and duration, skills match with the job requirements,
education alignment, project relevance, and overall fit for the role.

Return a JSON object with EXACTLY this structure:
{
  "suitability_score": <integer 0-10>,
  "reasoning": "<detailed reasoning>",
  "strengths": ["<strength>"],
  "weaknesses": ["<weakness>"],
  "recommendations": ["<recommendation>"],
  "technical_metrics": {
    "cosine_similarity": {cosine_similarity},
    "keyword_density": {keyword_density},
    "knockout_violations": {knockout_violations}
  }
}"#;
