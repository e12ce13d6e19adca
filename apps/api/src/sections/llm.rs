//! Model-based section extractor. Asks the collaborator for a fixed JSON
//! schema and repairs the reply with the shared fence-stripping parser.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use super::prompts::{SECTION_PARSE_PROMPT, SECTION_PARSE_SYSTEM};
use super::{SectionContent, SectionError, SectionExtractor, SectionMap};
use crate::llm_client::prompts::{fill_template, UNTRUSTED_INPUT_INSTRUCTION};
use crate::llm_client::{strip_fences_and_parse, Collaborator};

pub struct LlmSectionExtractor<'a> {
    collaborator: &'a dyn Collaborator,
}

impl<'a> LlmSectionExtractor<'a> {
    pub fn new(collaborator: &'a dyn Collaborator) -> Self {
        Self { collaborator }
    }
}

pub fn build_section_prompt(resume_text: &str) -> String {
    fill_template(
        SECTION_PARSE_PROMPT,
        &[
            ("untrusted_instruction", UNTRUSTED_INPUT_INSTRUCTION),
            ("resume_text", resume_text),
        ],
    )
}

#[async_trait]
impl SectionExtractor for LlmSectionExtractor<'_> {
    async fn extract(&self, text: &str) -> Result<SectionMap, SectionError> {
        if text.trim().is_empty() {
            return Err(SectionError::UnsupportedInput);
        }

        let prompt = build_section_prompt(text);
        let raw = self
            .collaborator
            .complete(&prompt, SECTION_PARSE_SYSTEM)
            .await
            .map_err(|e| SectionError::LlmUnavailable(e.to_string()))?;

        let parsed = strip_fences_and_parse(&raw).map_err(|e| {
            warn!("Section extraction reply was not JSON: {e}");
            SectionError::MalformedResponse(e.to_string())
        })?;

        sections_from_value(parsed)
    }
}

/// Converts the model's JSON object into a `SectionMap`, dropping empty sections.
fn sections_from_value(value: Value) -> Result<SectionMap, SectionError> {
    let Value::Object(object) = value else {
        return Err(SectionError::MalformedResponse(
            "expected a JSON object of sections".to_string(),
        ));
    };

    let mut sections = SectionMap::new();
    for (label, content) in object {
        sections.insert(&label, SectionContent::from(content));
    }
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::mock::ScriptedCollaborator;

    const REPLY: &str = r#"```json
{
  "EDUCATION": {"institutions": [{"name": "State University", "degree": "BS"}]},
  "skills": {"technical": ["Rust", "SQL"]},
  "PROJECTS": [],
  "AWARDS": null,
  "PROFILE/SUMMARY": "Backend engineer"
}
```"#;

    #[tokio::test]
    async fn test_extracts_structured_sections_from_fenced_reply() {
        let collaborator = ScriptedCollaborator::replying(REPLY);
        let sections = LlmSectionExtractor::new(&collaborator)
            .extract("resume body")
            .await
            .unwrap();

        assert_eq!(
            sections.labels(),
            vec!["EDUCATION", "SKILLS", "PROFILE/SUMMARY"]
        );
        assert!(matches!(
            sections.get("EDUCATION"),
            Some(SectionContent::Structured(_))
        ));
        assert_eq!(
            sections.get("PROFILE/SUMMARY").and_then(|c| c.as_text()),
            Some("Backend engineer")
        );
    }

    #[tokio::test]
    async fn test_prompt_embeds_resume_text_and_schema() {
        let collaborator = ScriptedCollaborator::replying("{}");
        LlmSectionExtractor::new(&collaborator)
            .extract("Jane Roe, Rust developer")
            .await
            .unwrap();

        let prompts = collaborator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Jane Roe, Rust developer"));
        assert!(prompts[0].contains("\"CERTIFICATIONS\""));
        assert!(!prompts[0].contains("{resume_text}"));
    }

    #[tokio::test]
    async fn test_non_object_reply_is_malformed() {
        let collaborator = ScriptedCollaborator::replying("[1, 2, 3]");
        let err = LlmSectionExtractor::new(&collaborator)
            .extract("resume body")
            .await
            .unwrap_err();
        assert!(matches!(err, SectionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_prose_reply_is_malformed() {
        let collaborator = ScriptedCollaborator::replying("Sure! Here are the sections.");
        let err = LlmSectionExtractor::new(&collaborator)
            .extract("resume body")
            .await
            .unwrap_err();
        assert!(matches!(err, SectionError::MalformedResponse(_)));
    }
}
