//! Section Extractor — turns raw résumé text into an ordered `SectionMap`.
//!
//! Two strategies share one trait: `HeuristicExtractor` (pattern-based line
//! classifier, no I/O) and `LlmSectionExtractor` (structured extraction via
//! the collaborator). Callers pick one through `parse_sections`.

pub mod heuristic;
pub mod llm;
pub mod prompts;

use std::fmt;

use async_trait::async_trait;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::llm_client::Collaborator;

pub use heuristic::HeuristicExtractor;
pub use llm::LlmSectionExtractor;

/// Label used for text that appears before the first recognised header.
pub const DEFAULT_SECTION: &str = "PROFILE/SUMMARY";

#[derive(Debug, Error)]
pub enum SectionError {
    #[error("Resume text is empty")]
    UnsupportedInput,

    #[error("Section extraction model unavailable: {0}")]
    LlmUnavailable(String),

    #[error("Section extraction model returned an unusable response: {0}")]
    MalformedResponse(String),
}

/// Which extraction strategy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    #[default]
    Heuristic,
    #[serde(alias = "gemini")]
    Llm,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Heuristic => "heuristic",
            ParseMode::Llm => "llm",
        }
    }
}

impl std::str::FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" => Ok(ParseMode::Heuristic),
            "llm" | "gemini" => Ok(ParseMode::Llm),
            other => Err(format!(
                "Unknown parse method '{other}'. Expected 'heuristic' or 'llm'."
            )),
        }
    }
}

/// Content of one section: raw lines in heuristic mode, a structured record
/// in LLM mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionContent {
    Text(String),
    Structured(Value),
}

impl SectionContent {
    fn is_empty(&self) -> bool {
        match self {
            SectionContent::Text(text) => text.trim().is_empty(),
            SectionContent::Structured(value) => value_is_empty(value),
        }
    }

    #[cfg(test)]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SectionContent::Text(text) => Some(text),
            SectionContent::Structured(Value::String(text)) => Some(text),
            SectionContent::Structured(_) => None,
        }
    }
}

impl From<Value> for SectionContent {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => SectionContent::Text(text),
            other => SectionContent::Structured(other),
        }
    }
}

fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.iter().all(value_is_empty),
        Value::Object(map) => map.values().all(value_is_empty),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Ordered section-label → content mapping. Labels are unique and
/// uppercase; empty sections are never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    entries: Vec<(String, SectionContent)>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a section. Empty content is dropped, and replacing
    /// a label with empty content removes it.
    pub fn insert(&mut self, label: &str, content: SectionContent) {
        let label = label.trim().to_uppercase();
        let position = self.entries.iter().position(|(l, _)| *l == label);

        if content.is_empty() || label.is_empty() {
            if let Some(index) = position {
                self.entries.remove(index);
            }
            return;
        }

        match position {
            Some(index) => self.entries[index].1 = content,
            None => self.entries.push((label, content)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&SectionContent> {
        let label = label.to_uppercase();
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, c)| c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sections in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionContent)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), c))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.iter().map(|(l, _)| l).collect()
    }

    /// All text leaves in section order, space-joined. This is the résumé
    /// text the similarity and density scorers compare against.
    pub fn to_search_text(&self) -> String {
        let mut parts = Vec::new();
        for (_, content) in self.iter() {
            match content {
                SectionContent::Text(text) => parts.push(text.clone()),
                SectionContent::Structured(value) => collect_strings(value, &mut parts),
            }
        }
        parts.join(" ")
    }

    /// Compact JSON serialization; the knockout check searches this text.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn collect_strings(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) if !s.trim().is_empty() => out.push(s.clone()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Array(items) => items.iter().for_each(|v| collect_strings(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_strings(v, out)),
        _ => {}
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, content) in self.iter() {
            map.serialize_entry(label, content)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SectionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionMapVisitor;

        impl<'de> Visitor<'de> for SectionMapVisitor {
            type Value = SectionMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping section labels to content")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SectionMap, A::Error> {
                let mut sections = SectionMap::new();
                while let Some((label, content)) = access.next_entry::<String, SectionContent>()? {
                    sections.insert(&label, content);
                }
                Ok(sections)
            }
        }

        deserializer.deserialize_map(SectionMapVisitor)
    }
}

/// One extraction strategy.
#[async_trait]
pub trait SectionExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<SectionMap, SectionError>;
}

/// Splits résumé text into sections with the strategy selected by `mode`.
pub async fn parse_sections(
    text: &str,
    mode: ParseMode,
    collaborator: &dyn Collaborator,
) -> Result<SectionMap, SectionError> {
    if text.trim().is_empty() {
        return Err(SectionError::UnsupportedInput);
    }

    let sections = match mode {
        ParseMode::Heuristic => HeuristicExtractor.extract(text).await?,
        ParseMode::Llm => LlmSectionExtractor::new(collaborator).extract(text).await?,
    };

    tracing::info!(
        "Extracted {} sections ({}): {:?}",
        sections.len(),
        mode.as_str(),
        sections.labels()
    );
    Ok(sections)
}
