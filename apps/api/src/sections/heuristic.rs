//! Pattern-based section splitter. No model call, fully deterministic.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{SectionContent, SectionError, SectionExtractor, SectionMap, DEFAULT_SECTION};

/// Recognised header labels.
pub const SECTION_TITLES: &[&str] = &[
    "PROFILE",
    "SUMMARY",
    "OBJECTIVE",
    "EDUCATION",
    "EXPERIENCE",
    "WORK EXPERIENCE",
    "PROFESSIONAL EXPERIENCE",
    "PROJECTS",
    "SKILLS",
    "TECHNICAL SKILLS",
    "CERTIFICATIONS",
    "ACHIEVEMENTS",
    "PUBLICATIONS",
    "AWARDS",
];

// A header is a line that starts with a title followed by a word boundary.
// The rest of the line is ignored.
static SECTION_HEADER: Lazy<Regex> = Lazy::new(|| {
    let alternatives = SECTION_TITLES
        .iter()
        .map(|title| regex::escape(title))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)^({alternatives})\b")).expect("section header regex is valid")
});

/// Line classifier: every non-blank line is either a header (moves the
/// cursor) or content for the current section.
pub struct HeuristicExtractor;

#[async_trait]
impl SectionExtractor for HeuristicExtractor {
    async fn extract(&self, text: &str) -> Result<SectionMap, SectionError> {
        if text.trim().is_empty() {
            return Err(SectionError::UnsupportedInput);
        }
        Ok(split_sections(text))
    }
}

/// Header label at the start of `line`, uppercased.
pub fn header_label(line: &str) -> Option<String> {
    SECTION_HEADER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
}

pub fn split_sections(text: &str) -> SectionMap {
    let mut buffers: Vec<(String, Vec<&str>)> = vec![(DEFAULT_SECTION.to_string(), Vec::new())];
    let mut cursor = 0;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match header_label(line) {
            Some(label) => {
                // A repeated header restarts that section.
                cursor = match buffers.iter().position(|(l, _)| *l == label) {
                    Some(index) => {
                        buffers[index].1.clear();
                        index
                    }
                    None => {
                        buffers.push((label, Vec::new()));
                        buffers.len() - 1
                    }
                };
            }
            None => buffers[cursor].1.push(line),
        }
    }

    let mut sections = SectionMap::new();
    for (label, lines) in buffers {
        sections.insert(&label, SectionContent::Text(lines.join("\n")));
    }
    sections
}
