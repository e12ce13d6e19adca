// LLM prompt templates for structured section extraction.

/// System prompt for section extraction — enforces JSON-only output.
pub const SECTION_PARSE_SYSTEM: &str = "\
You are a professional resume parser. \
Extract resume sections into structured JSON. \
You MUST respond with valid JSON only — no explanations. \
Copy facts from the resume; never invent institutions, employers, dates or skills.";

/// Section extraction prompt. Replace `{untrusted_instruction}` and `{resume_text}`.
pub const SECTION_PARSE_PROMPT: &str = r#"Extract the sections of the resume below into a JSON object.

{untrusted_instruction}

OUTPUT SCHEMA (include a key ONLY if that section exists in the resume — omit absent sections entirely, never use null or empty values):
{
  "PROFILE/SUMMARY": "string",
  "EDUCATION": {
    "institutions": [
      {"name": "string", "degree": "string", "field": "string", "year": "string", "gpa": "string"}
    ]
  },
  "EXPERIENCE": {
    "positions": [
      {"title": "string", "company": "string", "duration": "string", "description": "string"}
    ]
  },
  "SKILLS": {
    "technical": ["string"],
    "soft_skills": ["string"],
    "languages": ["string"]
  },
  "PROJECTS": [
    {"name": "string", "description": "string", "technologies": ["string"], "url": "string"}
  ],
  "CERTIFICATIONS": [
    {"name": "string", "issuer": "string", "year": "string"}
  ],
  "ACHIEVEMENTS": ["string"]
}

RULES:
1. Section keys must be exactly the uppercase names shown above.
2. Omit fields inside a record when the resume does not state them.
3. Return ONLY the JSON object.

RESUME TEXT:
{resume_text}"#;
