// Resume-to-job evaluation: metric computation, LLM verdict, repair and fallback.
// All LLM calls go through the `Collaborator` trait — no direct API calls here.

pub mod evaluator;
pub mod handlers;
pub mod models;
pub mod prompts;
