// Prompt constants for model-backed suggestion generation.

/// Characters of each input embedded in the prompt.
pub const PROMPT_INPUT_CHARS: usize = 1000;

/// System prompt enforcing JSON-only output.
pub const SUGGESTION_SYSTEM: &str = "You are a resume critique engine. \
    You compare a resume with a job description and return improvement suggestions. \
    You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations.";

const SUGGESTION_PROMPT_HEADER: &str = "Analyze the resume below against the job description. \
Return ONLY a JSON object, starting with { and ending with }. No text before or after it.";

const SUGGESTION_PROMPT_SCHEMA: &str = r#"Return exactly these keys, each an array of short strings:
{
  "missing_skills": [],
  "skills_to_strengthen": [],
  "keywords_to_add": [],
  "experience_improvements": [],
  "project_improvements": [],
  "resume_structure_improvements": [],
  "language_and_wording": [],
  "ats_optimization": []
}"#;

/// Builds the suggestion prompt from the first `PROMPT_INPUT_CHARS` characters
/// of each input.
pub fn build_suggestion_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "{SUGGESTION_PROMPT_HEADER}\n\nRESUME:\n{}\n\nJOB DESCRIPTION:\n{}\n\n{SUGGESTION_PROMPT_SCHEMA}",
        head_chars(resume_text, PROMPT_INPUT_CHARS),
        head_chars(job_description, PROMPT_INPUT_CHARS),
    )
}

fn head_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
