//! Rule-based suggestion generator.
//!
//! Flow: lower-case inputs → taxonomy gap → JD keyword frequency →
//!       resume signals → conditional advice → fallbacks → record.
//!
//! Never fails. Empty inputs produce a record made entirely of fallbacks and
//! static advice.

use tracing::debug;

use crate::suggestions::keywords::{find_skill_gap, top_keywords};
use crate::suggestions::record::SuggestionRecord;
use crate::suggestions::signals::ResumeSignals;

const MAX_MISSING_SKILLS: usize = 8;
const MAX_KEYWORDS: usize = 8;

const MISSING_SKILLS_FALLBACK: &str = "Review job posting for domain-specific skills not on resume";
const STRENGTHEN_FALLBACK: &str = "Add proficiency levels and use-cases for existing skills";
const KEYWORDS_FALLBACK: [&str; 3] = ["scalability", "optimization", "architecture"];

const QUANTIFY_OUTCOMES: &str =
    "Add quantified outcomes (%, revenue, time saved) to experience bullets";
const HIGHLIGHT_RECENT: &str =
    "Highlight achievements from most recent roles that match job responsibilities";
const TEAM_SCOPE: &str =
    "Include team size, reporting relationships, and scope of impact for major roles";
const REORDER_BULLETS: &str = "Reorder bullets to prioritize items matching the job description";

const PROJECT_STACK: &str = "Specify technologies used for each project (stack details)";
const PROJECT_OUTCOMES: &str =
    "Add measurable outcomes or impact (performance gains, user metrics)";
const ADD_PROJECTS_SECTION: &str = "Add a Projects section if applicable (GitHub, portfolio work)";
const PROJECT_TIMELINES: &str = "Include project timelines and team size/collaboration model";

const RESUME_STRUCTURE: [&str; 3] = [
    "Add a headline summary (job title + 2–3 key strengths aligned to role)",
    "Create a dedicated Skills section grouped by category (Languages, Frameworks, Cloud, Tools)",
    "Ensure consistent formatting with clear section headers and proper spacing",
];

const WORDING: [&str; 2] = [
    r#"Replace passive phrases ("responsible for") with active verbs (led, implemented, delivered)"#,
    r#"Quantify or make specific vague claims (change "experienced with" to "5+ years of")"#,
];
const METRIC_VERBS: &str = "Add metrics to action verbs (reduced X by Y%, increased Z)";

const ATS_OPTIMIZATION: [&str; 3] = [
    "Include keyword phrases from job posting in Skills and Experience sections naturally",
    "Use standard section headers (no symbols or special formatting) for ATS parsing",
    "Save as clean PDF or DOCX; avoid tables, images, and unusual fonts",
];

/// Compares a resume against a job description and returns the full record.
pub fn generate(resume_text: &str, job_description: &str) -> SuggestionRecord {
    let resume_lower = resume_text.to_lowercase();
    let jd_lower = job_description.to_lowercase();

    let gap = find_skill_gap(&resume_lower, &jd_lower);
    let keywords = top_keywords(&jd_lower, &gap, MAX_KEYWORDS);
    let signals = ResumeSignals::detect(resume_text);

    debug!(
        "Rule-based analysis: missing={} present={} keywords={} signals={:?}",
        gap.missing.len(),
        gap.present.len(),
        keywords.len(),
        signals
    );

    let missing_skills: Vec<String> = gap
        .missing
        .iter()
        .take(MAX_MISSING_SKILLS)
        .map(|kw| kw.to_string())
        .collect();

    let skills_to_strengthen = match gap.primary_present() {
        Some(skill) => vec![
            format!("Quantify proficiency for {skill} (years, projects, outcomes)"),
            format!("Add specific use-cases for {skill} (e.g., built X, optimized Y)"),
        ],
        None => Vec::new(),
    };

    SuggestionRecord {
        missing_skills: or_fallback(missing_skills, &[MISSING_SKILLS_FALLBACK]),
        skills_to_strengthen: or_fallback(skills_to_strengthen, &[STRENGTHEN_FALLBACK]),
        keywords_to_add: or_fallback(keywords, &KEYWORDS_FALLBACK),
        experience_improvements: experience_improvements(signals),
        project_improvements: project_improvements(signals),
        resume_structure_improvements: owned(&RESUME_STRUCTURE),
        language_and_wording: language_and_wording(signals),
        ats_optimization: owned(&ATS_OPTIMIZATION),
    }
}

/// `generate` serialized as compact JSON.
pub fn generate_json(resume_text: &str, job_description: &str) -> String {
    generate(resume_text, job_description).to_json()
}

fn experience_improvements(signals: ResumeSignals) -> Vec<String> {
    let mut lines = Vec::new();
    if !signals.has_metrics {
        lines.push(QUANTIFY_OUTCOMES);
    }
    if signals.has_experience {
        lines.push(HIGHLIGHT_RECENT);
    }
    lines.push(TEAM_SCOPE);
    if lines.len() < 3 {
        lines.push(REORDER_BULLETS);
    }
    owned(&lines)
}

fn project_improvements(signals: ResumeSignals) -> Vec<String> {
    let mut lines = if signals.has_projects {
        vec![PROJECT_STACK, PROJECT_OUTCOMES]
    } else {
        vec![ADD_PROJECTS_SECTION]
    };
    lines.push(PROJECT_TIMELINES);
    owned(&lines)
}

fn language_and_wording(signals: ResumeSignals) -> Vec<String> {
    let mut lines = WORDING.to_vec();
    if !signals.has_metrics {
        lines.push(METRIC_VERBS);
    }
    owned(&lines)
}

fn or_fallback(lines: Vec<String>, fallback: &[&str]) -> Vec<String> {
    if lines.is_empty() {
        owned(fallback)
    } else {
        lines
    }
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}
