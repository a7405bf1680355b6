//! Structural signals detected in the resume text.

use once_cell::sync::Lazy;
use regex::Regex;

// Case-sensitive on purpose: "5x" counts, "5X" does not.
static METRICS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+%|\$\d+|\d+x|\d+ (users|customers|transactions)").expect("metrics pattern")
});

static PROJECTS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"project|github|portfolio|built|created|developed").expect("projects pattern")
});

static EXPERIENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+ (years?|months?)|experience|worked|employed").expect("experience pattern")
});

/// Boolean content signals that drive the conditional advice lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResumeSignals {
    /// Percentages, dollar amounts, `Nx` multipliers, or user/customer/transaction counts.
    pub has_metrics: bool,
    pub has_projects: bool,
    pub has_experience: bool,
}

impl ResumeSignals {
    /// `resume_text` is the original-case text; metrics are matched against it
    /// directly, the other signals against its lower-cased form.
    pub fn detect(resume_text: &str) -> Self {
        let lower = resume_text.to_lowercase();
        Self {
            has_metrics: METRICS_PATTERN.is_match(resume_text),
            has_projects: PROJECTS_PATTERN.is_match(&lower),
            has_experience: EXPERIENCE_PATTERN.is_match(&lower),
        }
    }
}
