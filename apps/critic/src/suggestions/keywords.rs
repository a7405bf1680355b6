//! Keyword analysis: taxonomy gap detection and JD token frequency.
//!
//! Both functions expect lower-cased input; matching is case-insensitive only
//! because callers lower-case first.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::suggestions::taxonomy::{is_stopword, SKILL_TAXONOMY};

/// Tokens shorter than this never become keyword suggestions.
const MIN_TOKEN_LEN: usize = 3;
/// Size of the frequency-ranked pool the keyword suggestions are drawn from.
const FREQUENT_TOKEN_POOL: usize = 10;

/// One word-boundary-anchored pattern per taxonomy keyword, in taxonomy order.
/// Anchoring keeps "java" from matching inside "javascript".
static SKILL_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SKILL_TAXONOMY
        .iter()
        .map(|kw| {
            let pattern = format!(r"\b{}\b", regex::escape(kw));
            (*kw, Regex::new(&pattern).expect("taxonomy keyword pattern"))
        })
        .collect()
});

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z0-9\+\-#]+\b").expect("token pattern"));

/// Taxonomy keywords classified against a resume / JD pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillGap {
    /// In the JD, not in the resume. Taxonomy order, untruncated.
    pub missing: Vec<&'static str>,
    /// In the resume (regardless of the JD). Taxonomy order.
    pub present: Vec<&'static str>,
}

impl SkillGap {
    /// True when `token` was already classified as a missing or present skill.
    pub fn contains(&self, token: &str) -> bool {
        self.missing.iter().chain(&self.present).any(|kw| *kw == token)
    }

    /// First present skill in taxonomy order; strengthening advice names it.
    pub fn primary_present(&self) -> Option<&'static str> {
        self.present.first().copied()
    }
}

/// Classifies every taxonomy keyword against the (lower-cased) resume and JD.
pub fn find_skill_gap(resume_lower: &str, jd_lower: &str) -> SkillGap {
    let mut gap = SkillGap::default();

    for (kw, pattern) in SKILL_PATTERNS.iter() {
        let in_resume = pattern.is_match(resume_lower);
        if in_resume {
            gap.present.push(*kw);
        } else if pattern.is_match(jd_lower) {
            gap.missing.push(*kw);
        }
    }

    gap
}

/// Returns up to `limit` of the most frequent JD tokens, skipping stopwords,
/// short tokens, and anything already covered by `gap`.
///
/// Ties keep first-seen order (stable sort over insertion order).
pub fn top_keywords(jd_lower: &str, gap: &SkillGap, limit: usize) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for token in TOKEN_PATTERN.find_iter(jd_lower).map(|m| m.as_str()) {
        if is_stopword(token) || token.len() < MIN_TOKEN_LEN || gap.contains(token) {
            continue;
        }
        match positions.get(token) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(FREQUENT_TOKEN_POOL)
        .take(limit)
        .map(|(token, _)| token.to_string())
        .collect()
}
