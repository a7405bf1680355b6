//! The suggestion record: the structured output of every analysis.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Substituted for any category a model left empty or omitted.
pub const PLACEHOLDER: &str = "Add relevant details here";

/// Category keys in serialization order.
pub const REQUIRED_KEYS: [&str; 8] = [
    "missing_skills",
    "skills_to_strengthen",
    "keywords_to_add",
    "experience_improvements",
    "project_improvements",
    "resume_structure_improvements",
    "language_and_wording",
    "ats_optimization",
];

/// Eight fixed categories of improvement advice. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRecord {
    pub missing_skills: Vec<String>,
    pub skills_to_strengthen: Vec<String>,
    pub keywords_to_add: Vec<String>,
    pub experience_improvements: Vec<String>,
    pub project_improvements: Vec<String>,
    pub resume_structure_improvements: Vec<String>,
    pub language_and_wording: Vec<String>,
    pub ats_optimization: Vec<String>,
}

impl SuggestionRecord {
    /// Compact JSON, no whitespace between tokens.
    pub fn to_json(&self) -> String {
        // Serializing a struct of string vectors cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Key/value pairs in `REQUIRED_KEYS` order.
    pub fn sections(&self) -> [(&'static str, &[String]); 8] {
        [
            (REQUIRED_KEYS[0], &self.missing_skills),
            (REQUIRED_KEYS[1], &self.skills_to_strengthen),
            (REQUIRED_KEYS[2], &self.keywords_to_add),
            (REQUIRED_KEYS[3], &self.experience_improvements),
            (REQUIRED_KEYS[4], &self.project_improvements),
            (REQUIRED_KEYS[5], &self.resume_structure_improvements),
            (REQUIRED_KEYS[6], &self.language_and_wording),
            (REQUIRED_KEYS[7], &self.ats_optimization),
        ]
    }

    /// Repairs a model-produced JSON value into a complete record.
    ///
    /// Returns `None` when the value is not a JSON object. Otherwise:
    /// missing keys become empty, scalars become one-element lists of their
    /// string form, unknown keys are dropped, and empty lists get `PLACEHOLDER`.
    pub fn from_model_value(value: Value) -> Option<Self> {
        let Value::Object(mut map) = value else {
            return None;
        };

        let mut take = |key: &str| -> Vec<String> {
            let items: Vec<String> = match map.remove(key) {
                None => Vec::new(),
                Some(Value::Array(items)) => items.into_iter().map(value_to_string).collect(),
                Some(other) => vec![value_to_string(other)],
            };
            if items.is_empty() {
                vec![PLACEHOLDER.to_string()]
            } else {
                items
            }
        };

        Some(Self {
            missing_skills: take("missing_skills"),
            skills_to_strengthen: take("skills_to_strengthen"),
            keywords_to_add: take("keywords_to_add"),
            experience_improvements: take("experience_improvements"),
            project_improvements: take("project_improvements"),
            resume_structure_improvements: take("resume_structure_improvements"),
            language_and_wording: take("language_and_wording"),
            ats_optimization: take("ats_optimization"),
        })
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
