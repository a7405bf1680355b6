//! Fixed vocabularies used by the keyword analysis.

/// Technology keywords checked against both the resume and the job description.
/// Order matters: missing skills and the "first present skill" follow it.
pub const SKILL_TAXONOMY: &[&str] = &[
    "python",
    "sql",
    "aws",
    "docker",
    "kubernetes",
    "react",
    "node",
    "tensorflow",
    "pandas",
    "spark",
    "java",
    "javascript",
    "cloud",
    "ci/cd",
    "etl",
    "linux",
    "git",
    "rest",
    "api",
    "mongodb",
    "postgresql",
    "mysql",
    "azure",
    "gcp",
    "jenkins",
    "kafka",
    "scala",
    "golang",
    "rust",
    "typescript",
    "vue",
    "angular",
    "django",
    "flask",
    "fastapi",
];

/// English function words skipped when counting job-description tokens.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "a", "to", "of", "in", "for", "with", "on", "as", "is", "be", "by", "or", "are",
    "at", "from", "that", "this", "it", "you", "we", "your", "our", "not", "can", "have", "been",
    "has", "was", "were", "do", "does", "did", "would", "could", "should", "may", "might", "must",
];

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.iter().any(|w| *w == token)
}
