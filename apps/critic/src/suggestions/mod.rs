// Rule-based suggestion engine.
// Implements: skill gap detection, JD keyword frequency, resume signal detection,
// and assembly of the eight-category suggestion record. Pure and deterministic.

pub mod generator;
pub mod keywords;
pub mod record;
pub mod signals;
pub mod taxonomy;

pub use generator::{generate, generate_json};
pub use record::SuggestionRecord;
