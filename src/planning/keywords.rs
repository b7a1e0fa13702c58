//! Keyword tables used to read requirement statements.
//!
//! All matching is case-insensitive substring containment against the
//! lower-cased requirement text, so short keywords such as `ai` also match
//! inside longer words.

use crate::task::domain::Priority;

/// Keywords that make a requirement more expensive than the base estimate.
const COMPLEXITY_KEYWORDS: [&str; 6] = ["api", "database", "integration", "algorithm", "ai", "ml"];

/// Keywords that make a requirement cheaper than the base estimate.
const SIMPLICITY_KEYWORDS: [&str; 5] = ["ui", "styling", "layout", "text", "image"];

const HIGH_PRIORITY_KEYWORDS: [&str; 5] = ["core", "critical", "essential", "main", "primary"];

const LOW_PRIORITY_KEYWORDS: [&str; 4] = ["optional", "nice-to-have", "extra", "bonus"];

/// Keyword to skill-tag table, in lookup order.
const SKILL_TABLE: [(&str, &[&str]); 7] = [
    ("frontend", &["react", "html", "css", "javascript"]),
    ("backend", &["node.js", "api", "database"]),
    ("ui", &["design", "css", "figma"]),
    ("database", &["mongodb", "sql", "database"]),
    ("api", &["rest", "api", "backend"]),
    ("testing", &["testing", "jest", "quality-assurance"]),
    ("mobile", &["react-native", "mobile", "ios", "android"]),
];

/// Effort multiplier for requirements naming complex work.
pub(crate) const COMPLEX_EFFORT: f64 = 1.5;

/// Effort multiplier for requirements naming presentational work.
pub(crate) const SIMPLE_EFFORT: f64 = 0.7;

/// Effort multiplier for everything else.
pub(crate) const NEUTRAL_EFFORT: f64 = 1.0;

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Returns the effort multiplier for a lower-cased requirement.
///
/// Complexity keywords win over simplicity keywords.
pub(crate) fn effort_multiplier(text: &str) -> f64 {
    if contains_any(text, &COMPLEXITY_KEYWORDS) {
        COMPLEX_EFFORT
    } else if contains_any(text, &SIMPLICITY_KEYWORDS) {
        SIMPLE_EFFORT
    } else {
        NEUTRAL_EFFORT
    }
}

/// Returns the priority for a lower-cased requirement.
///
/// High-priority keywords win over low-priority keywords.
pub(crate) fn priority_for(text: &str) -> Priority {
    if contains_any(text, &HIGH_PRIORITY_KEYWORDS) {
        Priority::High
    } else if contains_any(text, &LOW_PRIORITY_KEYWORDS) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Returns the skill tags implied by a lower-cased requirement, without
/// repeats and in table order.
pub(crate) fn table_skills(text: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for (keyword, tags) in SKILL_TABLE {
        if !text.contains(keyword) {
            continue;
        }
        for tag in tags {
            if !skills.iter().any(|skill| skill == tag) {
                skills.push((*tag).to_owned());
            }
        }
    }
    skills
}
