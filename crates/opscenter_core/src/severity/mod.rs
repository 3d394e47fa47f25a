use serde::{Deserialize, Serialize};

/// Substrings that mark a priority as High-Severity. Matching is case-sensitive.
pub const HIGH_SEVERITY_MARKERS: [&str; 2] = ["High", "Critical"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeverityClass {
    pub high_severity: bool,
    pub label: String,
}

/// Classify a raw priority string.
///
/// This is the only place severity is decided; the high-priority count, the priority
/// breakdown, the urgent ranking and the per-region split all go through it.
pub fn classify_priority(raw: &str) -> SeverityClass {
    SeverityClass {
        high_severity: is_high_severity(raw),
        label: normalize_priority_label(raw),
    }
}

pub fn is_high_severity(raw: &str) -> bool {
    HIGH_SEVERITY_MARKERS.iter().any(|m| raw.contains(m))
}

/// `"2 - High"` -> `"High"`; `"Low"` -> `"Low"`.
///
/// Everything after the first hyphen is kept, so `"1 - Sev - Major"` -> `"Sev - Major"`.
/// A hyphen with nothing after it falls back to the raw string.
pub fn normalize_priority_label(raw: &str) -> String {
    match raw.split_once('-') {
        Some((_, rest)) if !rest.trim().is_empty() => rest.trim().to_string(),
        _ => raw.to_string(),
    }
}
