use serde::{Deserialize, Serialize};

pub const UNKNOWN_REGION: &str = "Unknown";

/// One ticket as supplied by the incident feed.
///
/// Records are never mutated after construction; aggregation borrows them read-only.
/// `opened_at` is kept as the raw feed string so unparseable values can be reported
/// against the record `number` instead of being guessed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncidentRecord {
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub short_description: String,
    pub description: String,
    pub cmdb_ci: String,
    pub category: String,
    pub assignment_group: String,
    pub priority: String,
    pub opened_at: String,
    #[serde(default)]
    pub region: Option<String>,
}

impl IncidentRecord {
    /// Region used for grouping and filtering; absent regions become `"Unknown"`.
    pub fn region_key(&self) -> &str {
        self.region.as_deref().unwrap_or(UNKNOWN_REGION)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationWarning {
    pub code: String,
    pub message: String,
    pub incident_number: Option<String>,
    pub details: Option<String>,
}

impl ValidationWarning {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            incident_number: None,
            details: None,
        }
    }

    pub fn for_incident(mut self, number: impl Into<String>) -> Self {
        self.incident_number = Some(number.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
