use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// What to do with a record whose `opened_at` cannot be parsed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPolicy {
    /// Keep the record in time-independent views, leave it out of the timeline and the
    /// urgent ranking, and attach a warning naming the record.
    #[default]
    Exclude,
    /// Fail the whole aggregation call.
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct DashboardConfig {
    pub timestamp_policy: TimestampPolicy,
    pub recent_incident_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            timestamp_policy: TimestampPolicy::Exclude,
            recent_incident_limit: 5,
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON config object. Missing keys take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, AppError> {
        serde_json::from_str(text).map_err(|e| {
            AppError::new("CONFIG_PARSE_FAILED", "Failed to parse dashboard config")
                .with_details(e.to_string())
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|e| {
            AppError::new("CONFIG_READ_FAILED", "Failed to read dashboard config")
                .with_details(format!("path={}; err={e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }
}
