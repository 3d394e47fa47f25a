use serde::{Deserialize, Serialize};

use crate::domain::{IncidentRecord, ValidationWarning};
use crate::error::AppError;
use crate::filter::available_regions;
use crate::validate::validate_records;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordSetSummary {
    pub record_count: usize,
    pub regions: Vec<String>,
    pub warnings: Vec<ValidationWarning>,
}

/// Parse a JSON array of incident records.
///
/// Unknown keys are ignored so feeds can carry extra columns; a missing required field or
/// malformed JSON fails the whole parse with `DATA_JSON_PARSE_FAILED`.
pub fn parse_incident_records(json_text: &str) -> Result<Vec<IncidentRecord>, AppError> {
    serde_json::from_str::<Vec<IncidentRecord>>(json_text).map_err(|e| {
        AppError::new("DATA_JSON_PARSE_FAILED", "Failed to parse incident records")
            .with_details(format!("line={}; column={}; err={e}", e.line(), e.column()))
    })
}

/// Parse and summarize a record set without aggregating it: count, selector regions and
/// data-quality warnings.
pub fn preview_incident_records(json_text: &str) -> Result<RecordSetSummary, AppError> {
    let records = parse_incident_records(json_text)?;
    Ok(RecordSetSummary {
        record_count: records.len(),
        regions: available_regions(&records),
        warnings: validate_records(&records),
    })
}
