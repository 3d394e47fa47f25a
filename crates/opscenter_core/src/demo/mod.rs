use crate::domain::IncidentRecord;
use crate::error::AppError;
use crate::ingest::json_records::parse_incident_records;

const DEMO_INCIDENTS_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../fixtures/demo/opscenter_incidents.json"
));

/// Sanitized sample feed: ten tickets across four regions, four days and four categories.
pub fn demo_incidents() -> Result<Vec<IncidentRecord>, AppError> {
    parse_incident_records(DEMO_INCIDENTS_JSON)
}
