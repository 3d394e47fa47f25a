use std::collections::BTreeMap;

use crate::domain::{IncidentRecord, ValidationWarning};
use crate::filter::ALL_REGIONS;
use crate::normalize::timestamps::parse_opened_at;

/// Data-quality checks over a whole record set. Warnings only; nothing is rejected.
///
/// - `DATA_DUPLICATE_NUMBER`: a `number` seen more than once (reported on each repeat)
/// - `DATA_FIELD_EMPTY`: blank `number`, `category` or `priority`
/// - `DATA_TS_UNPARSEABLE`: `opened_at` outside the accepted formats
/// - `DATA_REGION_RESERVED`: region equal to the `"All"` selector sentinel, which can
///   never be selected on its own
pub fn validate_records(records: &[IncidentRecord]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();

    for (idx, rec) in records.iter().enumerate() {
        for (field, value) in [
            ("number", rec.number.as_str()),
            ("category", rec.category.as_str()),
            ("priority", rec.priority.as_str()),
        ] {
            if value.trim().is_empty() {
                warnings.push(
                    ValidationWarning::new("DATA_FIELD_EMPTY", format!("Empty {field}"))
                        .for_incident(rec.number.clone())
                        .with_details(format!("index={idx}")),
                );
            }
        }

        if let Some(first) = seen.get(rec.number.as_str()) {
            warnings.push(
                ValidationWarning::new(
                    "DATA_DUPLICATE_NUMBER",
                    format!("Duplicate incident number {}", rec.number),
                )
                .for_incident(rec.number.clone())
                .with_details(format!("first_index={first}; index={idx}")),
            );
        } else {
            seen.insert(rec.number.as_str(), idx);
        }

        if rec.region.as_deref() == Some(ALL_REGIONS) {
            warnings.push(
                ValidationWarning::new(
                    "DATA_REGION_RESERVED",
                    format!(
                        "Region of {} collides with the \"{ALL_REGIONS}\" selector",
                        rec.number
                    ),
                )
                .for_incident(rec.number.clone())
                .with_details(format!("index={idx}")),
            );
        }

        if parse_opened_at(&rec.opened_at).is_none() {
            warnings.push(
                ValidationWarning::new(
                    "DATA_TS_UNPARSEABLE",
                    format!("Unparseable opened_at for {}", rec.number),
                )
                .for_incident(rec.number.clone())
                .with_details(format!("value={}", rec.opened_at)),
            );
        }
    }

    warnings
}
