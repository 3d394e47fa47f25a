use serde::{Deserialize, Serialize};

use crate::domain::IncidentRecord;

pub const ALL_REGIONS: &str = "All";

/// The single narrowing criterion applied before aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionFilter {
    All,
    Region(String),
}

impl RegionFilter {
    /// `"All"` is the sentinel; anything else is an exact region match.
    pub fn parse(raw: &str) -> Self {
        if raw == ALL_REGIONS {
            RegionFilter::All
        } else {
            RegionFilter::Region(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RegionFilter::All => ALL_REGIONS,
            RegionFilter::Region(r) => r,
        }
    }

    pub fn matches(&self, record: &IncidentRecord) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Region(r) => record.region_key() == r,
        }
    }
}

impl From<&str> for RegionFilter {
    fn from(raw: &str) -> Self {
        RegionFilter::parse(raw)
    }
}

/// Records matching `filter`, in input order. Records are borrowed, never copied.
pub fn filter_by_region<'a>(
    records: &'a [IncidentRecord],
    filter: &RegionFilter,
) -> Vec<&'a IncidentRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Selector options derived from the unfiltered record set: `"All"` first, then each
/// distinct region (absent -> `"Unknown"`) in first-seen order.
///
/// A record whose region is literally `"All"` is folded into the sentinel: it is not listed
/// twice and is only reachable through the whole-set view. `validate_records` reports it as
/// `DATA_REGION_RESERVED`.
pub fn available_regions(records: &[IncidentRecord]) -> Vec<String> {
    let mut out = vec![ALL_REGIONS.to_string()];
    for rec in records {
        let region = rec.region_key();
        if !out.iter().any(|r| r == region) {
            out.push(region.to_string());
        }
    }
    out
}
