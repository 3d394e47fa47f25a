use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::config::{DashboardConfig, TimestampPolicy};
use crate::domain::{IncidentRecord, ValidationWarning};
use crate::error::AppError;
use crate::filter::{filter_by_region, RegionFilter};
use crate::normalize::timestamps::{day_key, day_label, parse_opened_at};
use crate::severity::classify_priority;

pub const SNAPSHOT_VERSION: u32 = 1;
pub const NETWORK_CATEGORY: &str = "Network";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountBucket {
    pub key: String,
    pub label: String,
    pub count: i64,
    pub incident_numbers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelinePoint {
    /// `YYYY-MM-DD`
    pub day: String,
    /// `MM-DD`, for chart axes.
    pub label: String,
    pub count: i64,
    pub incident_numbers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionEscalation {
    pub region: String,
    pub critical: i64,
    pub standard: i64,
}

/// Every derived view for one (record set, region filter) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub version: u32,
    pub region_filter: String,
    /// Badge shown next to stat cards; `None` when the filter is `"All"`.
    pub region_label: Option<String>,
    pub total: i64,
    pub high_priority_count: i64,
    pub network_issue_count: i64,
    pub category_breakdown: Vec<CountBucket>,
    pub priority_breakdown: Vec<CountBucket>,
    pub timeline: Vec<TimelinePoint>,
    pub region_escalation: Vec<RegionEscalation>,
    pub urgent_incidents: Vec<IncidentRecord>,
    pub recent_incidents: Vec<IncidentRecord>,
    pub warnings: Vec<ValidationWarning>,
}

/// Grouping that remembers the order keys were first seen in.
struct FirstSeenBuckets<T> {
    index: BTreeMap<String, usize>,
    buckets: Vec<(String, T)>,
}

impl<T: Default> FirstSeenBuckets<T> {
    fn new() -> Self {
        Self {
            index: BTreeMap::new(),
            buckets: Vec::new(),
        }
    }

    fn entry(&mut self, key: &str) -> &mut T {
        let idx = match self.index.get(key) {
            Some(&i) => i,
            None => {
                let i = self.buckets.len();
                self.index.insert(key.to_string(), i);
                self.buckets.push((key.to_string(), T::default()));
                i
            }
        };
        &mut self.buckets[idx].1
    }

    fn into_inner(self) -> Vec<(String, T)> {
        self.buckets
    }
}

impl FirstSeenBuckets<Vec<String>> {
    fn push(&mut self, key: &str, number: &str) {
        self.entry(key).push(number.to_string());
    }

    fn into_count_buckets(self, key_prefix: &str) -> Vec<CountBucket> {
        self.into_inner()
            .into_iter()
            .map(|(label, numbers)| CountBucket {
                key: format!("{key_prefix}:{label}"),
                count: numbers.len() as i64,
                label,
                incident_numbers: numbers,
            })
            .collect()
    }
}

fn unparseable_opened_at(record: &IncidentRecord) -> ValidationWarning {
    ValidationWarning::new(
        "DATA_TS_UNPARSEABLE",
        format!("Unparseable opened_at for {}", record.number),
    )
    .for_incident(record.number.clone())
    .with_details(format!("value={}", record.opened_at))
}

/// Aggregate with the default config. `region_filter` is `"All"` or an exact region.
pub fn aggregate(
    records: &[IncidentRecord],
    region_filter: &str,
) -> Result<MetricsSnapshot, AppError> {
    aggregate_with_config(
        records,
        &RegionFilter::parse(region_filter),
        &DashboardConfig::default(),
    )
}

/// Filter `records` by region, then derive every dashboard view in one pass.
///
/// Pure: the same inputs always produce the same snapshot. Breakdown order is first-seen,
/// the timeline is ascending by day, and urgent incidents are newest first with ties kept
/// in input order.
///
/// Records with an unparseable `opened_at` are handled per `config.timestamp_policy`.
pub fn aggregate_with_config(
    records: &[IncidentRecord],
    filter: &RegionFilter,
    config: &DashboardConfig,
) -> Result<MetricsSnapshot, AppError> {
    let filtered = filter_by_region(records, filter);

    let mut high_priority_count = 0i64;
    let mut network_issue_count = 0i64;
    let mut categories = FirstSeenBuckets::<Vec<String>>::new();
    let mut priorities = FirstSeenBuckets::<Vec<String>>::new();
    let mut timeline_map: BTreeMap<String, (String, Vec<String>)> = BTreeMap::new();
    // (critical, standard) per region
    let mut regions = FirstSeenBuckets::<(i64, i64)>::new();
    let mut urgent: Vec<(OffsetDateTime, &IncidentRecord)> = Vec::new();
    let mut warnings = Vec::new();

    for rec in &filtered {
        let severity = classify_priority(&rec.priority);

        if severity.high_severity {
            high_priority_count += 1;
        }
        if rec.category == NETWORK_CATEGORY {
            network_issue_count += 1;
        }

        categories.push(&rec.category, &rec.number);
        priorities.push(&severity.label, &rec.number);

        let split = regions.entry(rec.region_key());
        if severity.high_severity {
            split.0 += 1;
        } else {
            split.1 += 1;
        }

        let Some(opened_at) = parse_opened_at(&rec.opened_at) else {
            let warning = unparseable_opened_at(rec);
            match config.timestamp_policy {
                TimestampPolicy::Fail => {
                    return Err(AppError::new(warning.code, warning.message)
                        .with_details(format!(
                            "number={}; value={}",
                            rec.number, rec.opened_at
                        )));
                }
                TimestampPolicy::Exclude => {
                    warn!(
                        number = %rec.number,
                        opened_at = %rec.opened_at,
                        "excluding record with unparseable opened_at from time views"
                    );
                    warnings.push(warning);
                    continue;
                }
            }
        };

        timeline_map
            .entry(day_key(opened_at))
            .or_insert_with(|| (day_label(opened_at), Vec::new()))
            .1
            .push(rec.number.clone());

        if severity.high_severity {
            urgent.push((opened_at, rec));
        }
    }

    // Stable sort: equal timestamps keep their filtered-input order.
    urgent.sort_by(|a, b| b.0.cmp(&a.0));

    let timeline = timeline_map
        .into_iter()
        .map(|(day, (label, numbers))| TimelinePoint {
            day,
            label,
            count: numbers.len() as i64,
            incident_numbers: numbers,
        })
        .collect::<Vec<_>>();

    let region_escalation = regions
        .into_inner()
        .into_iter()
        .map(|(region, (critical, standard))| RegionEscalation {
            region,
            critical,
            standard,
        })
        .collect::<Vec<_>>();

    let recent_incidents = filtered
        .iter()
        .take(config.recent_incident_limit)
        .map(|r| (*r).clone())
        .collect::<Vec<_>>();

    let region_label = match filter {
        RegionFilter::All => None,
        RegionFilter::Region(r) => Some(r.clone()),
    };

    debug!(
        region_filter = filter.as_str(),
        total = filtered.len(),
        high_priority = high_priority_count,
        excluded = warnings.len(),
        "aggregated metrics snapshot"
    );

    Ok(MetricsSnapshot {
        version: SNAPSHOT_VERSION,
        region_filter: filter.as_str().to_string(),
        region_label,
        total: filtered.len() as i64,
        high_priority_count,
        network_issue_count,
        category_breakdown: categories.into_count_buckets("category"),
        priority_breakdown: priorities.into_count_buckets("priority"),
        timeline,
        region_escalation,
        urgent_incidents: urgent.into_iter().map(|(_, r)| r.clone()).collect(),
        recent_incidents,
        warnings,
    })
}
