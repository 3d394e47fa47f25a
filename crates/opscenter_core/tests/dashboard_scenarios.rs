use pretty_assertions::assert_eq;

use opscenter_core::analytics::{aggregate, MetricsSnapshot, RegionEscalation};
use opscenter_core::demo::demo_incidents;
use opscenter_core::domain::IncidentRecord;
use opscenter_core::filter::available_regions;
use opscenter_core::severity::{classify_priority, normalize_priority_label};

fn demo() -> Vec<IncidentRecord> {
    demo_incidents().expect("demo dataset")
}

fn escalation(region: &str, critical: i64, standard: i64) -> RegionEscalation {
    RegionEscalation {
        region: region.to_string(),
        critical,
        standard,
    }
}

fn numbers(records: &[IncidentRecord]) -> Vec<&str> {
    records.iter().map(|r| r.number.as_str()).collect()
}

fn labelled_counts(snap: &MetricsSnapshot) -> (Vec<(&str, i64)>, Vec<(&str, i64)>) {
    (
        snap.category_breakdown
            .iter()
            .map(|b| (b.label.as_str(), b.count))
            .collect(),
        snap.priority_breakdown
            .iter()
            .map(|b| (b.label.as_str(), b.count))
            .collect(),
    )
}

fn assert_partitions_reconcile(snap: &MetricsSnapshot) {
    let category_sum: i64 = snap.category_breakdown.iter().map(|b| b.count).sum();
    let priority_sum: i64 = snap.priority_breakdown.iter().map(|b| b.count).sum();
    let region_sum: i64 = snap
        .region_escalation
        .iter()
        .map(|r| r.critical + r.standard)
        .sum();
    let timeline_sum: i64 = snap.timeline.iter().map(|p| p.count).sum();
    assert_eq!(category_sum, snap.total, "category breakdown must sum to total");
    assert_eq!(priority_sum, snap.total, "priority breakdown must sum to total");
    assert_eq!(region_sum, snap.total, "region escalation must sum to total");
    assert_eq!(timeline_sum, snap.total, "timeline must sum to total");
}

#[test]
fn all_regions_snapshot_matches_demo_feed() {
    let snap = aggregate(&demo(), "All").expect("aggregate");

    assert_eq!(snap.version, 1);
    assert_eq!(snap.region_filter, "All");
    assert_eq!(snap.region_label, None);
    assert_eq!(snap.total, 10);
    assert_eq!(snap.high_priority_count, 3);
    assert_eq!(snap.network_issue_count, 7);

    let (categories, priorities) = labelled_counts(&snap);
    assert_eq!(
        categories,
        vec![
            ("Desktop/Laptop", 1),
            ("Network", 7),
            ("Software", 1),
            ("Hardware", 1)
        ]
    );
    assert_eq!(
        priorities,
        vec![("Low", 6), ("High", 2), ("Critical", 1), ("Moderate", 1)]
    );

    let timeline: Vec<(&str, &str, i64)> = snap
        .timeline
        .iter()
        .map(|p| (p.day.as_str(), p.label.as_str(), p.count))
        .collect();
    assert_eq!(
        timeline,
        vec![
            ("2025-09-05", "09-05", 6),
            ("2025-09-06", "09-06", 1),
            ("2025-09-07", "09-07", 1),
            ("2025-09-08", "09-08", 2),
        ]
    );

    assert_eq!(
        snap.region_escalation,
        vec![
            escalation("North America", 1, 3),
            escalation("EMEA", 1, 2),
            escalation("APAC", 1, 1),
            escalation("LATAM", 0, 1),
        ]
    );

    assert_eq!(
        numbers(&snap.urgent_incidents),
        vec!["INC04895006", "INC04895001", "INC04895000"]
    );
    assert_eq!(
        numbers(&snap.recent_incidents),
        vec![
            "INC04894751",
            "INC04895000",
            "INC04895001",
            "INC04895002",
            "INC04895003"
        ]
    );
    assert!(snap.warnings.is_empty());
    assert_partitions_reconcile(&snap);
}

#[test]
fn emea_filter_narrows_every_view() {
    let snap = aggregate(&demo(), "EMEA").expect("aggregate");

    assert_eq!(snap.region_label.as_deref(), Some("EMEA"));
    assert_eq!(snap.total, 3);
    assert_eq!(snap.high_priority_count, 1);
    assert_eq!(snap.network_issue_count, 3);
    assert_eq!(numbers(&snap.urgent_incidents), vec!["INC04895001"]);
    assert_eq!(snap.region_escalation, vec![escalation("EMEA", 1, 2)]);

    let (categories, priorities) = labelled_counts(&snap);
    assert_eq!(categories, vec![("Network", 3)]);
    assert_eq!(priorities, vec![("High", 1), ("Low", 2)]);
    assert_partitions_reconcile(&snap);
}

#[test]
fn region_absent_from_data_yields_empty_snapshot() {
    let snap = aggregate(&demo(), "Mars").expect("no error for unknown region");

    assert_eq!(snap.total, 0);
    assert_eq!(snap.high_priority_count, 0);
    assert_eq!(snap.network_issue_count, 0);
    assert!(snap.category_breakdown.is_empty());
    assert!(snap.priority_breakdown.is_empty());
    assert!(snap.timeline.is_empty());
    assert!(snap.region_escalation.is_empty());
    assert!(snap.urgent_incidents.is_empty());
    assert!(snap.recent_incidents.is_empty());
    assert_eq!(snap.region_label.as_deref(), Some("Mars"));
}

#[test]
fn priority_labels_normalize() {
    assert_eq!(normalize_priority_label("2 - High"), "High");
    assert_eq!(normalize_priority_label("Low"), "Low");
    assert!(classify_priority("2 - High").high_severity);
    assert!(!classify_priority("Low").high_severity);
}

#[test]
fn aggregation_is_repeatable() {
    let records = demo();
    let a = aggregate(&records, "All").expect("first");
    let b = aggregate(&records, "All").expect("second");
    assert_eq!(a, b);
}

#[test]
fn every_available_region_narrows_to_one_escalation_entry() {
    let records = demo();
    let regions = available_regions(&records);
    assert_eq!(
        regions,
        vec!["All", "North America", "EMEA", "APAC", "LATAM"]
    );

    for region in regions.iter().skip(1) {
        let snap = aggregate(&records, region).expect("aggregate");
        assert_eq!(snap.region_escalation.len(), 1, "region={region}");
        assert_eq!(&snap.region_escalation[0].region, region);
        assert_partitions_reconcile(&snap);
    }
}

#[test]
fn unknown_region_is_selectable_and_groups_records_without_region() {
    let mut records = demo();
    records[7].region = None;
    records[9].region = None;

    let regions = available_regions(&records);
    assert!(regions.contains(&"Unknown".to_string()));

    let snap = aggregate(&records, "Unknown").expect("aggregate");
    assert_eq!(snap.total, 2);
    assert_eq!(snap.region_escalation, vec![escalation("Unknown", 1, 1)]);
}

#[test]
fn region_named_all_folds_into_the_sentinel() {
    let mut records = demo();
    records[9].region = Some("All".to_string());

    let regions = available_regions(&records);
    assert_eq!(regions, vec!["All", "North America", "EMEA", "APAC"]);

    let snap = aggregate(&records, "All").expect("aggregate");
    assert_eq!(snap.total, 10);
    assert_eq!(snap.region_label, None);
}

#[test]
fn severity_counts_agree_across_views() {
    let records = demo();
    for region in available_regions(&records) {
        let snap = aggregate(&records, &region).expect("aggregate");
        let high_labels: i64 = snap
            .priority_breakdown
            .iter()
            .filter(|b| classify_priority(&b.label).high_severity)
            .map(|b| b.count)
            .sum();
        let critical: i64 = snap.region_escalation.iter().map(|r| r.critical).sum();
        assert_eq!(snap.high_priority_count, high_labels, "region={region}");
        assert_eq!(
            snap.high_priority_count,
            snap.urgent_incidents.len() as i64,
            "region={region}"
        );
        assert_eq!(snap.high_priority_count, critical, "region={region}");
    }
}

#[test]
fn timeline_is_ascending_and_urgent_is_newest_first() {
    let mut records = demo();
    // Shuffle input order; derived ordering must not depend on it.
    records.reverse();
    let snap = aggregate(&records, "All").expect("aggregate");

    assert!(snap.timeline.windows(2).all(|w| w[0].day < w[1].day));
    assert_eq!(
        numbers(&snap.urgent_incidents),
        vec!["INC04895006", "INC04895001", "INC04895000"]
    );
}

#[test]
fn urgent_ties_keep_filtered_input_order() {
    let mut records = demo();
    for rec in records.iter_mut() {
        rec.opened_at = "2025-09-05 10:00:00".to_string();
    }
    let snap = aggregate(&records, "All").expect("aggregate");
    assert_eq!(
        numbers(&snap.urgent_incidents),
        vec!["INC04895000", "INC04895001", "INC04895006"]
    );
}
