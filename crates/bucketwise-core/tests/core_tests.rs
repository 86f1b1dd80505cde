use bucketwise_core::{
    BucketScan, CostEstimator, EstimatedSavings, LifecycleRule, ObjectCategory,
    ObjectCategoryFinding, PriceTable, ResourceConfig, ResourceSummary, RuleStatus, ScanOutcome,
    VersioningStatus,
};
use chrono::Utc;

fn scan_with_findings(name: &str, size: u64, savings: &[f64]) -> BucketScan {
    let categories = [
        ObjectCategory::IncompleteMultipartUpload,
        ObjectCategory::DuplicateObjects,
        ObjectCategory::CompressibleObjects,
    ];
    BucketScan {
        summary: ResourceSummary {
            name: name.into(),
            object_count: 2,
            total_size: size,
            last_modified: Some(Utc::now()),
        },
        config: ResourceConfig::default(),
        findings: categories
            .iter()
            .zip(savings)
            .map(|(category, amount)| ObjectCategoryFinding {
                category: *category,
                object_count: 1,
                total_size: 1,
                estimated_savings: EstimatedSavings::exact(*amount),
            })
            .collect(),
    }
}

#[test]
fn test_bucket_scan_total_savings() {
    let scan = scan_with_findings("data", 10, &[0.5, 0.25, 1.0]);
    assert_eq!(scan.total_savings().monthly_max, 1.75);
    assert!(scan.finding(ObjectCategory::DuplicateObjects).is_some());
}

#[test]
fn test_scan_outcome_totals() {
    let outcome = ScanOutcome {
        scans: vec![
            scan_with_findings("a", 100, &[]),
            scan_with_findings("b", 50, &[]),
        ],
        failures: Vec::new(),
        scanned_at: Utc::now(),
        scan_duration: std::time::Duration::from_millis(5),
    };

    assert!(outcome.is_complete());
    assert_eq!(outcome.total_objects(), 4);
    assert_eq!(outcome.total_size(), 150);
}

#[test]
fn test_lifecycle_rule_from_json() {
    let json = r#"{
        "id": "expire-old",
        "status": "Disabled",
        "noncurrent_version_transitions": [
            {"noncurrent_days": 30, "storage_class": "GLACIER"}
        ],
        "abort_incomplete_multipart_upload": {"days_after_initiation": 7}
    }"#;
    let rule: LifecycleRule = serde_json::from_str(json).unwrap();

    assert_eq!(rule.status, RuleStatus::Disabled);
    assert!(rule.manages_noncurrent_versions());
    assert!(rule.aborts_incomplete_uploads());
    assert!(rule.expiration.is_none());
}

#[test]
fn test_resource_config_defaults() {
    let config: ResourceConfig =
        serde_json::from_str(r#"{"lifecycle_rules":[],"versioning_status":"Enabled","storage_classes":["STANDARD","GLACIER"]}"#)
            .unwrap();
    assert!(config.has_no_rules());
    assert!(config.first_rule().is_none());
    assert_eq!(config.versioning_status, VersioningStatus::Enabled);
    assert_eq!(config.storage_classes.len(), 2);
}

#[test]
fn test_estimator_with_custom_prices() {
    let estimator = CostEstimator::new(PriceTable::empty().with_price("HOT", 1.0));
    assert_eq!(estimator.current_monthly_cost(1 << 30, "HOT").unwrap(), 1.0);
    assert!(estimator.current_monthly_cost(1 << 30, "STANDARD").is_err());
}
