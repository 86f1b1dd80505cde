//! Bucket-level analyses: archive, versioning, lifecycle, temporary storage.

use bucketwise_core::{BucketScan, VersioningStatus};
use chrono::{DateTime, Months, Utc};

use crate::result::AnalysisResult;

/// Bucket name fragments that suggest archived data. Matched case-sensitively.
const ARCHIVE_INDICATORS: &[&str] = &["backup", "back-up", "archive"];

/// Bucket name fragments that suggest short-lived data. Matched case-insensitively.
const TEMPORARY_INDICATORS: &[&str] = &["temp", "log", "tmp", "test"];

/// Check if the last modification is older than `months` calendar months.
///
/// A bucket never observed with objects is not past the threshold.
pub fn is_past_inactive_threshold(
    last_modified: Option<DateTime<Utc>>,
    reference_time: DateTime<Utc>,
    months: u32,
) -> bool {
    let Some(last_modified) = last_modified else {
        return false;
    };
    reference_time
        .checked_sub_months(Months::new(months))
        .is_some_and(|threshold| last_modified < threshold)
}

/// Check if a bucket holds data that belongs in archival storage.
pub fn is_archivable(scan: &BucketScan, reference_time: DateTime<Utc>, months: u32) -> bool {
    if is_past_inactive_threshold(scan.summary.last_modified, reference_time, months) {
        return true;
    }

    let name = scan.name();
    ARCHIVE_INDICATORS.iter().any(|indicator| name.contains(indicator))
        && scan
            .config
            .storage_classes
            .iter()
            .any(|class| !class.to_lowercase().contains("glacier"))
}

/// Flag buckets that look archival but are not stored as such.
pub fn archive_analysis(
    scan: &BucketScan,
    reference_time: DateTime<Utc>,
    months: u32,
) -> Option<AnalysisResult> {
    is_archivable(scan, reference_time, months).then(|| AnalysisResult::Archivable {
        summary: scan.summary.clone(),
        storage_classes: scan.config.storage_classes.clone(),
    })
}

/// Flag versioned buckets whose first rule does not manage old versions.
pub fn versioning_analysis(scan: &BucketScan) -> Option<AnalysisResult> {
    let config = &scan.config;
    if config.versioning_status != VersioningStatus::Enabled {
        return None;
    }

    let unmanaged = config
        .first_rule()
        .is_none_or(|rule| !rule.manages_noncurrent_versions());
    unmanaged.then(|| AnalysisResult::Versioning {
        summary: scan.summary.clone(),
        versioning_status: config.versioning_status,
    })
}

/// Flag buckets with no lifecycle policy, or whose first rule is suspended.
pub fn lifecycle_analysis(scan: &BucketScan) -> Option<AnalysisResult> {
    let gap = scan
        .config
        .first_rule()
        .is_none_or(|rule| rule.status.is_suspended());
    gap.then(|| AnalysisResult::LifecycleGap {
        summary: scan.summary.clone(),
        lifecycle_rules: scan.config.lifecycle_rules.clone(),
    })
}

/// Check if a bucket name suggests temporary data.
pub fn is_temporary_storage(name: &str) -> bool {
    let name = name.to_lowercase();
    TEMPORARY_INDICATORS
        .iter()
        .any(|indicator| name.contains(indicator))
}

/// Pick the first lifecycle-gap result whose bucket looks temporary.
///
/// At most one bucket is reported.
pub fn temporary_storage_analysis(lifecycle_gaps: &[AnalysisResult]) -> Option<AnalysisResult> {
    lifecycle_gaps.iter().find_map(|result| match result {
        AnalysisResult::LifecycleGap {
            summary,
            lifecycle_rules,
        } if is_temporary_storage(&summary.name) => Some(AnalysisResult::TemporaryStorage {
            summary: summary.clone(),
            lifecycle_rules: lifecycle_rules.clone(),
        }),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketwise_core::{
        LifecycleRule, NoncurrentVersionExpiration, ResourceConfig, ResourceSummary, RuleStatus,
    };
    use chrono::TimeZone;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap()
    }

    fn scan(name: &str, last_modified: Option<DateTime<Utc>>, classes: &[&str]) -> BucketScan {
        BucketScan {
            summary: ResourceSummary {
                name: name.into(),
                object_count: 1,
                total_size: 1,
                last_modified,
            },
            config: ResourceConfig {
                storage_classes: classes.iter().map(|c| (*c).into()).collect(),
                ..ResourceConfig::default()
            },
            findings: Vec::new(),
        }
    }

    #[test]
    fn test_backup_bucket_in_standard_is_archivable() {
        let recent = Some(reference() - chrono::Duration::days(1));
        assert!(is_archivable(
            &scan("app-backup-2020", recent, &["STANDARD"]),
            reference(),
            3
        ));
        assert!(!is_archivable(
            &scan("app-data", recent, &["STANDARD"]),
            reference(),
            3
        ));
    }

    #[test]
    fn test_backup_bucket_already_in_glacier() {
        let recent = Some(reference());
        assert!(!is_archivable(
            &scan("nightly-backup", recent, &["GLACIER", "Deep_Glacier"]),
            reference(),
            3
        ));
        assert!(is_archivable(
            &scan("nightly-backup", recent, &["GLACIER", "STANDARD"]),
            reference(),
            3
        ));
    }

    #[test]
    fn test_archive_indicator_is_case_sensitive() {
        assert!(!is_archivable(
            &scan("App-BACKUP", Some(reference()), &["STANDARD"]),
            reference(),
            3
        ));
    }

    #[test]
    fn test_inactive_threshold() {
        let old = Utc.with_ymd_and_hms(2024, 3, 14, 0, 0, 0).unwrap();
        let fresh = Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap();
        assert!(is_past_inactive_threshold(Some(old), reference(), 3));
        assert!(!is_past_inactive_threshold(Some(fresh), reference(), 3));
        assert!(!is_past_inactive_threshold(None, reference(), 3));
    }

    #[test]
    fn test_versioning_analysis() {
        let mut versioned = scan("media", None, &[]);
        versioned.config.versioning_status = VersioningStatus::Enabled;
        assert!(versioning_analysis(&versioned).is_some());

        let mut rule = LifecycleRule::enabled("versions");
        rule.noncurrent_version_expiration = Some(NoncurrentVersionExpiration {
            noncurrent_days: 30,
        });
        versioned.config.lifecycle_rules = vec![rule];
        assert!(versioning_analysis(&versioned).is_none());

        let unversioned = scan("media", None, &[]);
        assert!(versioning_analysis(&unversioned).is_none());
    }

    #[test]
    fn test_lifecycle_analysis() {
        let mut bucket = scan("media", None, &[]);
        assert!(lifecycle_analysis(&bucket).is_some());

        bucket.config.lifecycle_rules = vec![LifecycleRule::enabled("r1")];
        assert!(lifecycle_analysis(&bucket).is_none());

        bucket.config.lifecycle_rules[0].status = RuleStatus::Suspended;
        assert!(lifecycle_analysis(&bucket).is_some());

        bucket.config.lifecycle_rules[0].status = RuleStatus::Disabled;
        assert!(lifecycle_analysis(&bucket).is_none());
    }

    #[test]
    fn test_disabled_rule_is_not_temporary_storage() {
        let mut bucket = scan("temp-data", None, &[]);
        let mut rule = LifecycleRule::enabled("r1");
        rule.status = RuleStatus::Disabled;
        bucket.config.lifecycle_rules = vec![rule];

        let gaps: Vec<AnalysisResult> = lifecycle_analysis(&bucket).into_iter().collect();
        assert!(gaps.is_empty());
        assert!(temporary_storage_analysis(&gaps).is_none());
    }

    #[test]
    fn test_temporary_storage_reports_first_match_only() {
        let gaps: Vec<AnalysisResult> = ["media", "App-Logs", "tmp-scratch"]
            .into_iter()
            .filter_map(|name| lifecycle_analysis(&scan(name, None, &[])))
            .collect();

        let result = temporary_storage_analysis(&gaps).unwrap();
        assert_eq!(result.name(), "App-Logs");
        assert!(matches!(result, AnalysisResult::TemporaryStorage { .. }));
    }

    #[test]
    fn test_temporary_storage_none() {
        let gaps: Vec<AnalysisResult> = ["media", "photos"]
            .into_iter()
            .filter_map(|name| lifecycle_analysis(&scan(name, None, &[])))
            .collect();
        assert!(temporary_storage_analysis(&gaps).is_none());
    }
}
