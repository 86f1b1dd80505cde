//! Per-bucket content summaries.

use bucketwise_core::{ObjectInfo, ResourceSummary};

/// Summarize one bucket's listing.
///
/// An empty listing yields zero counts and no modification time.
pub fn build_summary(bucket: &str, objects: &[ObjectInfo]) -> ResourceSummary {
    if objects.is_empty() {
        return ResourceSummary::empty(bucket);
    }

    let mut summary = ResourceSummary::empty(bucket);
    for object in objects {
        summary.object_count += 1;
        summary.total_size += object.size;

        if summary
            .last_modified
            .is_none_or(|latest| object.last_modified > latest)
        {
            summary.last_modified = Some(object.last_modified);
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_empty_listing() {
        let summary = build_summary("empty", &[]);
        assert_eq!(summary.name, "empty");
        assert_eq!(summary.object_count, 0);
        assert_eq!(summary.total_size, 0);
        assert!(summary.last_modified.is_none());
    }

    #[test]
    fn test_sizes_and_latest_time() {
        let now = Utc::now();
        let objects = vec![
            ObjectInfo::new("a", 10, now - Duration::days(3), "STANDARD", "1"),
            ObjectInfo::new("b", 20, now, "STANDARD", "2"),
            ObjectInfo::new("c", 30, now - Duration::days(1), "GLACIER", "3"),
        ];

        let summary = build_summary("data", &objects);
        assert_eq!(summary.object_count, 3);
        assert_eq!(summary.total_size, 60);
        assert_eq!(summary.last_modified, Some(now));
    }

    #[test]
    fn test_total_is_sum_regardless_of_order() {
        let now = Utc::now();
        let mut objects: Vec<ObjectInfo> = (0..50u64)
            .map(|i| ObjectInfo::new(format!("k{i}"), i * 7, now, "STANDARD", "x"))
            .collect();
        let expected: u64 = objects.iter().map(|o| o.size).sum();

        assert_eq!(build_summary("b", &objects).total_size, expected);
        objects.reverse();
        assert_eq!(build_summary("b", &objects).total_size, expected);
    }
}
