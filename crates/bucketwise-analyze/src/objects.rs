//! Object-level analyses over category findings.

use bucketwise_core::{BucketScan, ObjectCategory, ObjectCategoryFinding};

use crate::result::AnalysisResult;

/// Turn a category finding into a result when it flags anything.
///
/// Incomplete uploads are only reported when the first lifecycle rule, if
/// any, does not already abort them.
pub fn category_analysis(
    scan: &BucketScan,
    finding: &ObjectCategoryFinding,
) -> Option<AnalysisResult> {
    if !finding.has_findings() {
        return None;
    }

    if finding.category == ObjectCategory::IncompleteMultipartUpload
        && scan
            .config
            .first_rule()
            .is_some_and(|rule| rule.aborts_incomplete_uploads())
    {
        return None;
    }

    Some(AnalysisResult::CategoryFinding {
        summary: scan.summary.clone(),
        finding: finding.clone(),
    })
}
