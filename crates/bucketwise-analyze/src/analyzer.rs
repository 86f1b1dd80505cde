//! Turning bucket scans into categorized analyses.

use bucketwise_core::{BucketScan, ObjectCategory};
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bucket::{
    archive_analysis, lifecycle_analysis, temporary_storage_analysis, versioning_analysis,
};
use crate::objects::category_analysis;
use crate::result::{Analysis, AnalysisKind, AnalysisResult};

/// Configuration for analysis.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Time that ages are measured against (default: now).
    #[builder(default = "Utc::now()")]
    #[serde(skip, default = "Utc::now")]
    pub reference_time: DateTime<Utc>,

    /// Calendar months without writes before a bucket counts as inactive.
    #[builder(default = "3")]
    pub inactive_months: u32,
}

impl AnalyzeConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(0) = self.inactive_months {
            return Err("Inactive months must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            reference_time: Utc::now(),
            inactive_months: 3,
        }
    }
}

impl AnalyzeConfig {
    /// Create a new config builder.
    pub fn builder() -> AnalyzeConfigBuilder {
        AnalyzeConfigBuilder::default()
    }
}

/// Results for a single bucket before they are merged into analyses.
#[derive(Debug, Default)]
struct BucketResults {
    archive: Option<AnalysisResult>,
    versioning: Option<AnalysisResult>,
    lifecycle: Option<AnalysisResult>,
    compressed: Option<AnalysisResult>,
    duplicates: Option<AnalysisResult>,
    incomplete: Option<AnalysisResult>,
}

/// Analyzer producing the seven fixed analyses.
#[derive(Debug, Default)]
pub struct Analyzer {
    config: AnalyzeConfig,
}

impl Analyzer {
    /// Create an analyzer with default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom config.
    pub fn with_config(config: AnalyzeConfig) -> Self {
        Self { config }
    }

    /// Analyze scanned buckets.
    ///
    /// Buckets are analyzed in parallel; results keep input bucket order.
    /// Temporary storage is decided afterwards from the lifecycle results.
    pub fn analyze(&self, scans: &[BucketScan]) -> Vec<Analysis> {
        let per_bucket: Vec<BucketResults> =
            scans.par_iter().map(|scan| self.analyze_bucket(scan)).collect();

        let mut archive = Analysis::new(AnalysisKind::ArchiveStorage);
        let mut versioning = Analysis::new(AnalysisKind::BucketVersioning);
        let mut lifecycle = Analysis::new(AnalysisKind::LifecycleManagement);
        let mut temporary = Analysis::new(AnalysisKind::TemporaryStorage);
        let mut compressed = Analysis::new(AnalysisKind::CompressedData);
        let mut duplicates = Analysis::new(AnalysisKind::DuplicateData);
        let mut incomplete = Analysis::new(AnalysisKind::IncompleteData);

        for results in per_bucket {
            archive.push_opt(results.archive);
            versioning.push_opt(results.versioning);
            lifecycle.push_opt(results.lifecycle);
            compressed.push_opt(results.compressed);
            duplicates.push_opt(results.duplicates);
            incomplete.push_opt(results.incomplete);
        }

        temporary.push_opt(temporary_storage_analysis(&lifecycle.results));

        let analyses = vec![
            archive, versioning, lifecycle, temporary, compressed, duplicates, incomplete,
        ];
        for analysis in &analyses {
            debug!(analysis = %analysis.kind, flagged = analysis.results.len(), "analysis complete");
        }
        analyses
    }

    fn analyze_bucket(&self, scan: &BucketScan) -> BucketResults {
        let mut results = BucketResults {
            archive: archive_analysis(
                scan,
                self.config.reference_time,
                self.config.inactive_months,
            ),
            versioning: versioning_analysis(scan),
            lifecycle: lifecycle_analysis(scan),
            ..BucketResults::default()
        };

        for finding in &scan.findings {
            let result = category_analysis(scan, finding);
            match finding.category {
                ObjectCategory::IncompleteMultipartUpload => results.incomplete = result,
                ObjectCategory::DuplicateObjects => results.duplicates = result,
                ObjectCategory::CompressibleObjects => results.compressed = result,
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = AnalyzeConfig::builder()
            .inactive_months(6u32)
            .build()
            .unwrap();
        assert_eq!(config.inactive_months, 6);
        assert!(AnalyzeConfig::builder().inactive_months(0u32).build().is_err());
    }

    #[test]
    fn test_no_scans_yields_seven_empty_analyses() {
        let analyses = Analyzer::new().analyze(&[]);
        assert_eq!(analyses.len(), 7);
        assert!(analyses.iter().all(Analysis::is_empty));
        let kinds: Vec<AnalysisKind> = analyses.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, AnalysisKind::all().collect::<Vec<_>>());
    }
}
