//! Scan, analyze and recommend in one run.

use std::sync::Arc;

use bucketwise_analyze::{AnalyzeConfig, Analyzer, RecommendationCatalog, recommend};
use bucketwise_core::{
    BucketSelection, EstimatedSavings, ScanConfig, ScanError, StorageProvider,
};
use bucketwise_scan::{BucketScanner, ScanProgress};
use chrono::Utc;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::info;

use crate::report::{Report, RunStatus, StorageSummary};
use crate::settings::Settings;

/// Errors that stop a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Analysis task failed: {message}")]
    Analysis { message: String },
}

/// The full scan → analyze → recommend pipeline.
pub struct Pipeline {
    scanner: BucketScanner,
    analyze: AnalyzeConfig,
    catalog: RecommendationCatalog,
}

impl Pipeline {
    /// Create a pipeline with default analysis settings and texts.
    pub fn new(provider: Arc<dyn StorageProvider>, scan: ScanConfig) -> Self {
        Self {
            scanner: BucketScanner::new(provider, scan),
            analyze: AnalyzeConfig::default(),
            catalog: RecommendationCatalog::default(),
        }
    }

    /// Create a pipeline from loaded settings.
    pub fn from_settings(provider: Arc<dyn StorageProvider>, settings: &Settings) -> Self {
        Self::new(provider, settings.scan_config())
            .with_analyze_config(settings.analyze.clone())
            .with_catalog(settings.catalog())
    }

    pub fn with_analyze_config(mut self, config: AnalyzeConfig) -> Self {
        self.analyze = config;
        self
    }

    pub fn with_catalog(mut self, catalog: RecommendationCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.scanner.subscribe()
    }

    /// Run the whole pipeline over the selected buckets.
    pub async fn run(&self, selection: &BucketSelection) -> Result<Report, PipelineError> {
        let outcome = self.scanner.scan(selection).await?;

        let analyzer = Analyzer::with_config(self.analyze.clone());
        let catalog = self.catalog.clone();
        let scans = outcome.scans;
        let (scans, analyses, recommendations) = tokio::task::spawn_blocking(move || {
            let analyses = analyzer.analyze(&scans);
            let recommendations = recommend(&analyses, &catalog);
            (scans, analyses, recommendations)
        })
        .await
        .map_err(|err| PipelineError::Analysis {
            message: err.to_string(),
        })?;

        let status = if outcome.failures.is_empty() {
            RunStatus::Complete
        } else {
            RunStatus::Partial
        };
        let total_potential_savings: EstimatedSavings = scans.iter().map(|s| s.total_savings()).sum();
        let storage_summary =
            StorageSummary::from_summaries(scans.iter().map(|s| s.summary.clone()));

        info!(
            status = %status,
            buckets = scans.len(),
            failed = outcome.failures.len(),
            savings_max = total_potential_savings.monthly_max,
            "report ready"
        );

        Ok(Report {
            status,
            generated_at: Utc::now(),
            scan_duration: outcome.scan_duration,
            storage_summary,
            buckets: scans,
            analyses,
            recommendations,
            total_potential_savings,
            failures: outcome.failures,
        })
    }

    /// Build only the storage summary, skipping analysis.
    pub async fn summarize(
        &self,
        selection: &BucketSelection,
    ) -> Result<StorageSummary, PipelineError> {
        let summaries = self.scanner.summarize(selection).await?;
        Ok(StorageSummary::from_summaries(summaries))
    }
}
