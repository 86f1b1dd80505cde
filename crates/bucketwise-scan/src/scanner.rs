//! Concurrent bucket scanner.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bucketwise_core::{
    BucketFailure, BucketScan, BucketSelection, CostEstimator, ResourceConfig, ResourceSummary,
    ScanConfig, ScanError, ScanOutcome, StorageProvider,
};
use chrono::Utc;
use compact_str::CompactString;
use tokio::sync::{Semaphore, broadcast};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::bucket::scan_bucket_config;
use crate::objects::scan_object_categories;
use crate::progress::{ProgressTracker, ScanProgress};
use crate::retry::RetryPolicy;
use crate::summary::build_summary;

/// How much of each bucket to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanDepth {
    /// Listing summary only.
    Summary,
    /// Summary, configuration and object categories.
    Full,
}

/// Scans buckets concurrently against a storage provider.
///
/// Each bucket is an independent task; at most `workers` run at once so the
/// provider sees a bounded number of outbound calls.
pub struct BucketScanner {
    provider: Arc<dyn StorageProvider>,
    config: ScanConfig,
    estimator: CostEstimator,
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl BucketScanner {
    /// Create a new scanner.
    pub fn new(provider: Arc<dyn StorageProvider>, config: ScanConfig) -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        let estimator = CostEstimator::new(config.prices.clone());
        Self {
            provider,
            config,
            estimator,
            progress_tx,
        }
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// The configuration in use.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Fully scan the selected buckets.
    pub async fn scan(&self, selection: &BucketSelection) -> Result<ScanOutcome, ScanError> {
        self.run(selection, ScanDepth::Full).await
    }

    /// Build content summaries only, skipping configuration and categories.
    pub async fn summarize(
        &self,
        selection: &BucketSelection,
    ) -> Result<Vec<ResourceSummary>, ScanError> {
        let outcome = self.run(selection, ScanDepth::Summary).await?;
        Ok(outcome.scans.into_iter().map(|s| s.summary).collect())
    }

    /// Fully scan a single bucket, honoring the per-bucket timeout.
    pub async fn scan_bucket(&self, bucket: &str) -> Result<BucketScan, ScanError> {
        self.task(ScanDepth::Full).run(bucket).await
    }

    async fn run(
        &self,
        selection: &BucketSelection,
        depth: ScanDepth,
    ) -> Result<ScanOutcome, ScanError> {
        let work = self.run_all(selection, depth);
        match self.config.run_deadline() {
            Some(deadline) => tokio::time::timeout(deadline, work)
                .await
                .map_err(|_| ScanError::DeadlineExceeded { deadline })?,
            None => work.await,
        }
    }

    async fn run_all(
        &self,
        selection: &BucketSelection,
        depth: ScanDepth,
    ) -> Result<ScanOutcome, ScanError> {
        let scanned_at = Utc::now();
        let start = Instant::now();
        let retry = RetryPolicy::from_config(&self.config);

        let names = retry
            .run("list_buckets", BucketSelection::ALL_SENTINEL, || {
                selection.resolve(self.provider.as_ref())
            })
            .await?;
        info!(buckets = names.len(), workers = self.config.effective_workers(), "starting scan");

        let semaphore = Arc::new(Semaphore::new(self.config.effective_workers()));
        let mut tasks = JoinSet::new();
        for (index, name) in names.iter().cloned().enumerate() {
            let task = self.task(depth);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => task.run(&name).await,
                    Err(err) => Err(ScanError::TaskFailed {
                        message: err.to_string(),
                    }),
                };
                (index, name, result)
            });
        }

        let mut slots: Vec<Option<BucketScan>> = vec![None; names.len()];
        let mut failures: Vec<(usize, BucketFailure)> = Vec::new();
        let mut tracker = ProgressTracker::new(names.len());

        while let Some(joined) = tasks.join_next().await {
            let (index, name, result) = match joined {
                Ok(done) => done,
                Err(err) => {
                    tasks.abort_all();
                    return Err(ScanError::TaskFailed {
                        message: err.to_string(),
                    });
                }
            };

            match result {
                Ok(scan) => {
                    tracker.record_scan(&scan);
                    slots[index] = Some(scan);
                }
                Err(err) if self.config.fail_fast => {
                    warn!(bucket = %name, error = %err, "bucket scan failed, aborting run");
                    tasks.abort_all();
                    return Err(err);
                }
                // A pricing gap is a configuration defect, never a bucket failure.
                Err(err @ ScanError::Estimate(_)) => {
                    warn!(bucket = %name, error = %err, "cost estimate failed, aborting run");
                    tasks.abort_all();
                    return Err(err);
                }
                Err(err) => {
                    warn!(bucket = %name, error = %err, "bucket scan failed, continuing");
                    tracker.record_error(&name);
                    failures.push((
                        index,
                        BucketFailure {
                            bucket: name,
                            message: err.to_string(),
                        },
                    ));
                }
            }
            let _ = self.progress_tx.send(tracker.snapshot());
        }

        failures.sort_by_key(|(index, _)| *index);
        let outcome = ScanOutcome {
            scans: slots.into_iter().flatten().collect(),
            failures: failures.into_iter().map(|(_, f)| f).collect(),
            scanned_at,
            scan_duration: start.elapsed(),
        };
        info!(
            scanned = outcome.scans.len(),
            failed = outcome.failures.len(),
            elapsed = ?outcome.scan_duration,
            "scan finished"
        );
        Ok(outcome)
    }

    fn task(&self, depth: ScanDepth) -> BucketTask {
        BucketTask {
            provider: Arc::clone(&self.provider),
            estimator: self.estimator.clone(),
            retry: RetryPolicy::from_config(&self.config),
            timeout: self.config.bucket_timeout(),
            depth,
        }
    }
}

/// Everything one bucket's scan needs, owned so it can move into a task.
struct BucketTask {
    provider: Arc<dyn StorageProvider>,
    estimator: CostEstimator,
    retry: RetryPolicy,
    timeout: Option<Duration>,
    depth: ScanDepth,
}

impl BucketTask {
    async fn run(&self, bucket: &str) -> Result<BucketScan, ScanError> {
        let work = self.scan(bucket);
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, work).await.map_err(|_| {
                ScanError::BucketTimeout {
                    bucket: CompactString::from(bucket),
                    timeout,
                }
            })?,
            None => work.await,
        }
    }

    async fn scan(&self, bucket: &str) -> Result<BucketScan, ScanError> {
        let provider = self.provider.as_ref();
        let objects = self
            .retry
            .run("list_objects", bucket, || provider.list_objects(bucket))
            .await?;
        let summary = build_summary(bucket, &objects);

        if self.depth == ScanDepth::Summary {
            return Ok(BucketScan {
                summary,
                config: ResourceConfig::default(),
                findings: Vec::new(),
            });
        }

        let config = scan_bucket_config(provider, &self.retry, bucket, &objects).await?;
        let findings =
            scan_object_categories(provider, &self.retry, bucket, &objects, &self.estimator)
                .await?;

        debug!(
            bucket,
            objects = summary.object_count,
            bytes = summary.total_size,
            "bucket scanned"
        );

        Ok(BucketScan {
            summary,
            config,
            findings,
        })
    }
}
