//! Scan progress reporting.

use std::time::{Duration, Instant};

use bucketwise_core::BucketScan;
use compact_str::CompactString;

/// Progress information during a scan run.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Buckets selected for this run.
    pub buckets_total: u64,
    /// Buckets finished so far (scanned or failed).
    pub buckets_done: u64,
    /// Objects listed so far.
    pub objects_scanned: u64,
    /// Bytes listed so far.
    pub bytes_scanned: u64,
    /// Bucket that finished most recently.
    pub current_bucket: CompactString,
    /// Number of buckets that failed.
    pub errors_count: u64,
    /// Time elapsed since the run started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new(buckets_total: u64) -> Self {
        Self {
            buckets_total,
            buckets_done: 0,
            objects_scanned: 0,
            bytes_scanned: 0,
            current_bucket: CompactString::default(),
            errors_count: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Fraction of buckets finished, between 0 and 1.
    pub fn fraction_done(&self) -> f64 {
        if self.buckets_total == 0 {
            1.0
        } else {
            self.buckets_done as f64 / self.buckets_total as f64
        }
    }

    /// Objects listed per second.
    pub fn objects_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.objects_scanned as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Check if every bucket has finished.
    pub fn is_finished(&self) -> bool {
        self.buckets_done >= self.buckets_total
    }
}

/// Running totals behind the broadcast snapshots.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    progress: ScanProgress,
}

impl ProgressTracker {
    pub fn new(buckets_total: usize) -> Self {
        Self {
            start_time: Instant::now(),
            progress: ScanProgress::new(buckets_total as u64),
        }
    }

    pub fn record_scan(&mut self, scan: &BucketScan) {
        self.progress.buckets_done += 1;
        self.progress.objects_scanned += scan.summary.object_count;
        self.progress.bytes_scanned += scan.summary.total_size;
        self.progress.current_bucket = scan.summary.name.clone();
    }

    pub fn record_error(&mut self, bucket: &str) {
        self.progress.buckets_done += 1;
        self.progress.errors_count += 1;
        self.progress.current_bucket = bucket.into();
    }

    pub fn snapshot(&self) -> ScanProgress {
        ScanProgress {
            elapsed: self.start_time.elapsed(),
            ..self.progress.clone()
        }
    }
}
