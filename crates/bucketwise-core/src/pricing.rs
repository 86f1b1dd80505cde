//! Storage pricing and cost estimation.
//!
//! All prices are dollars per binary gigabyte (2^30 bytes) per month. The
//! same divisor is used by every estimate so savings from different
//! categories can be added together.

use std::collections::BTreeMap;
use std::str::FromStr;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::EstimateError;
use crate::finding::EstimatedSavings;

/// Bytes in one binary gigabyte.
pub const BYTES_PER_GIB: f64 = 1_073_741_824.0;

/// Built-in storage class prices.
const DEFAULT_PRICES: &[(&str, f64)] = &[
    ("STANDARD", 0.023),
    ("STANDARD_IA", 0.0125),
    ("ONEZONE_IA", 0.01),
    ("GLACIER", 0.004),
    ("DEEP_ARCHIVE", 0.00099),
    ("INTELLIGENT_TIERING", 0.023),
    ("GLACIER_IR", 0.004),
    ("REDUCED_REDUNDANCY", 0.024),
];

/// Mapping from storage class identifier to monthly price per GiB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    prices: BTreeMap<CompactString, f64>,
}

impl PriceTable {
    /// An empty table; every lookup fails.
    pub fn empty() -> Self {
        Self {
            prices: BTreeMap::new(),
        }
    }

    /// Set or replace the price for a storage class.
    pub fn with_price(mut self, class: impl Into<CompactString>, per_gib_month: f64) -> Self {
        self.prices.insert(class.into(), per_gib_month);
        self
    }

    /// Merge overrides into this table, replacing existing entries.
    pub fn extend(&mut self, overrides: &PriceTable) {
        for (class, price) in &overrides.prices {
            self.prices.insert(class.clone(), *price);
        }
    }

    /// Look up the price of a storage class.
    pub fn price(&self, class: &str) -> Result<f64, EstimateError> {
        self.prices
            .get(class)
            .copied()
            .ok_or_else(|| EstimateError::InvalidStorageClass {
                class: class.into(),
            })
    }

    /// Check if a storage class is priced.
    pub fn contains(&self, class: &str) -> bool {
        self.prices.contains_key(class)
    }

    /// Iterate over (class, price) pairs in class order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(c, p)| (c.as_str(), *p))
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            prices: DEFAULT_PRICES
                .iter()
                .map(|(class, price)| (CompactString::from(*class), *price))
                .collect(),
        }
    }
}

/// Target compression scheme for a compressible object.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CompressionScheme {
    Gzip,
    Zlib,
    Zip,
    Snappy,
    Jpeg,
    Mp3,
    H264,
    Bzip2,
    Zstd,
    #[serde(rename = "7zip")]
    #[strum(serialize = "7zip")]
    SevenZip,
}

impl CompressionScheme {
    /// Parse a scheme name, accepting an optional leading dot.
    pub fn parse(name: &str) -> Result<Self, EstimateError> {
        let trimmed = name.strip_prefix('.').unwrap_or(name);
        Self::from_str(&trimmed.to_ascii_lowercase()).map_err(|_| {
            EstimateError::UnsupportedScheme {
                scheme: name.into(),
            }
        })
    }

    /// Typical (min, max) compression ratio for this scheme.
    pub fn ratio_band(self) -> (f64, f64) {
        match self {
            Self::Gzip | Self::Snappy | Self::Zstd => (2.5, 4.0),
            Self::Zlib | Self::Zip | Self::SevenZip => (2.0, 3.0),
            Self::Jpeg | Self::H264 => (10.0, 20.0),
            Self::Mp3 => (10.0, 12.0),
            Self::Bzip2 => (1.5, 3.0),
        }
    }
}

/// Converts byte counts into monthly dollar figures.
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    prices: PriceTable,
}

impl CostEstimator {
    /// Create an estimator over the given price table.
    pub fn new(prices: PriceTable) -> Self {
        Self { prices }
    }

    /// The price table in use.
    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Monthly cost of storing `size` bytes in `class`.
    pub fn current_monthly_cost(&self, size: u64, class: &str) -> Result<f64, EstimateError> {
        let price = self.prices.price(class)?;
        Ok(size as f64 / BYTES_PER_GIB * price)
    }

    /// Monthly savings from deleting `size` bytes stored in `class`.
    pub fn deletion_savings(&self, size: u64, class: &str) -> Result<f64, EstimateError> {
        self.current_monthly_cost(size, class)
    }

    /// Savings range for compressing `size` bytes with `scheme`.
    ///
    /// The minimum is priced at the size left after the scheme's best
    /// ratio and the maximum at the size left after its worst ratio.
    pub fn compression_savings(
        &self,
        size: u64,
        scheme: CompressionScheme,
        class: &str,
    ) -> Result<EstimatedSavings, EstimateError> {
        let price = self.prices.price(class)?;
        let (min_ratio, max_ratio) = scheme.ratio_band();
        let bytes = size as f64;

        Ok(EstimatedSavings {
            monthly_min: bytes / max_ratio / BYTES_PER_GIB * price,
            monthly_max: bytes / min_ratio / BYTES_PER_GIB * price,
        })
    }

    /// Same as [`compression_savings`](Self::compression_savings) with the
    /// scheme given by name.
    pub fn compression_savings_by_name(
        &self,
        size: u64,
        scheme: &str,
        class: &str,
    ) -> Result<EstimatedSavings, EstimateError> {
        self.compression_savings(size, CompressionScheme::parse(scheme)?, class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const GIB: u64 = 1 << 30;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_current_monthly_cost() {
        let estimator = CostEstimator::default();
        assert_close(estimator.current_monthly_cost(0, "STANDARD").unwrap(), 0.0);
        assert_close(estimator.current_monthly_cost(GIB, "STANDARD").unwrap(), 0.023);
        assert_close(estimator.current_monthly_cost(GIB, "STANDARD_IA").unwrap(), 0.0125);
        assert_close(estimator.current_monthly_cost(GIB, "ONEZONE_IA").unwrap(), 0.01);
        assert_close(estimator.current_monthly_cost(GIB, "GLACIER").unwrap(), 0.004);
        assert_close(estimator.current_monthly_cost(GIB, "DEEP_ARCHIVE").unwrap(), 0.00099);
        assert_close(estimator.current_monthly_cost(2 * GIB, "STANDARD").unwrap(), 0.046);
    }

    #[test]
    fn test_invalid_storage_class() {
        let estimator = CostEstimator::default();
        let err = estimator.deletion_savings(GIB, "MOON_DUST").unwrap_err();
        assert_eq!(
            err,
            EstimateError::InvalidStorageClass {
                class: "MOON_DUST".into()
            }
        );
    }

    #[test]
    fn test_deletion_matches_current_cost() {
        let estimator = CostEstimator::default();
        for (class, _) in estimator.prices().iter() {
            assert_eq!(
                estimator.deletion_savings(3 * GIB, class).unwrap(),
                estimator.current_monthly_cost(3 * GIB, class).unwrap()
            );
        }
    }

    #[test]
    fn test_compression_savings_gzip() {
        let estimator = CostEstimator::default();
        let savings = estimator
            .compression_savings(4 * GIB, CompressionScheme::Gzip, "STANDARD")
            .unwrap();
        // 4 GiB / 4.0 = 1 GiB, 4 GiB / 2.5 = 1.6 GiB
        assert_close(savings.monthly_min, 0.023);
        assert_close(savings.monthly_max, 1.6 * 0.023);
    }

    #[test]
    fn test_compression_min_le_max_for_every_scheme() {
        let estimator = CostEstimator::default();
        for scheme in CompressionScheme::iter() {
            let (min_ratio, max_ratio) = scheme.ratio_band();
            assert!(min_ratio <= max_ratio, "{scheme} band inverted");

            let savings = estimator
                .compression_savings(10 * GIB, scheme, "STANDARD_IA")
                .unwrap();
            assert!(savings.monthly_min <= savings.monthly_max);
            assert!(savings.monthly_min >= 0.0);
        }
    }

    #[test]
    fn test_compression_monotonic_in_size() {
        let estimator = CostEstimator::default();
        for scheme in CompressionScheme::iter() {
            let mut previous = EstimatedSavings::ZERO;
            for size in [0, 1, 1024, GIB, 5 * GIB, 100 * GIB] {
                let current = estimator.compression_savings(size, scheme, "STANDARD").unwrap();
                assert!(current.monthly_min >= previous.monthly_min);
                assert!(current.monthly_max >= previous.monthly_max);
                previous = current;
            }
        }
    }

    #[test]
    fn test_scheme_parse() {
        assert_eq!(CompressionScheme::parse(".gzip").unwrap(), CompressionScheme::Gzip);
        assert_eq!(CompressionScheme::parse("7zip").unwrap(), CompressionScheme::SevenZip);
        assert_eq!(CompressionScheme::parse("H264").unwrap(), CompressionScheme::H264);
        assert_eq!(
            CompressionScheme::parse(".lzma").unwrap_err(),
            EstimateError::UnsupportedScheme {
                scheme: ".lzma".into()
            }
        );
    }

    #[test]
    fn test_compression_by_name_unsupported() {
        let estimator = CostEstimator::default();
        assert!(matches!(
            estimator.compression_savings_by_name(GIB, "brotli", "STANDARD"),
            Err(EstimateError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_price_overrides() {
        let mut table = PriceTable::default();
        table.extend(&PriceTable::empty().with_price("STANDARD", 0.02).with_price("EXPRESS_ONEZONE", 0.16));
        assert_eq!(table.price("STANDARD").unwrap(), 0.02);
        assert_eq!(table.price("EXPRESS_ONEZONE").unwrap(), 0.16);
        assert!(table.contains("GLACIER"));
    }
}
