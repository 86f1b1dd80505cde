//! Object category findings and savings estimates.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// Monthly savings range in dollars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatedSavings {
    /// Lower bound of the monthly estimate.
    pub monthly_min: f64,
    /// Upper bound of the monthly estimate.
    pub monthly_max: f64,
}

impl EstimatedSavings {
    /// No savings.
    pub const ZERO: Self = Self {
        monthly_min: 0.0,
        monthly_max: 0.0,
    };

    /// A point estimate where min equals max.
    pub fn exact(amount: f64) -> Self {
        Self {
            monthly_min: amount,
            monthly_max: amount,
        }
    }

    /// A range estimate. Bounds are reordered if given backwards.
    pub fn range(a: f64, b: f64) -> Self {
        Self {
            monthly_min: a.min(b),
            monthly_max: a.max(b),
        }
    }

    /// Check if both bounds are zero.
    pub fn is_zero(&self) -> bool {
        self.monthly_min == 0.0 && self.monthly_max == 0.0
    }
}

impl Add for EstimatedSavings {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            monthly_min: self.monthly_min + rhs.monthly_min,
            monthly_max: self.monthly_max + rhs.monthly_max,
        }
    }
}

impl AddAssign for EstimatedSavings {
    fn add_assign(&mut self, rhs: Self) {
        self.monthly_min += rhs.monthly_min;
        self.monthly_max += rhs.monthly_max;
    }
}

impl Sum for EstimatedSavings {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Object-level finding categories.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ObjectCategory {
    IncompleteMultipartUpload,
    DuplicateObjects,
    CompressibleObjects,
}

/// Aggregate result of one object category scan for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectCategoryFinding {
    /// Category scanned.
    pub category: ObjectCategory,
    /// Number of objects in the category.
    pub object_count: u64,
    /// Total bytes in the category.
    pub total_size: u64,
    /// Savings if the category were remediated.
    pub estimated_savings: EstimatedSavings,
}

impl ObjectCategoryFinding {
    /// A finding with nothing in it.
    pub fn empty(category: ObjectCategory) -> Self {
        Self {
            category,
            object_count: 0,
            total_size: 0,
            estimated_savings: EstimatedSavings::ZERO,
        }
    }

    /// Record one object in this category.
    pub fn record(&mut self, size: u64, savings: EstimatedSavings) {
        self.object_count += 1;
        self.total_size += size;
        self.estimated_savings += savings;
    }

    /// Check if any objects fell into the category.
    pub fn has_findings(&self) -> bool {
        self.object_count > 0
    }
}
