//! Analysis and recommendations for bucketwise.
//!
//! This crate turns bucket scans into findings and suggestions:
//!
//! - **Bucket analyses** - archive candidates, unmanaged versioning,
//!   lifecycle gaps, temporary storage without expiration
//! - **Object analyses** - compressible, duplicate and incomplete data
//! - **Recommendations** - two-tier suggestions per category
//!
//! Each bucket is analyzed independently (in parallel with rayon). The
//! temporary storage check runs afterwards over the lifecycle results of all
//! buckets.
//!
//! ```rust,ignore
//! use bucketwise_analyze::{Analyzer, RecommendationCatalog, recommend};
//!
//! let analyses = Analyzer::new().analyze(&outcome.scans);
//! for rec in recommend(&analyses, &RecommendationCatalog::default()) {
//!     println!("{}: {} buckets", rec.category_name, rec.target_resources.len());
//! }
//! ```

mod analyzer;
pub mod bucket;
mod objects;
mod recommend;
mod result;

pub use analyzer::{AnalyzeConfig, AnalyzeConfigBuilder, Analyzer};
pub use objects::category_analysis;
pub use recommend::{
    Recommendation, RecommendationCatalog, SAVER_SUPER_STAR, SIMPLE_SAVER, SUPER_SAVER,
    Suggestions, Tier, recommend,
};
pub use result::{Analysis, AnalysisKind, AnalysisResult};

// Re-export core types
pub use bucketwise_core::{BucketScan, EstimatedSavings, ResourceSummary};
