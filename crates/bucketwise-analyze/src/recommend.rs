//! Two-tier recommendations from analyses.

use bucketwise_core::EstimatedSavings;
use compact_str::CompactString;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::result::{Analysis, AnalysisKind};

/// Level of the basic suggestion for a flagged category.
pub const SIMPLE_SAVER: &str = "Simple Saver Suggestion";
/// Level of the advanced suggestion for a flagged category.
pub const SUPER_SAVER: &str = "Super Saver Suggestion";
/// Level of the message for a category with nothing flagged.
pub const SAVER_SUPER_STAR: &str = "Saver Super Star";

/// One suggestion at a given level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub level: CompactString,
    pub text: String,
}

impl Tier {
    pub fn new(level: impl Into<CompactString>, text: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            text: text.into(),
        }
    }
}

/// Suggestion texts for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    pub simple: String,
    pub super_saver: String,
}

impl Suggestions {
    pub fn new(simple: impl Into<String>, super_saver: impl Into<String>) -> Self {
        Self {
            simple: simple.into(),
            super_saver: super_saver.into(),
        }
    }
}

/// Suggestion texts keyed by analysis category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationCatalog {
    entries: IndexMap<AnalysisKind, Suggestions>,
}

impl RecommendationCatalog {
    /// A catalog with no texts.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Set the texts for a category.
    pub fn with_suggestions(mut self, kind: AnalysisKind, suggestions: Suggestions) -> Self {
        self.entries.insert(kind, suggestions);
        self
    }

    /// Override texts with every entry of another catalog.
    pub fn extend(&mut self, overrides: &RecommendationCatalog) {
        for (kind, suggestions) in &overrides.entries {
            self.entries.insert(*kind, suggestions.clone());
        }
    }

    /// Texts for a category.
    pub fn suggestions(&self, kind: AnalysisKind) -> Option<&Suggestions> {
        self.entries.get(&kind)
    }

    /// Tiers for a category given how many buckets it flagged.
    pub fn tiers(&self, kind: AnalysisKind, flagged: usize) -> Vec<Tier> {
        if flagged == 0 {
            return vec![Tier::new(
                SAVER_SUPER_STAR,
                format!(
                    "No suggestions needed! Our analysis shows that you're handling {} like a Saver Super Star",
                    kind.subject()
                ),
            )];
        }

        let suggestions = match self.suggestions(kind) {
            Some(s) => s.clone(),
            None => {
                debug!(analysis = %kind, "no suggestions in catalog, using default texts");
                Self::default()
                    .entries
                    .swap_remove(&kind)
                    .unwrap_or_else(|| Suggestions::new("", ""))
            }
        };
        vec![
            Tier::new(SIMPLE_SAVER, suggestions.simple),
            Tier::new(SUPER_SAVER, suggestions.super_saver),
        ]
    }
}

impl Default for RecommendationCatalog {
    fn default() -> Self {
        Self::empty()
            .with_suggestions(
                AnalysisKind::ArchiveStorage,
                Suggestions::new(
                    "We suggest updating the storage class of objects in these buckets to S3 Glacier Storage.",
                    "We suggest enabling lifecycle rules that automatically move older or infrequently accessed data to better suited storage class.",
                ),
            )
            .with_suggestions(
                AnalysisKind::BucketVersioning,
                Suggestions::new(
                    "We suggest reviewing the purpose and content of these buckets to determine if versioning is necessary.",
                    "We suggest enabling lifecycle rules that limit the number of versions per object.",
                ),
            )
            .with_suggestions(
                AnalysisKind::LifecycleManagement,
                Suggestions::new(
                    "We suggest enabling lifecycle rules that automatically move older or infrequently accessed data to better suited storage class.",
                    "We suggest utilizing lifecycle filters to more precisely set lifecycle rules, such as only transitioning objects with a certain prefix.",
                ),
            )
            .with_suggestions(
                AnalysisKind::TemporaryStorage,
                Suggestions::new(
                    "We suggest enabling an Expiration Policy for buckets containing temporary data.",
                    "We suggest disabling bucket versioning for buckets containing temporary data.",
                ),
            )
            .with_suggestions(
                AnalysisKind::CompressedData,
                Suggestions::new(
                    "We suggest compressing objects in the listed buckets.",
                    "We suggest compressing data prior to storing in S3.",
                ),
            )
            .with_suggestions(
                AnalysisKind::DuplicateData,
                Suggestions::new(
                    "We suggest deleting duplicate objects.",
                    "We suggest de-duplicating data prior to storing in S3, or enabling Bucket Versioning and Lifecycle Policies.",
                ),
            )
            .with_suggestions(
                AnalysisKind::IncompleteData,
                Suggestions::new(
                    "We suggest deleting incomplete multipart uploads in the listed buckets.",
                    "We suggest enabling Expire Incomplete Multipart Uploads in your bucket's lifecycle policy.",
                ),
            )
    }
}

/// Suggestions for one analysis category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: AnalysisKind,
    pub category_name: String,
    /// Flagged buckets, deduplicated in first-seen order.
    pub target_resources: IndexSet<CompactString>,
    pub tiers: Vec<Tier>,
    /// Savings summed over the flagged results.
    pub estimated_savings: EstimatedSavings,
}

impl Recommendation {
    /// Check if the category flagged any bucket.
    pub fn has_targets(&self) -> bool {
        !self.target_resources.is_empty()
    }
}

/// Build one recommendation per analysis, in analysis order.
pub fn recommend(analyses: &[Analysis], catalog: &RecommendationCatalog) -> Vec<Recommendation> {
    analyses
        .iter()
        .map(|analysis| {
            let target_resources: IndexSet<CompactString> = analysis
                .results
                .iter()
                .map(|r| r.summary().name.clone())
                .collect();
            let tiers = catalog.tiers(analysis.kind, target_resources.len());

            Recommendation {
                kind: analysis.kind,
                category_name: analysis.name.clone(),
                target_resources,
                tiers,
                estimated_savings: analysis.estimated_savings(),
            }
        })
        .collect()
}
