//! Settings file loading.
//!
//! A settings file is TOML with optional `[scan]`, `[analyze]`, `[prices]`
//! and `[recommendations]` tables. Every key is optional.

use std::path::{Path, PathBuf};

use bucketwise_analyze::{AnalyzeConfig, RecommendationCatalog};
use bucketwise_core::{PriceTable, ScanConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid settings: {message}")]
    Invalid { message: String },
}

/// Run settings, as read from a settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scan: ScanConfig,
    pub analyze: AnalyzeConfig,
    /// Price overrides in USD per GiB-month, merged over the defaults.
    pub prices: PriceTable,
    /// Suggestion text overrides, merged over the defaults.
    pub recommendations: RecommendationCatalog,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let mut settings: Self = toml::from_str(content)?;
        // Missing tables deserialize to the defaults; a present table
        // replaces them, so start from the defaults and merge.
        let mut prices = PriceTable::default();
        prices.extend(&settings.scan.prices);
        prices.extend(&settings.prices);
        settings.scan.prices = prices.clone();
        settings.prices = prices;

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load settings from a file if one was given, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Scan configuration with price overrides applied.
    pub fn scan_config(&self) -> ScanConfig {
        let mut scan = self.scan.clone();
        scan.prices.extend(&self.prices);
        scan
    }

    /// Suggestion catalog with text overrides applied.
    pub fn catalog(&self) -> RecommendationCatalog {
        let mut catalog = RecommendationCatalog::default();
        catalog.extend(&self.recommendations);
        catalog
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.scan.workers == 0 {
            return Err(SettingsError::Invalid {
                message: "scan.workers must be at least 1".to_string(),
            });
        }
        if self.analyze.inactive_months == 0 {
            return Err(SettingsError::Invalid {
                message: "analyze.inactive_months must be at least 1".to_string(),
            });
        }
        if let Some((class, price)) = self
            .prices
            .iter()
            .find(|(_, price)| !price.is_finite() || *price < 0.0)
        {
            return Err(SettingsError::Invalid {
                message: format!("price for {class} must be a non-negative number, got {price}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketwise_analyze::AnalysisKind;
    use std::time::Duration;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.scan.workers, 8);
        assert!(settings.scan.fail_fast);
        assert_eq!(settings.analyze.inactive_months, 3);
        assert_eq!(settings.scan_config().prices.price("STANDARD").unwrap(), 0.023);
    }

    #[test]
    fn test_tables_override_defaults() {
        let settings = Settings::from_toml(
            r#"
            [scan]
            workers = 2
            bucket_timeout_secs = 0
            fail_fast = false

            [analyze]
            inactive_months = 12

            [prices]
            STANDARD = 0.025
            ARCHIVE_X = 0.001

            [recommendations.duplicate_data]
            simple = "Delete them."
            super_saver = "Dedupe upstream."
            "#,
        )
        .unwrap();

        let scan = settings.scan_config();
        assert_eq!(scan.workers, 2);
        assert_eq!(scan.bucket_timeout(), None);
        assert_eq!(scan.run_deadline(), Some(Duration::from_secs(1800)));
        assert!(!scan.fail_fast);
        assert_eq!(scan.prices.price("STANDARD").unwrap(), 0.025);
        assert_eq!(scan.prices.price("ARCHIVE_X").unwrap(), 0.001);
        assert_eq!(scan.prices.price("GLACIER").unwrap(), 0.004);

        assert_eq!(settings.analyze.inactive_months, 12);

        let catalog = settings.catalog();
        assert_eq!(
            catalog.suggestions(AnalysisKind::DuplicateData).unwrap().simple,
            "Delete them."
        );
        assert!(catalog.suggestions(AnalysisKind::ArchiveStorage).is_some());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Settings::from_toml("[scan]\nworkers = 0"),
            Err(SettingsError::Invalid { .. })
        ));
        assert!(matches!(
            Settings::from_toml("[analyze]\ninactive_months = 0"),
            Err(SettingsError::Invalid { .. })
        ));
        assert!(matches!(
            Settings::from_toml("[prices]\nSTANDARD = -1.0"),
            Err(SettingsError::Invalid { .. })
        ));
        assert!(matches!(
            Settings::from_toml("[scan\n"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bucketwise.toml");
        std::fs::write(&path, "[scan]\nmax_retries = 5\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.scan.max_retries, 5);

        let missing = Settings::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, SettingsError::Io { .. }));

        let defaults = Settings::load_or_default(None).unwrap();
        assert_eq!(defaults.scan.max_retries, 2);
    }
}
