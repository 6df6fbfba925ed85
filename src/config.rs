//! Analysis settings: price boundaries, known duplicate rows, chart options.
//!
//! Everything has a default matching the Play Store dataset, so a config file
//! is only needed to override a value. Stored as a JSON object on disk:
//! ```json
//! {
//!   "thresholds": { "cheap_below": 5.0, "affordable_below": 50.0 },
//!   "known_duplicates": [
//!     { "app": "Toca Life: City", "category": "FAMILY" }
//!   ],
//!   "histogram_bins": 20
//! }
//! ```

use serde::Deserialize;

use crate::analyzers::types::Tier;
use crate::error::{PricingError, Result};

/// Price boundaries separating the affordability tiers.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PriceThresholds {
    /// Upper bound (exclusive) of the cheap tier.
    pub cheap_below: f64,
    /// Upper bound (exclusive) of the affordable range.
    pub affordable_below: f64,
}

impl Default for PriceThresholds {
    fn default() -> Self {
        Self {
            cheap_below: 5.0,
            affordable_below: 50.0,
        }
    }
}

impl PriceThresholds {
    /// Checks that both tiers span a non-empty price range.
    pub fn validate(&self) -> Result<()> {
        if self.cheap_below > 0.0 && self.cheap_below < self.affordable_below {
            Ok(())
        } else {
            Err(PricingError::InvalidThresholds {
                cheap_below: self.cheap_below,
                affordable_below: self.affordable_below,
            })
        }
    }

    /// Returns the tier for `price`, or `None` if the app is not affordable.
    pub fn tier(&self, price: f64) -> Option<Tier> {
        if price >= self.affordable_below {
            None
        } else if price < self.cheap_below {
            Some(Tier::Cheap)
        } else {
            Some(Tier::Reasonable)
        }
    }
}

/// An app listed more than once within the same category with differing metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KnownDuplicate {
    pub app: String,
    pub category: String,
}

impl KnownDuplicate {
    pub fn new(app: &str, category: &str) -> Self {
        Self {
            app: app.to_string(),
            category: category.to_string(),
        }
    }

    pub fn matches(&self, app: &str, category: &str) -> bool {
        self.app == app && self.category == category
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub thresholds: PriceThresholds,
    pub known_duplicates: Vec<KnownDuplicate>,
    /// Number of bars in each price histogram.
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            thresholds: PriceThresholds::default(),
            known_duplicates: vec![
                KnownDuplicate::new("Fuzzy Numbers: Pre-K Number Foundation", "FAMILY"),
                KnownDuplicate::new("Toca Life: City", "FAMILY"),
            ],
            histogram_bins: 20,
        }
    }
}

impl AnalysisConfig {
    /// Loads the config from a JSON file at `path`. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or invalid JSON, and with
    /// [`PricingError::InvalidThresholds`] when the tiers would be empty.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&content)?;
        config.thresholds.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_tier_boundaries() {
        let t = PriceThresholds::default();
        assert_eq!(t.tier(0.99), Some(Tier::Cheap));
        assert_eq!(t.tier(4.99), Some(Tier::Cheap));
        assert_eq!(t.tier(5.0), Some(Tier::Reasonable));
        assert_eq!(t.tier(49.99), Some(Tier::Reasonable));
        assert_eq!(t.tier(50.0), None);
        assert_eq!(t.tier(399.99), None);
    }

    #[test]
    fn test_load_partial_config_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "thresholds": {{ "cheap_below": 3.0 }} }}"#).unwrap();

        let config = AnalysisConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.thresholds.cheap_below, 3.0);
        assert_eq!(config.thresholds.affordable_below, 50.0);
        assert_eq!(config.known_duplicates.len(), 2);
        assert_eq!(config.histogram_bins, 20);
    }

    #[test]
    fn test_load_overrides_known_duplicates() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{ "known_duplicates": [{{ "app": "Minecraft", "category": "FAMILY" }}] }}"#
        )
        .unwrap();

        let config = AnalysisConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            config.known_duplicates,
            vec![KnownDuplicate::new("Minecraft", "FAMILY")]
        );
    }

    #[test]
    fn test_validate_thresholds() {
        assert!(PriceThresholds::default().validate().is_ok());

        let zero_cheap = PriceThresholds {
            cheap_below: 0.0,
            affordable_below: 50.0,
        };
        assert!(matches!(
            zero_cheap.validate(),
            Err(PricingError::InvalidThresholds { .. })
        ));

        let inverted = PriceThresholds {
            cheap_below: 50.0,
            affordable_below: 50.0,
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_load_rejects_empty_tier() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{ "thresholds": {{ "cheap_below": 60.0, "affordable_below": 50.0 }} }}"#
        )
        .unwrap();

        let err = AnalysisConfig::load(file.path().to_str().unwrap()).unwrap_err();
        match err {
            PricingError::InvalidThresholds {
                cheap_below,
                affordable_below,
            } => {
                assert_eq!(cheap_below, 60.0);
                assert_eq!(affordable_below, 50.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        assert!(AnalysisConfig::load("/nonexistent/playstore_config.json").is_err());
    }

    #[test]
    fn test_known_duplicate_matches() {
        let dup = KnownDuplicate::new("Toca Life: City", "FAMILY");
        assert!(dup.matches("Toca Life: City", "FAMILY"));
        assert!(!dup.matches("Toca Life: City", "EDUCATION"));
    }
}
