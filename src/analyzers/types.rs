//! Data types used by the pricing analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::AppRecord;

/// Affordability tier of a paid app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Cheap,
    Reasonable,
}

impl Tier {
    pub const ALL: [Tier; 2] = [Tier::Cheap, Tier::Reasonable];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Cheap => "cheap",
            Tier::Reasonable => "reasonable",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A paid app priced below the affordable threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct AffordableApp {
    pub record: AppRecord,
    pub tier: Tier,
    pub genre_count: usize,
}

impl AffordableApp {
    pub fn new(record: AppRecord, tier: Tier) -> Self {
        let genre_count = record.genre_count();
        Self {
            record,
            tier,
            genre_count,
        }
    }

    pub fn price(&self) -> f64 {
        self.record.price
    }
}

/// Below-group-mean flags for one app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Criteria {
    /// Price is below the tier mean.
    pub price: bool,
    /// Price is below the (tier, genre count) mean.
    pub genre: bool,
    /// Price is below the (tier, category) mean.
    pub category: bool,
}

impl Criteria {
    /// Majority vote over the three flags.
    pub fn result(&self) -> bool {
        [self.price, self.genre, self.category]
            .iter()
            .filter(|&&f| f)
            .count()
            >= 2
    }
}

/// Fully annotated app row, as exported to CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedApp {
    #[serde(rename = "App")]
    pub app: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "Reviews")]
    pub reviews: u64,
    #[serde(rename = "Size")]
    pub size_mb: Option<f64>,
    #[serde(rename = "Installs")]
    pub installs: u64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Genres")]
    pub genres: String,
    pub affordability: Tier,
    pub genre_count: usize,
    pub price_criterion: u8,
    pub genre_criterion: u8,
    pub category_criterion: u8,
    #[serde(rename = "Result")]
    pub result: u8,
    #[serde(rename = "New Price")]
    pub new_price: f64,
    #[serde(rename = "Impact")]
    pub impact: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_vote() {
        let c = |price, genre, category| Criteria {
            price,
            genre,
            category,
        };
        assert!(c(true, true, true).result());
        assert!(c(true, true, false).result());
        assert!(c(false, true, true).result());
        assert!(c(true, false, true).result());
        assert!(!c(true, false, false).result());
        assert!(!c(false, false, true).result());
        assert!(!c(false, false, false).result());
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::Cheap.to_string(), "cheap");
        assert_eq!(Tier::Reasonable.to_string(), "reasonable");
    }
}
