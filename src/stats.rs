use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::aggregate::PricingOutcome;
use crate::analyzers::segment::Segmentation;
use crate::analyzers::types::Tier;
use crate::cleaner::CleaningReport;

#[derive(Debug, Default, Serialize)]
pub struct AnalysisSummary {
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,

    // loading and cleaning
    pub total_rows: usize,
    pub malformed_rows: usize,
    pub paid_rows: usize,
    pub known_duplicates_dropped: usize,
    pub duplicate_apps_before: usize,
    pub duplicate_apps_after: usize,
    pub unique_paid_apps: usize,

    // segmentation
    pub affordable_apps: usize,
    pub cheap_apps: usize,
    pub reasonable_apps: usize,
    pub cheap_mean: Option<f64>,
    pub reasonable_mean: Option<f64>,
    pub cheap_price_rating_corr: Option<f64>,
    pub reasonable_price_rating_corr: Option<f64>,

    // pricing
    pub below_mean_apps: usize,
    pub below_mean_pct: f64,
    pub total_impact: f64,
}

impl AnalysisSummary {
    pub fn from_analysis(
        malformed_rows: usize,
        cleaning: &CleaningReport,
        segmentation: &Segmentation,
        pricing: &PricingOutcome,
    ) -> Self {
        let mut s = AnalysisSummary {
            timestamp: Utc::now(),
            total_rows: cleaning.input_rows + malformed_rows,
            malformed_rows,
            paid_rows: cleaning.paid_rows,
            known_duplicates_dropped: cleaning.known_duplicates_dropped,
            duplicate_apps_before: cleaning.duplicate_apps_before,
            duplicate_apps_after: cleaning.duplicate_apps_after,
            unique_paid_apps: cleaning.unique_apps,
            affordable_apps: segmentation.apps.len(),
            below_mean_apps: pricing.below_mean_count(),
            total_impact: pricing.total_impact,
            ..Default::default()
        };

        if let Some(cheap) = segmentation.tier(Tier::Cheap) {
            s.cheap_apps = cheap.count;
            s.cheap_mean = cheap.mean_price;
            s.cheap_price_rating_corr = cheap.price_rating_correlation;
        }

        if let Some(reasonable) = segmentation.tier(Tier::Reasonable) {
            s.reasonable_apps = reasonable.count;
            s.reasonable_mean = reasonable.mean_price;
            s.reasonable_price_rating_corr = reasonable.price_rating_correlation;
        }

        s.below_mean_pct = Self::pct(s.below_mean_apps, s.affordable_apps);
        s
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    /// Set the path of the analyzed dataset
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::segment::TierSummary;
    use crate::analyzers::types::PricedApp;

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(AnalysisSummary::pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(AnalysisSummary::pct(50, 100), 50.0);
        assert_eq!(AnalysisSummary::pct(1, 4), 25.0);
    }

    #[test]
    fn test_from_analysis() {
        let cleaning = CleaningReport {
            input_rows: 100,
            paid_rows: 10,
            known_duplicates_dropped: 1,
            duplicate_apps_before: 2,
            duplicate_apps_after: 0,
            unique_apps: 7,
        };
        let segmentation = Segmentation {
            apps: Vec::new(),
            tiers: vec![
                TierSummary {
                    tier: Tier::Cheap,
                    count: 3,
                    mean_price: Some(2.5),
                    price_rating_correlation: Some(-0.05),
                },
                TierSummary {
                    tier: Tier::Reasonable,
                    count: 1,
                    mean_price: Some(9.99),
                    price_rating_correlation: None,
                },
            ],
        };
        let priced = |result| PricedApp {
            app: "a".to_string(),
            category: "GAME".to_string(),
            rating: None,
            reviews: 1,
            size_mb: None,
            installs: 10,
            price: 1.0,
            genres: "Arcade".to_string(),
            affordability: Tier::Cheap,
            genre_count: 1,
            price_criterion: result,
            genre_criterion: result,
            category_criterion: result,
            result,
            new_price: 2.5,
            impact: 15.0,
        };
        let pricing = PricingOutcome {
            apps: vec![priced(1), priced(0), priced(0), priced(0)],
            total_impact: 60.0,
        };

        let s = AnalysisSummary::from_analysis(1, &cleaning, &segmentation, &pricing)
            .with_source("googleplaystore.csv");

        assert_eq!(s.total_rows, 101);
        assert_eq!(s.malformed_rows, 1);
        assert_eq!(s.cheap_apps, 3);
        assert_eq!(s.cheap_mean, Some(2.5));
        assert_eq!(s.reasonable_price_rating_corr, None);
        assert_eq!(s.below_mean_apps, 1);
        assert_eq!(s.total_impact, 60.0);
        assert_eq!(s.source.as_deref(), Some("googleplaystore.csv"));
    }
}
