use tracing::info;

use crate::analyzers::types::{AffordableApp, Tier};
use crate::analyzers::utility::{mean, pearson};
use crate::config::PriceThresholds;
use crate::record::AppRecord;

/// Observed statistics for one affordability tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierSummary {
    pub tier: Tier,
    pub count: usize,
    /// `None` when the tier is empty.
    pub mean_price: Option<f64>,
    /// Price vs rating over rated apps only.
    pub price_rating_correlation: Option<f64>,
}

/// Affordable apps split into tiers.
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub apps: Vec<AffordableApp>,
    pub tiers: Vec<TierSummary>,
}

impl Segmentation {
    pub fn tier(&self, tier: Tier) -> Option<&TierSummary> {
        self.tiers.iter().find(|t| t.tier == tier)
    }

    pub fn apps_in(&self, tier: Tier) -> impl Iterator<Item = &AffordableApp> {
        self.apps.iter().filter(move |a| a.tier == tier)
    }

    /// `(price, rating)` pairs of rated apps in `tier`.
    pub fn price_rating_pairs(&self, tier: Tier) -> Vec<(f64, f64)> {
        self.apps_in(tier)
            .filter_map(|a| a.record.rating.map(|r| (a.price(), r)))
            .collect()
    }
}

/// Keeps apps below `affordable_below` and assigns each one a tier.
#[tracing::instrument(skip_all, fields(apps = apps.len()))]
pub fn segment(apps: Vec<AppRecord>, thresholds: &PriceThresholds) -> Segmentation {
    let affordable: Vec<AffordableApp> = apps
        .into_iter()
        .filter_map(|record| {
            thresholds
                .tier(record.price)
                .map(|tier| AffordableApp::new(record, tier))
        })
        .collect();

    let mut segmentation = Segmentation {
        apps: affordable,
        tiers: Vec::new(),
    };

    for tier in Tier::ALL {
        let prices: Vec<f64> = segmentation.apps_in(tier).map(|a| a.price()).collect();
        let summary = TierSummary {
            tier,
            count: prices.len(),
            mean_price: (!prices.is_empty()).then(|| mean(&prices)),
            price_rating_correlation: pearson(&segmentation.price_rating_pairs(tier)),
        };

        info!(
            tier = %tier,
            count = summary.count,
            mean_price = ?summary.mean_price,
            price_rating_corr = ?summary.price_rating_correlation,
            "Tier segmented"
        );
        segmentation.tiers.push(summary);
    }

    segmentation
}
