//! Below-group-mean labelling.
//!
//! Each app is compared against three mean-price tables: its tier, its
//! (tier, genre count) group and its (tier, category) group.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::analyzers::types::{AffordableApp, Criteria, Tier};
use crate::error::{PricingError, Result};

/// Group key for tables keyed by tier alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AllApps;

impl fmt::Display for AllApps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("all")
    }
}

/// Mean price per `(tier, key)` group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMeans<K> {
    means: BTreeMap<(Tier, K), f64>,
}

impl<K: Ord + Clone + fmt::Display> GroupMeans<K> {
    /// Groups `apps` by tier and `key` and averages their prices.
    pub fn from_apps<F>(apps: &[AffordableApp], key: F) -> Self
    where
        F: Fn(&AffordableApp) -> K,
    {
        let mut sums: BTreeMap<(Tier, K), (f64, usize)> = BTreeMap::new();
        for app in apps {
            let entry = sums.entry((app.tier, key(app))).or_insert((0.0, 0));
            entry.0 += app.price();
            entry.1 += 1;
        }

        let means = sums
            .into_iter()
            .map(|(k, (sum, n))| (k, sum / n as f64))
            .collect();
        Self { means }
    }

    /// Mean price of the `(tier, key)` group.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::MissingGroup`] when no app formed that group.
    pub fn get(&self, tier: Tier, key: &K) -> Result<f64> {
        self.means
            .get(&(tier, key.clone()))
            .copied()
            .ok_or_else(|| PricingError::MissingGroup {
                tier,
                group: key.to_string(),
            })
    }

    /// Whether `price` is strictly below the `(tier, key)` group mean.
    pub fn is_below(&self, tier: Tier, key: &K, price: f64) -> Result<bool> {
        Ok(price < self.get(tier, key)?)
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &K, f64)> {
        self.means.iter().map(|((tier, k), mean)| (*tier, k, *mean))
    }
}

/// The three mean tables the labeller compares against.
#[derive(Debug, Clone)]
pub struct CriterionMeans {
    pub tier: GroupMeans<AllApps>,
    pub genre: GroupMeans<usize>,
    pub category: GroupMeans<String>,
}

impl CriterionMeans {
    pub fn from_apps(apps: &[AffordableApp]) -> Self {
        let means = Self {
            tier: GroupMeans::from_apps(apps, |_| AllApps),
            genre: GroupMeans::from_apps(apps, |a| a.genre_count),
            category: GroupMeans::from_apps(apps, |a| a.record.category.clone()),
        };

        for (tier, genres, mean) in means.genre.iter() {
            debug!(tier = %tier, genre_count = genres, mean, "Genre group mean");
        }
        for (tier, category, mean) in means.category.iter() {
            debug!(tier = %tier, category = %category, mean, "Category group mean");
        }

        means
    }

    /// Tier-only mean price.
    pub fn tier_mean(&self, tier: Tier) -> Result<f64> {
        self.tier.get(tier, &AllApps)
    }
}

/// Computes the criteria flags of one app.
pub fn label(app: &AffordableApp, means: &CriterionMeans) -> Result<Criteria> {
    let price = app.price();
    Ok(Criteria {
        price: means.tier.is_below(app.tier, &AllApps, price)?,
        genre: means.genre.is_below(app.tier, &app.genre_count, price)?,
        category: means
            .category
            .is_below(app.tier, &app.record.category, price)?,
    })
}

/// Labels every app, failing on the first app whose group has no mean.
#[tracing::instrument(skip_all, fields(apps = apps.len()))]
pub fn label_all(apps: &[AffordableApp], means: &CriterionMeans) -> Result<Vec<Criteria>> {
    apps.iter().map(|app| label(app, means)).collect()
}
