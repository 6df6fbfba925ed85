use tracing::{info, warn};

use crate::analyzers::criteria::CriterionMeans;
use crate::analyzers::types::{AffordableApp, Criteria, PricedApp};
use crate::analyzers::utility::round_cents;
use crate::error::Result;

/// Annotated apps and the summed impact over all of them.
#[derive(Debug, Clone, Default)]
pub struct PricingOutcome {
    pub apps: Vec<PricedApp>,
    pub total_impact: f64,
}

impl PricingOutcome {
    /// Apps whose majority vote says they are priced below their groups.
    pub fn below_mean_count(&self) -> usize {
        self.apps.iter().filter(|a| a.result == 1).count()
    }
}

/// Suggested price: the current price raised to the tier mean, in cents.
///
/// Never returns less than `price`.
pub fn new_price(price: f64, tier_mean: f64) -> f64 {
    round_cents(price.max(tier_mean)).max(price)
}

/// Revenue delta of moving from `price` to `new_price` across every install.
pub fn impact(price: f64, new_price: f64, installs: u64) -> f64 {
    (new_price - price) * installs as f64
}

/// Builds the annotated rows and the total impact.
///
/// `criteria` must be aligned with `apps`, as returned by
/// [`crate::analyzers::criteria::label_all`].
#[tracing::instrument(skip_all, fields(apps = apps.len()))]
pub fn price_apps(
    apps: &[AffordableApp],
    criteria: &[Criteria],
    means: &CriterionMeans,
) -> Result<PricingOutcome> {
    let mut outcome = PricingOutcome::default();

    for (app, flags) in apps.iter().zip(criteria) {
        let record = &app.record;
        let suggested = new_price(record.price, means.tier_mean(app.tier)?);
        let delta = impact(record.price, suggested, record.installs);
        outcome.total_impact += delta;

        outcome.apps.push(PricedApp {
            app: record.app.clone(),
            category: record.category.clone(),
            rating: record.rating,
            reviews: record.reviews,
            size_mb: record.size_mb,
            installs: record.installs,
            price: record.price,
            genres: record.genres.clone(),
            affordability: app.tier,
            genre_count: app.genre_count,
            price_criterion: flags.price as u8,
            genre_criterion: flags.genre as u8,
            category_criterion: flags.category as u8,
            result: flags.result() as u8,
            new_price: suggested,
            impact: delta,
        });
    }

    info!(
        apps = outcome.apps.len(),
        below_mean = outcome.below_mean_count(),
        total_impact = outcome.total_impact,
        "Pricing impact computed"
    );
    warn!("Total impact ignores demand loss from higher prices; treat it as a rough upper bound");

    Ok(outcome)
}
