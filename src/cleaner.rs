//! Turns raw rows into a deduplicated table of paid apps with numeric fields.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::KnownDuplicate;
use crate::error::Result;
use crate::parser::{parse_installs, parse_price, parse_rating, parse_reviews, parse_size};
use crate::record::{AppRecord, RawRecord};

/// Row counts observed while cleaning.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub paid_rows: usize,
    pub known_duplicates_dropped: usize,
    pub duplicate_apps_before: usize,
    pub duplicate_apps_after: usize,
    pub unique_apps: usize,
}

/// The cleaned paid-app table.
#[derive(Debug, Default)]
pub struct CleanedTable {
    pub apps: Vec<AppRecord>,
    pub report: CleaningReport,
}

/// Cleans `raw` rows into unique paid apps.
///
/// Prices are parsed for every row and free apps (price 0) are dropped. The
/// remaining rows get their numeric fields parsed, rows listed in
/// `known_duplicates` are collapsed to their most-reviewed instance, and
/// finally each app name keeps only its most-reviewed row.
///
/// # Errors
///
/// Returns [`crate::PricingError::Parse`] on the first unparseable field.
#[tracing::instrument(skip_all, fields(rows = raw.len()))]
pub fn clean(raw: Vec<RawRecord>, known_duplicates: &[KnownDuplicate]) -> Result<CleanedTable> {
    let mut report = CleaningReport {
        input_rows: raw.len(),
        ..Default::default()
    };

    let mut paid = Vec::new();
    for row in raw {
        let price = parse_price(&row.price, &row.app)?;
        if price == 0.0 {
            continue;
        }
        paid.push(to_app_record(row, price)?);
    }
    report.paid_rows = paid.len();
    debug!(paid = report.paid_rows, "Free apps removed");

    let before_known = paid.len();
    let mut apps = drop_known_duplicates(paid, known_duplicates);
    report.known_duplicates_dropped = before_known - apps.len();

    report.duplicate_apps_before = count_duplicate_apps(&apps);
    info!(
        known_dropped = report.known_duplicates_dropped,
        duplicates = report.duplicate_apps_before,
        "Duplicate app entries before dedup"
    );

    dedup_by_reviews(&mut apps);

    report.duplicate_apps_after = count_duplicate_apps(&apps);
    report.unique_apps = apps.len();
    info!(
        unique_apps = report.unique_apps,
        duplicates = report.duplicate_apps_after,
        "Paid app table cleaned"
    );

    Ok(CleanedTable { apps, report })
}

fn to_app_record(row: RawRecord, price: f64) -> Result<AppRecord> {
    let app = &row.app;
    Ok(AppRecord {
        rating: parse_rating(&row.rating, app)?,
        reviews: parse_reviews(&row.reviews, app)?,
        size_mb: parse_size(&row.size, app)?,
        installs: parse_installs(&row.installs, app)?,
        price,
        app: row.app,
        category: row.category,
        content_rating: row.content_rating,
        genres: row.genres,
    })
}

/// Keeps only the most-reviewed row among those matching each known duplicate.
fn drop_known_duplicates(apps: Vec<AppRecord>, known: &[KnownDuplicate]) -> Vec<AppRecord> {
    let keep: HashSet<usize> = known
        .iter()
        .filter_map(|dup| {
            apps.iter()
                .enumerate()
                .filter(|(_, a)| dup.matches(&a.app, &a.category))
                .rev()
                .max_by_key(|(_, a)| a.reviews)
                .map(|(i, _)| i)
        })
        .collect();

    apps.into_iter()
        .enumerate()
        .filter(|(i, a)| {
            let listed = known.iter().any(|dup| dup.matches(&a.app, &a.category));
            !listed || keep.contains(i)
        })
        .map(|(_, a)| a)
        .collect()
}

/// Sorts by Reviews descending and keeps the first row per app name.
///
/// The sort is stable, so ties keep their file order.
fn dedup_by_reviews(apps: &mut Vec<AppRecord>) {
    apps.sort_by(|a, b| b.reviews.cmp(&a.reviews));

    let mut seen = HashSet::new();
    apps.retain(|a| seen.insert(a.app.clone()));
}

/// Number of rows whose app name already appeared earlier in the table.
pub fn count_duplicate_apps(apps: &[AppRecord]) -> usize {
    let mut seen = HashSet::new();
    apps.iter().filter(|a| !seen.insert(a.app.as_str())).count()
}
