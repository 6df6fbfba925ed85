//! End-to-end analysis: load, clean, segment, label and price.

use anyhow::{Context, Result};
use tracing::info;

use crate::analyzers::aggregate::{PricingOutcome, price_apps};
use crate::analyzers::criteria::{CriterionMeans, label_all};
use crate::analyzers::segment::{Segmentation, segment};
use crate::cleaner::{CleanedTable, clean};
use crate::config::AnalysisConfig;
use crate::loader::load_records;
use crate::stats::AnalysisSummary;

/// Everything produced by a single analysis run.
#[derive(Debug)]
pub struct Analysis {
    pub segmentation: Segmentation,
    pub means: CriterionMeans,
    pub pricing: PricingOutcome,
    pub summary: AnalysisSummary,
}

/// Loads `path` and cleans it into the paid-app table.
///
/// Returns the table together with the number of malformed rows dropped.
#[tracing::instrument(skip(config))]
pub fn load_and_clean(path: &str, config: &AnalysisConfig) -> Result<(CleanedTable, usize)> {
    let loaded = load_records(path).with_context(|| format!("failed to read {path}"))?;
    info!(
        rows = loaded.total_rows,
        malformed = loaded.malformed_rows,
        "Dataset loaded"
    );

    let table = clean(loaded.records, &config.known_duplicates)
        .with_context(|| format!("failed to clean {path}"))?;
    Ok((table, loaded.malformed_rows))
}

/// Runs the full pricing analysis over the CSV at `path`.
#[tracing::instrument(skip(config))]
pub fn run(path: &str, config: &AnalysisConfig) -> Result<Analysis> {
    config.thresholds.validate()?;
    let (table, malformed_rows) = load_and_clean(path, config)?;
    let cleaning = table.report;

    let segmentation = segment(table.apps, &config.thresholds);
    let means = CriterionMeans::from_apps(&segmentation.apps);

    let criteria = label_all(&segmentation.apps, &means)?;
    let pricing = price_apps(&segmentation.apps, &criteria, &means)?;

    let summary =
        AnalysisSummary::from_analysis(malformed_rows, &cleaning, &segmentation, &pricing)
            .with_source(path);

    Ok(Analysis {
        segmentation,
        means,
        pricing,
        summary,
    })
}
