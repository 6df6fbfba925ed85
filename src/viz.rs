//! Price distribution charts per affordability tier, drawn with Plotters.

use std::path::{Path, PathBuf};

use anyhow::Result;
use plotters::prelude::*;
use tracing::info;

use crate::analyzers::segment::Segmentation;
use crate::analyzers::types::Tier;
use crate::analyzers::utility::histogram;
use crate::config::PriceThresholds;

fn tier_color(tier: Tier) -> RGBColor {
    match tier {
        Tier::Cheap => BLUE,
        Tier::Reasonable => RED,
    }
}

/// Price range drawn on the x axis for `tier`.
pub fn tier_range(tier: Tier, thresholds: &PriceThresholds) -> (f64, f64) {
    match tier {
        Tier::Cheap => (0.0, thresholds.cheap_below),
        Tier::Reasonable => (thresholds.cheap_below, thresholds.affordable_below),
    }
}

/// Draws a histogram of app prices within `tier`.
pub fn create_price_histogram(
    segmentation: &Segmentation,
    tier: Tier,
    thresholds: &PriceThresholds,
    bins: usize,
    output_path: &Path,
) -> Result<()> {
    let prices: Vec<f64> = segmentation.apps_in(tier).map(|a| a.price()).collect();
    let (lo, hi) = tier_range(tier, thresholds);
    let bins = bins.max(1);
    let counts = histogram(&prices, bins, lo, hi);
    let max_count = *counts.iter().max().unwrap_or(&1) as f64;
    let width = (hi - lo) / bins as f64;

    let root = BitMapBackend::new(output_path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Price distribution ({tier} apps)"), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(lo..hi, 0f64..(max_count.max(1.0) * 1.1))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Price ($)")
        .y_desc("Number of apps")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    let color = tier_color(tier);
    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let x0 = lo + i as f64 * width;
        Rectangle::new([(x0, 0.0), (x0 + width, count as f64)], color.filled())
    }))?;

    root.present()?;
    info!(path = %output_path.display(), tier = %tier, "Price histogram saved");

    Ok(())
}

/// Draws a price vs rating scatterplot for the rated apps in `tier`.
pub fn create_rating_scatter(
    segmentation: &Segmentation,
    tier: Tier,
    thresholds: &PriceThresholds,
    output_path: &Path,
) -> Result<()> {
    let pairs = segmentation.price_rating_pairs(tier);
    let (lo, hi) = tier_range(tier, thresholds);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Price vs rating ({tier} apps)"), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(lo..hi, 0f64..5.5f64)?;

    chart
        .configure_mesh()
        .x_desc("Price ($)")
        .y_desc("Rating")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    let color = tier_color(tier);
    chart.draw_series(
        pairs
            .iter()
            .map(|&(price, rating)| Circle::new((price, rating), 3, color.filled())),
    )?;

    root.present()?;
    info!(path = %output_path.display(), tier = %tier, points = pairs.len(), "Scatterplot saved");

    Ok(())
}

/// Renders every chart for both tiers into `dir` and returns the written paths.
pub fn generate_charts(
    segmentation: &Segmentation,
    thresholds: &PriceThresholds,
    bins: usize,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    thresholds.validate()?;
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for tier in Tier::ALL {
        let hist_path = dir.join(format!("{tier}_price_hist.png"));
        create_price_histogram(segmentation, tier, thresholds, bins, &hist_path)?;
        written.push(hist_path);

        let scatter_path = dir.join(format!("{tier}_price_vs_rating.png"));
        create_rating_scatter(segmentation, tier, thresholds, &scatter_path)?;
        written.push(scatter_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_range() {
        let t = PriceThresholds::default();
        assert_eq!(tier_range(Tier::Cheap, &t), (0.0, 5.0));
        assert_eq!(tier_range(Tier::Reasonable, &t), (5.0, 50.0));
    }

    #[test]
    fn test_generate_charts_rejects_empty_range() {
        let segmentation = Segmentation {
            apps: Vec::new(),
            tiers: Vec::new(),
        };
        let thresholds = PriceThresholds {
            cheap_below: 0.0,
            affordable_below: 50.0,
        };
        let dir = tempfile::tempdir().unwrap();

        let result = generate_charts(&segmentation, &thresholds, 20, dir.path());
        assert!(result.is_err());
        // nothing is drawn before the check
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_tier_colors_differ() {
        assert_ne!(
            tier_color(Tier::Cheap).rgb(),
            tier_color(Tier::Reasonable).rgb()
        );
    }
}
