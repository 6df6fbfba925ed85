//! CLI entry point for the Play Store pricing analysis.
//!
//! Provides subcommands for running the full affordability / pricing-impact
//! analysis and for exporting the cleaned paid-app table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use playstore_pricing::analyzers::types::Tier;
use playstore_pricing::config::AnalysisConfig;
use playstore_pricing::output::{append_record, print_json, print_pretty, write_records};
use playstore_pricing::pipeline::{load_and_clean, run};
use playstore_pricing::viz::generate_charts;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "playstore_pricing")]
#[command(about = "Affordability and pricing-impact analysis of Play Store apps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pricing analysis on a Play Store CSV
    Analyze {
        /// Path to the Play Store CSV
        #[arg(value_name = "FILE", default_value = "googleplaystore.csv")]
        input: String,

        /// JSON file overriding thresholds and known duplicates
        #[arg(short, long)]
        config: Option<String>,

        /// Write the annotated affordable apps to this CSV
        #[arg(short, long)]
        output: Option<String>,

        /// CSV file to append the run summary to
        #[arg(short, long)]
        summary: Option<String>,

        /// Directory to render price histograms and scatterplots into
        #[arg(long)]
        charts: Option<String>,

        /// Log the run summary as pretty JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Clean the dataset and export the deduplicated paid apps
    Clean {
        /// Path to the Play Store CSV
        #[arg(value_name = "FILE", default_value = "googleplaystore.csv")]
        input: String,

        /// JSON file overriding thresholds and known duplicates
        #[arg(short, long)]
        config: Option<String>,

        /// CSV file to write the cleaned paid apps to
        #[arg(short, long, default_value = "paid_apps.csv")]
        output: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/playstore_pricing.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("playstore_pricing.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            config,
            output,
            summary,
            charts,
            json,
        } => {
            let config = load_config(config.as_deref())?;
            let analysis = run(&input, &config)?;

            for tier in Tier::ALL {
                if let Some(t) = analysis.segmentation.tier(tier) {
                    info!(
                        tier = %tier,
                        apps = t.count,
                        mean_price = ?t.mean_price,
                        price_rating_corr = ?t.price_rating_correlation,
                        "Tier summary"
                    );
                }
            }
            info!(
                affordable = analysis.summary.affordable_apps,
                below_mean = analysis.summary.below_mean_apps,
                below_mean_pct = analysis.summary.below_mean_pct,
                total_impact = analysis.summary.total_impact,
                "Analysis complete"
            );

            print_pretty(&analysis.summary);
            if json {
                print_json(&analysis.summary)?;
            }

            if let Some(path) = output {
                write_records(&path, &analysis.pricing.apps)?;
            }

            if let Some(path) = summary {
                append_record(&path, &analysis.summary)?;
            }

            if let Some(dir) = charts {
                let written = generate_charts(
                    &analysis.segmentation,
                    &config.thresholds,
                    config.histogram_bins,
                    Path::new(&dir),
                )?;
                info!(charts = written.len(), dir = %dir, "Charts rendered");
            }
        }
        Commands::Clean {
            input,
            config,
            output,
        } => {
            let config = load_config(config.as_deref())?;
            let (table, malformed) = load_and_clean(&input, &config)?;

            info!(
                malformed,
                paid = table.report.paid_rows,
                unique = table.report.unique_apps,
                "Cleaning complete"
            );
            write_records(&output, &table.apps)?;
        }
    }

    Ok(())
}

/// Loads the analysis config from `path`, falling back to defaults.
fn load_config(path: Option<&str>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => {
            info!(path, "Loading analysis config");
            Ok(AnalysisConfig::load(path)?)
        }
        None => Ok(AnalysisConfig::default()),
    }
}
