//! Error type shared by the cleaning and analysis stages.

use thiserror::Error;

use crate::analyzers::types::Tier;

/// Failures raised while cleaning or analyzing the dataset.
///
/// Any of these aborts the run; the binary wraps them in [`anyhow::Error`].
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("cannot parse {field} value '{value}' for app '{app}'")]
    Parse {
        field: &'static str,
        value: String,
        app: String,
    },

    #[error("no mean price for group ({tier}, {group})")]
    MissingGroup { tier: Tier, group: String },

    #[error("invalid price thresholds: need 0 < cheap_below ({cheap_below}) < affordable_below ({affordable_below})")]
    InvalidThresholds {
        cheap_below: f64,
        affordable_below: f64,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PricingError {
    pub(crate) fn parse(field: &'static str, value: &str, app: &str) -> Self {
        PricingError::Parse {
            field,
            value: value.to_string(),
            app: app.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
