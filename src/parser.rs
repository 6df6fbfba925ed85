//! Field parsers for raw Play Store CSV values.
//!
//! Each parser takes the raw string and the owning app's name, so a failure
//! can point at the offending row.

use crate::error::{PricingError, Result};

/// Sentinel the store uses when an app's size depends on the device.
pub const VARIES_WITH_DEVICE: &str = "Varies with device";

/// Parses a price such as `"$4.99"` or `"0"` into a non-negative float.
///
/// # Errors
///
/// Returns [`PricingError::Parse`] if the value without its `$` prefix is not a
/// finite, non-negative number.
pub fn parse_price(raw: &str, app: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);

    match digits.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(PricingError::parse("Price", raw, app)),
    }
}

/// Parses a size such as `"19M"` or `"14k"` into megabytes.
///
/// Kilobyte values are divided by 1000. `"Varies with device"` yields `None`.
pub fn parse_size(raw: &str, app: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed == VARIES_WITH_DEVICE {
        return Ok(None);
    }

    let without_mb = trimmed.replace('M', "");
    let parsed = match without_mb.strip_suffix('k') {
        Some(kb) => kb.parse::<f64>().map(|v| v / 1000.0),
        None => without_mb.parse::<f64>(),
    };

    parsed
        .map(Some)
        .map_err(|_| PricingError::parse("Size", raw, app))
}

/// Parses a plain review count.
pub fn parse_reviews(raw: &str, app: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| PricingError::parse("Reviews", raw, app))
}

/// Parses an install bucket such as `"10,000+"` into an integer.
pub fn parse_installs(raw: &str, app: &str) -> Result<u64> {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '+' && *c != ',')
        .collect();

    digits
        .parse::<u64>()
        .map_err(|_| PricingError::parse("Installs", raw, app))
}

/// Parses a star rating. Empty cells and `NaN` mean the app is unrated.
pub fn parse_rating(raw: &str, app: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(rating) if rating.is_nan() => Ok(None),
        Ok(rating) => Ok(Some(rating)),
        Err(_) => Err(PricingError::parse("Rating", raw, app)),
    }
}

/// Counts semicolon-separated genre tags.
pub fn genre_count(genres: &str) -> usize {
    genres.matches(';').count() + 1
}
