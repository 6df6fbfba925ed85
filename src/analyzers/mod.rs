//! Affordability segmentation and pricing analysis.
//!
//! This module splits cleaned paid apps into price tiers, labels each app
//! against its tier, genre-count and category mean prices, and derives a
//! suggested price and revenue impact per app.

pub mod aggregate;
pub mod criteria;
pub mod segment;
pub mod types;
pub mod utility;
