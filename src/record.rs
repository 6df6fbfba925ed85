//! Row types for the Play Store table, before and after cleaning.

use serde::{Deserialize, Serialize};

/// A single CSV row with every field still in its raw string form.
///
/// Columns are matched by header name, so extra columns in the source file
/// (`Last Updated`, `Current Ver`, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "App")]
    pub app: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Rating", default)]
    pub rating: String,
    #[serde(rename = "Reviews")]
    pub reviews: String,
    #[serde(rename = "Size")]
    pub size: String,
    #[serde(rename = "Installs")]
    pub installs: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Content Rating", default)]
    pub content_rating: String,
    #[serde(rename = "Genres")]
    pub genres: String,
}

/// A cleaned paid app with numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppRecord {
    #[serde(rename = "App")]
    pub app: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "Reviews")]
    pub reviews: u64,
    /// Size in megabytes; `None` when the store reports "Varies with device".
    #[serde(rename = "Size")]
    pub size_mb: Option<f64>,
    #[serde(rename = "Installs")]
    pub installs: u64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Content Rating")]
    pub content_rating: String,
    #[serde(rename = "Genres")]
    pub genres: String,
}

impl AppRecord {
    /// Number of genre tags, i.e. one more than the number of `;` separators.
    pub fn genre_count(&self) -> usize {
        crate::parser::genre_count(&self.genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_count() {
        let mut app = AppRecord {
            app: "Toca Life: City".to_string(),
            category: "FAMILY".to_string(),
            rating: Some(4.7),
            reviews: 31085,
            size_mb: Some(24.0),
            installs: 500_000,
            price: 3.99,
            content_rating: "Everyone".to_string(),
            genres: "Education;Pretend Play".to_string(),
        };
        assert_eq!(app.genre_count(), 2);

        app.genres = "Puzzle".to_string();
        assert_eq!(app.genre_count(), 1);
    }
}
