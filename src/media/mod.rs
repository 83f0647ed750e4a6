//! Media record types
//!
//! `MediaRecord` is the unit the screens pass around: one tracked title
//! with optional poster art and an optional user rating. Field names in
//! the serialized form match the stored JSON produced by earlier app
//! versions, so existing watchlists keep loading.

use serde::{Deserialize, Serialize};

/// Sentinel the upstream metadata APIs use for "no poster art"
pub const POSTER_NOT_AVAILABLE: &str = "N/A";

/// Lowest accepted user rating
pub const RATING_MIN: f64 = 0.0;

/// Highest accepted user rating
pub const RATING_MAX: f64 = 10.0;

/// A tracked media title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Stable external identifier (e.g. an IMDb id)
    pub id: String,
    /// Display title
    pub title: String,
    /// Poster reference: a URL, the "N/A" sentinel, or absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    /// User rating in [0, 10]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl MediaRecord {
    /// Create a record with no poster and no rating
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster: None,
            rating: None,
        }
    }

    /// Whether the record already carries poster art worth displaying
    ///
    /// The upstream APIs report missing art as the literal string "N/A",
    /// which is present but not usable.
    pub fn has_usable_poster(&self) -> bool {
        matches!(&self.poster, Some(p) if !p.is_empty() && p != POSTER_NOT_AVAILABLE)
    }

    /// Set the user rating, clamped into [0, 10]
    pub fn set_rating(&mut self, rating: f64) {
        self.rating = Some(rating.clamp(RATING_MIN, RATING_MAX));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_no_poster_or_rating() {
        let record = MediaRecord::new("tt1160419", "Dune");
        assert_eq!(record.id, "tt1160419");
        assert_eq!(record.title, "Dune");
        assert!(record.poster.is_none());
        assert!(record.rating.is_none());
    }

    #[test]
    fn test_url_poster_is_usable() {
        let mut record = MediaRecord::new("1", "Dune");
        record.poster = Some("https://img.example/p.jpg".to_string());
        assert!(record.has_usable_poster());
    }

    #[test]
    fn test_na_sentinel_poster_is_not_usable() {
        let mut record = MediaRecord::new("1", "Dune");
        record.poster = Some("N/A".to_string());
        assert!(!record.has_usable_poster());
    }

    #[test]
    fn test_absent_or_empty_poster_is_not_usable() {
        let mut record = MediaRecord::new("1", "Dune");
        assert!(!record.has_usable_poster());
        record.poster = Some(String::new());
        assert!(!record.has_usable_poster());
    }

    #[test]
    fn test_set_rating_clamps_into_range() {
        let mut record = MediaRecord::new("1", "Dune");
        record.set_rating(11.5);
        assert_eq!(record.rating, Some(10.0));
        record.set_rating(-3.0);
        assert_eq!(record.rating, Some(0.0));
        record.set_rating(7.5);
        assert_eq!(record.rating, Some(7.5));
    }

    #[test]
    fn test_serialized_field_names_match_stored_json() {
        let mut record = MediaRecord::new("tt1160419", "Dune");
        record.poster = Some("https://img.example/p.jpg".to_string());
        record.set_rating(8.0);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"id\":\"tt1160419\""));
        assert!(json.contains("\"title\":\"Dune\""));
        assert!(json.contains("\"poster\":\"https://img.example/p.jpg\""));
        assert!(json.contains("\"rating\":8.0"));
    }

    #[test]
    fn test_deserializes_record_without_optional_fields() {
        let record: MediaRecord =
            serde_json::from_str(r#"{"id":"1","title":"Dune"}"#).unwrap();
        assert!(record.poster.is_none());
        assert!(record.rating.is_none());
    }
}
