use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A catalog entry. `average_rating` and `reviews_count` are derived from the
/// book's reviews and only change when a review is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    /// Ordered genre tags
    pub genre: Vec<String>,
    pub summary: String,
    pub cover_image: String,
    /// Mean review rating rounded to one decimal place
    pub average_rating: f64,
    #[serde(default)]
    pub featured: bool,
    /// Short blurb shown on the details page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insight: Option<String>,
    #[serde(default)]
    pub reviews_count: u32,
}

/// A submitted review. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub book_id: String,
    pub user_id: String,
    /// Display name copied from the user at write time
    pub username: String,
    pub rating: f64,
    pub review_text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// A review ready to be stored; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub book_id: String,
    pub user_id: String,
    pub username: String,
    pub rating: f64,
    pub review_text: String,
}

/// Result of an append: the stored review and its book with refreshed stats.
#[derive(Debug, Clone, PartialEq)]
pub struct AppendedReview {
    pub review: Review,
    pub book: Book,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn book_serializes_with_camel_case_fields() {
        let book = Book {
            id: "9".to_string(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: vec!["Science Fiction".to_string()],
            summary: "Spice.".to_string(),
            cover_image: "https://placehold.co/300x450.png".to_string(),
            average_rating: 4.5,
            featured: false,
            ai_insight: None,
            reviews_count: 2,
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["averageRating"], 4.5);
        assert_eq!(value["reviewsCount"], 2);
        assert_eq!(value["coverImage"], "https://placehold.co/300x450.png");
        assert!(value.get("aiInsight").is_none());
    }

    #[test]
    fn review_timestamp_is_rfc3339() {
        let review = Review {
            id: "r1".to_string(),
            book_id: "1".to_string(),
            user_id: "user1".to_string(),
            username: "BookwormReader".to_string(),
            rating: 5.0,
            review_text: "Absolutely loved it.".to_string(),
            created_at: datetime!(2023-05-10 10:00 UTC),
        };

        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(value["createdAt"], "2023-05-10T10:00:00Z");
        assert_eq!(value["bookId"], "1");
    }
}
