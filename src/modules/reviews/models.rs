use serde::{Deserialize, Serialize};

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;
pub const MIN_REVIEW_CHARS: usize = 10;
pub const MAX_REVIEW_CHARS: usize = 2000;

/// Review submission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub book_id: String,
    /// Filled from the session when omitted
    #[serde(default)]
    pub user_id: Option<String>,
    pub rating: f64,
    pub review_text: String,
}

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub error: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            error,
            message: message.into(),
        }
    }
}

impl ReviewSubmission {
    /// Check every constraint, reporting all failures at once.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.user_id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            errors.push(FieldError::new(
                "userId",
                "required",
                "User ID is required to submit a review.",
            ));
        }

        if self.book_id.trim().is_empty() {
            errors.push(FieldError::new("bookId", "required", "Book ID is required."));
        }

        if !self.rating.is_finite() || self.rating < MIN_RATING || self.rating > MAX_RATING {
            errors.push(FieldError::new(
                "rating",
                "out_of_range",
                format!("Rating must be between {MIN_RATING} and {MAX_RATING}."),
            ));
        }

        let chars = self.review_text.chars().count();
        if chars < MIN_REVIEW_CHARS {
            errors.push(FieldError::new(
                "reviewText",
                "too_short",
                format!("Review must be at least {MIN_REVIEW_CHARS} characters long."),
            ));
        } else if chars > MAX_REVIEW_CHARS {
            errors.push(FieldError::new(
                "reviewText",
                "too_long",
                format!("Review must be {MAX_REVIEW_CHARS} characters or less."),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(rating: f64, text: &str) -> ReviewSubmission {
        ReviewSubmission {
            book_id: "1".to_string(),
            user_id: Some("user1".to_string()),
            rating,
            review_text: text.to_string(),
        }
    }

    fn failed_fields(result: Result<(), Vec<FieldError>>) -> Vec<&'static str> {
        result.unwrap_err().iter().map(|e| e.field).collect()
    }

    #[test]
    fn accepts_bounds() {
        assert!(submission(1.0, "0123456789").validate().is_ok());
        assert!(submission(5.0, &"x".repeat(2000)).validate().is_ok());
        assert!(submission(3.5, "Half stars are fine.").validate().is_ok());
    }

    #[test]
    fn rejects_ratings_outside_range() {
        for rating in [0.0, 0.99, 5.01, 6.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                failed_fields(submission(rating, "Long enough text").validate()),
                vec!["rating"],
                "rating {rating}"
            );
        }
    }

    #[test]
    fn rejects_text_length() {
        let short = submission(4.0, "short").validate().unwrap_err();
        assert_eq!(short[0].error, "too_short");

        let long = submission(4.0, &"x".repeat(2001)).validate().unwrap_err();
        assert_eq!(long[0].error, "too_long");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(submission(4.0, "ééééééééé").validate().is_err());
        assert!(submission(4.0, "éééééééééé").validate().is_ok());
    }

    #[test]
    fn missing_user_is_rejected() {
        let mut s = submission(4.0, "Long enough text");
        s.user_id = None;
        assert_eq!(failed_fields(s.validate()), vec!["userId"]);

        s.user_id = Some("  ".to_string());
        assert_eq!(failed_fields(s.validate()), vec!["userId"]);
    }

    #[test]
    fn reports_every_failure() {
        let mut s = submission(0.0, "tiny");
        s.user_id = None;
        assert_eq!(failed_fields(s.validate()), vec!["userId", "rating", "reviewText"]);
    }
}
