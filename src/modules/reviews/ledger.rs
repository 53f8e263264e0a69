//! Review submission and listing.

use std::sync::Arc;

use lyrical_db::{NewReview, Review, ReviewRepository, StoreError, UserRepository};
use thiserror::Error;

use super::models::{FieldError, ReviewSubmission};

/// Display name stored when the submitter cannot be resolved
pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("review submission is invalid")]
    Invalid(Vec<FieldError>),

    #[error("book '{0}' does not exist")]
    BookNotFound(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::BookNotFound(id) => LedgerError::BookNotFound(id),
            other => LedgerError::Store(other),
        }
    }
}

pub struct ReviewLedger {
    reviews: Arc<dyn ReviewRepository>,
    users: Arc<dyn UserRepository>,
}

impl ReviewLedger {
    pub fn new(reviews: Arc<dyn ReviewRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { reviews, users }
    }

    /// Validate and store a review, refreshing the book's rating stats.
    ///
    /// Nothing is stored when validation fails or the book does not exist.
    pub async fn submit(&self, submission: ReviewSubmission) -> Result<Review, LedgerError> {
        submission.validate().map_err(LedgerError::Invalid)?;

        let ReviewSubmission {
            book_id,
            user_id,
            rating,
            review_text,
        } = submission;
        let user_id = user_id.unwrap_or_default();

        let username = match self.users.find_user(&user_id).await? {
            Some(user) => user.username,
            None => {
                tracing::warn!(user_id = %user_id, "review submitted by unknown user");
                ANONYMOUS.to_string()
            }
        };

        let appended = self
            .reviews
            .append_review(NewReview {
                book_id,
                user_id,
                username,
                rating,
                review_text,
            })
            .await?;

        tracing::info!(
            review_id = %appended.review.id,
            book_id = %appended.book.id,
            rating = appended.review.rating,
            average_rating = appended.book.average_rating,
            reviews_count = appended.book.reviews_count,
            "review submitted"
        );

        Ok(appended.review)
    }

    pub async fn for_book(&self, book_id: &str) -> Result<Vec<Review>, StoreError> {
        self.reviews.reviews_for_book(book_id).await
    }

    pub async fn by_user(&self, user_id: &str) -> Result<Vec<Review>, StoreError> {
        self.reviews.reviews_by_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyrical_db::seed::{seed_data, SeedData};
    use lyrical_db::{BookRepository, MemoryStore};

    fn ledger_over(store: Arc<MemoryStore>) -> ReviewLedger {
        ReviewLedger::new(store.clone(), store)
    }

    fn submission(book_id: &str, user_id: &str, rating: f64, text: &str) -> ReviewSubmission {
        ReviewSubmission {
            book_id: book_id.to_string(),
            user_id: Some(user_id.to_string()),
            rating,
            review_text: text.to_string(),
        }
    }

    /// Seed catalog where book "1" has a single 5-star review
    fn single_review_seed() -> SeedData {
        let mut seed = seed_data();
        seed.reviews.retain(|r| r.id != "r2");
        seed
    }

    #[tokio::test]
    async fn submission_updates_average_and_count() {
        let store = Arc::new(MemoryStore::from_seed(single_review_seed()));
        let ledger = ledger_over(store.clone());

        let review = ledger
            .submit(submission("1", "user1", 3.0, "It was fine, a bit slow in places."))
            .await
            .unwrap();

        assert_eq!(review.username, "BookwormReader");
        assert_eq!(review.book_id, "1");

        let book = store.find_book("1").await.unwrap().unwrap();
        assert_eq!(book.average_rating, 4.0);
        assert_eq!(book.reviews_count, 2);
    }

    #[tokio::test]
    async fn average_tracks_every_submission() {
        let store = Arc::new(MemoryStore::seeded());
        let ledger = ledger_over(store.clone());
        let ratings = [4.0, 5.0, 2.0, 5.0, 1.0, 3.5];

        for (n, rating) in ratings.iter().enumerate() {
            ledger
                .submit(submission("5", "user2", *rating, "Practical and readable."))
                .await
                .unwrap();

            let book = store.find_book("5").await.unwrap().unwrap();
            let seen = &ratings[..=n];
            let mean = seen.iter().sum::<f64>() / seen.len() as f64;
            assert_eq!(book.reviews_count as usize, n + 1);
            assert_eq!(book.average_rating, (mean * 10.0).round() / 10.0);
        }
    }

    #[tokio::test]
    async fn invalid_submissions_change_nothing() {
        let store = Arc::new(MemoryStore::seeded());
        let ledger = ledger_over(store.clone());
        let before = store.find_book("1").await.unwrap();

        for bad in [
            submission("1", "user1", 0.0, "A perfectly long review."),
            submission("1", "user1", 6.0, "A perfectly long review."),
            submission("1", "user1", 4.0, "short"),
        ] {
            let err = ledger.submit(bad).await.unwrap_err();
            assert!(matches!(err, LedgerError::Invalid(_)));
        }

        assert_eq!(store.review_count().await, 4);
        assert_eq!(store.find_book("1").await.unwrap(), before);
    }

    #[tokio::test]
    async fn missing_user_id_is_rejected() {
        let store = Arc::new(MemoryStore::seeded());
        let ledger = ledger_over(store.clone());
        let mut s = submission("1", "user1", 4.0, "A perfectly long review.");
        s.user_id = None;

        let err = ledger.submit(s).await.unwrap_err();
        match err {
            LedgerError::Invalid(fields) => assert_eq!(fields[0].field, "userId"),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.review_count().await, 4);
    }

    #[tokio::test]
    async fn unknown_book_is_rejected() {
        let store = Arc::new(MemoryStore::seeded());
        let ledger = ledger_over(store.clone());

        let err = ledger
            .submit(submission("42", "user1", 4.0, "A perfectly long review."))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::BookNotFound(id) if id == "42"));
        assert_eq!(store.review_count().await, 4);
    }

    #[tokio::test]
    async fn unknown_user_is_stored_as_anonymous() {
        let store = Arc::new(MemoryStore::seeded());
        let ledger = ledger_over(store);

        let review = ledger
            .submit(submission("4", "ghost", 5.0, "Could not put it down."))
            .await
            .unwrap();
        assert_eq!(review.username, ANONYMOUS);
        assert_eq!(review.user_id, "ghost");
    }
}
