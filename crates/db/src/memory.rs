//! Process-memory store backing every repository trait.

use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{AppendedReview, Book, NewReview, Review, User};
use crate::rating::RatingSummary;
use crate::repository::{BookRepository, ReviewRepository, UserRepository};
use crate::seed::{seed_data, SeedData};

#[derive(Debug, Default)]
struct Tables {
    books: Vec<Book>,
    reviews: Vec<Review>,
    users: Vec<User>,
}

/// In-memory store. Review appends and the book stat refresh share one write
/// guard, so readers never see a review without its updated aggregate.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    latency: Duration,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store populated with the bundled seed catalog
    pub fn seeded() -> Self {
        Self::from_seed(seed_data())
    }

    /// Store over `seed`. Books with reviews get their stats recomputed from
    /// those reviews; books without keep their seeded values.
    pub fn from_seed(seed: SeedData) -> Self {
        let SeedData {
            mut books,
            reviews,
            users,
        } = seed;
        for book in &mut books {
            refresh_stats(book, &reviews);
        }

        Self {
            tables: RwLock::new(Tables {
                books,
                reviews,
                users,
            }),
            latency: Duration::ZERO,
        }
    }

    /// Delay every operation to mimic a remote backend.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Number of stored reviews
    pub async fn review_count(&self) -> usize {
        self.tables.read().await.reviews.len()
    }
}

/// `r{n}` with n one past the collection size, skipping ids already taken.
fn next_review_id(reviews: &[Review]) -> String {
    let mut seq = reviews.len() + 1;
    loop {
        let id = format!("r{seq}");
        if !reviews.iter().any(|review| review.id == id) {
            return id;
        }
        seq += 1;
    }
}

/// Recompute average and count from `reviews`. No-op when the book has none.
fn refresh_stats(book: &mut Book, reviews: &[Review]) {
    let summary = RatingSummary::from_ratings(
        reviews
            .iter()
            .filter(|review| review.book_id == book.id)
            .map(|review| review.rating),
    );
    if let Some(summary) = summary {
        book.average_rating = summary.average;
        book.reviews_count = summary.count;
    }
}

fn newest_first(mut reviews: Vec<Review>) -> Vec<Review> {
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reviews
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn all_books(&self) -> Result<Vec<Book>, StoreError> {
        self.simulate_latency().await;
        Ok(self.tables.read().await.books.clone())
    }

    async fn find_book(&self, id: &str) -> Result<Option<Book>, StoreError> {
        self.simulate_latency().await;
        let tables = self.tables.read().await;
        Ok(tables.books.iter().find(|book| book.id == id).cloned())
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn reviews_for_book(&self, book_id: &str) -> Result<Vec<Review>, StoreError> {
        self.simulate_latency().await;
        let tables = self.tables.read().await;
        let reviews = tables
            .reviews
            .iter()
            .filter(|review| review.book_id == book_id)
            .cloned()
            .collect();
        Ok(newest_first(reviews))
    }

    async fn reviews_by_user(&self, user_id: &str) -> Result<Vec<Review>, StoreError> {
        self.simulate_latency().await;
        let tables = self.tables.read().await;
        let reviews = tables
            .reviews
            .iter()
            .filter(|review| review.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(reviews))
    }

    async fn append_review(&self, new_review: NewReview) -> Result<AppendedReview, StoreError> {
        self.simulate_latency().await;
        let mut tables = self.tables.write().await;
        let Tables { books, reviews, .. } = &mut *tables;

        let book = books
            .iter_mut()
            .find(|book| book.id == new_review.book_id)
            .ok_or_else(|| StoreError::BookNotFound(new_review.book_id.clone()))?;

        let review = Review {
            id: next_review_id(reviews),
            book_id: new_review.book_id,
            user_id: new_review.user_id,
            username: new_review.username,
            rating: new_review.rating,
            review_text: new_review.review_text,
            created_at: OffsetDateTime::now_utc(),
        };
        reviews.push(review.clone());
        refresh_stats(book, reviews);

        tracing::debug!(
            review_id = %review.id,
            book_id = %book.id,
            average_rating = book.average_rating,
            reviews_count = book.reviews_count,
            "review appended"
        );

        Ok(AppendedReview {
            review,
            book: book.clone(),
        })
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.simulate_latency().await;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|user| user.id == id).cloned())
    }

    async fn find_user_by_name(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.simulate_latency().await;
        let wanted = username.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|user| user.username.to_lowercase() == wanted)
            .cloned())
    }

    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        self.simulate_latency().await;
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|existing| existing.id == user.id) {
            return Err(StoreError::DuplicateUser(user.id));
        }
        tables.users.push(user.clone());
        Ok(user)
    }
}
