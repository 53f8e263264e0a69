//! Storage seams. Handlers and services depend on these traits so the
//! in-memory store can be swapped for a real backend.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{AppendedReview, Book, NewReview, Review, User};

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Every book in catalog order
    async fn all_books(&self) -> Result<Vec<Book>, StoreError>;

    async fn find_book(&self, id: &str) -> Result<Option<Book>, StoreError>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Reviews for a book, newest first
    async fn reviews_for_book(&self, book_id: &str) -> Result<Vec<Review>, StoreError>;

    /// Reviews written by a user, newest first
    async fn reviews_by_user(&self, user_id: &str) -> Result<Vec<Review>, StoreError>;

    /// Store a review and refresh its book's rating stats as one step.
    ///
    /// Fails with [`StoreError::BookNotFound`] without storing anything when
    /// the book does not exist.
    async fn append_review(&self, review: NewReview) -> Result<AppendedReview, StoreError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Case-insensitive lookup by display name
    async fn find_user_by_name(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn insert_user(&self, user: User) -> Result<User, StoreError>;
}
