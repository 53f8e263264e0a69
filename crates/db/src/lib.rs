//! Storage layer: domain records, repository traits and the in-memory store.

pub mod error;
pub mod memory;
pub mod models;
pub mod rating;
pub mod repository;
pub mod seed;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::{AppendedReview, Book, NewReview, Review, User};
pub use repository::{BookRepository, ReviewRepository, UserRepository};

/// Log the size of a freshly opened store.
pub async fn log_store_summary(store: &MemoryStore) -> Result<(), StoreError> {
    let books = store.all_books().await?;
    tracing::info!(
        target: "lyrical-db",
        books = books.len(),
        reviews = store.review_count().await,
        "in-memory store ready"
    );
    Ok(())
}
