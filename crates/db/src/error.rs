use thiserror::Error;

/// Errors raised by repository implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("book '{0}' does not exist")]
    BookNotFound(String),

    #[error("user '{0}' already exists")]
    DuplicateUser(String),
}
