//! Conversions from storage and session errors into HTTP errors.

use lyrical_authz::SessionError;
use lyrical_db::StoreError;
use lyrical_http::error::AppError;

pub fn from_store(err: StoreError) -> AppError {
    match err {
        StoreError::BookNotFound(id) => AppError::not_found(format!("book '{id}' does not exist")),
        StoreError::DuplicateUser(id) => AppError::bad_request(format!("user '{id}' already exists")),
    }
}

pub fn from_session(err: SessionError) -> AppError {
    match err {
        SessionError::EmptyUsername => AppError::validation(
            vec![serde_json::json!({"field": "username", "error": "required"})],
            "username is required",
        ),
        SessionError::Store(e) => from_store(e),
    }
}
