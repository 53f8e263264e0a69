pub mod ledger;
pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lyrical_authz::SessionStore;
use lyrical_db::Review;
use lyrical_http::error::AppError;
use lyrical_kernel::{InitCtx, Module};
use serde_json::json;

use crate::error::from_store;
use crate::modules::users::extract::CurrentUser;
use ledger::{LedgerError, ReviewLedger};
use models::ReviewSubmission;

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Invalid(fields) => {
                let message = fields
                    .first()
                    .map(|field| field.message.clone())
                    .unwrap_or_else(|| "Review submission is invalid.".to_string());
                let details = fields
                    .iter()
                    .map(|field| serde_json::to_value(field).unwrap_or_default())
                    .collect();
                AppError::validation(details, message)
            }
            LedgerError::BookNotFound(id) => {
                AppError::not_found(format!("book '{id}' does not exist"))
            }
            LedgerError::Store(e) => from_store(e),
        }
    }
}

#[derive(Clone)]
pub struct ReviewsState {
    pub ledger: Arc<ReviewLedger>,
    pub sessions: Arc<SessionStore>,
}

impl FromRef<ReviewsState> for Arc<SessionStore> {
    fn from_ref(state: &ReviewsState) -> Self {
        state.sessions.clone()
    }
}

/// Review submission and listing
pub struct ReviewsModule {
    state: ReviewsState,
}

impl ReviewsModule {
    pub fn new(state: ReviewsState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for ReviewsModule {
    fn name(&self) -> &'static str {
        "reviews"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "reviews module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", post(submit_review))
            .route("/book/{book_id}", get(reviews_for_book))
            .route("/user/{user_id}", get(reviews_by_user))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "description": "Error",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let review_list = json!({
            "description": "Reviews, newest first",
            "content": {
                "application/json": {
                    "schema": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/Review" }
                    }
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "post": {
                        "summary": "Submit a review",
                        "description": "Requires a bearer token. Updates the book's average rating and review count.",
                        "tags": ["Reviews"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ReviewSubmission" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Review stored",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Review" }
                                    }
                                }
                            },
                            "401": error,
                            "403": error,
                            "404": error,
                            "422": error
                        }
                    }
                },
                "/book/{book_id}": {
                    "get": {
                        "summary": "Reviews for a book",
                        "tags": ["Reviews"],
                        "parameters": [
                            { "name": "book_id", "in": "path", "required": true, "schema": { "type": "string" } }
                        ],
                        "responses": { "200": review_list }
                    }
                },
                "/user/{user_id}": {
                    "get": {
                        "summary": "Reviews written by a user",
                        "tags": ["Reviews"],
                        "parameters": [
                            { "name": "user_id", "in": "path", "required": true, "schema": { "type": "string" } }
                        ],
                        "responses": { "200": review_list }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Review": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "bookId": { "type": "string" },
                            "userId": { "type": "string" },
                            "username": { "type": "string" },
                            "rating": { "type": "number", "minimum": 1, "maximum": 5 },
                            "reviewText": { "type": "string" },
                            "createdAt": { "type": "string", "format": "date-time" }
                        },
                        "required": ["id", "bookId", "userId", "username", "rating", "reviewText", "createdAt"]
                    },
                    "ReviewSubmission": {
                        "type": "object",
                        "properties": {
                            "bookId": { "type": "string" },
                            "userId": {
                                "type": "string",
                                "description": "Defaults to the session user; must match it when given"
                            },
                            "rating": { "type": "number", "minimum": 1, "maximum": 5 },
                            "reviewText": { "type": "string", "minLength": 10, "maxLength": 2000 }
                        },
                        "required": ["bookId", "rating", "reviewText"]
                    }
                }
            }
        }))
    }
}

async fn submit_review(
    State(state): State<ReviewsState>,
    current: CurrentUser,
    payload: Result<Json<ReviewSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let Json(mut submission) =
        payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    // A blank userId is kept so validation rejects it as missing
    let claimed = submission.user_id.as_deref().map(|id| id.trim().to_string());
    match claimed.as_deref() {
        Some("") => {}
        Some(user_id) if user_id != current.user.id => {
            return Err(AppError::forbidden(
                "Reviews can only be submitted as the logged-in user.",
            ));
        }
        _ => submission.user_id = Some(current.user.id),
    }

    let review = state.ledger.submit(submission).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn reviews_for_book(
    State(state): State<ReviewsState>,
    Path(book_id): Path<String>,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = state.ledger.for_book(&book_id).await.map_err(from_store)?;
    Ok(Json(reviews))
}

async fn reviews_by_user(
    State(state): State<ReviewsState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = state.ledger.by_user(&user_id).await.map_err(from_store)?;
    Ok(Json(reviews))
}

/// Create a new instance of the reviews module
pub fn create_module(state: ReviewsState) -> Arc<dyn Module> {
    Arc::new(ReviewsModule::new(state))
}
