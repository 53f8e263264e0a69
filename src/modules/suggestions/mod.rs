pub mod gemini;
pub mod generator;
pub mod models;
pub mod prompt;
pub mod requester;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use lyrical_http::error::AppError;
use lyrical_kernel::{InitCtx, Module};
use serde_json::json;

use models::{SuggestionRequest, SuggestionResponse};
use requester::SuggestionRequester;

/// Related-book suggestions for a freshly written review
pub struct SuggestionsModule {
    requester: Arc<SuggestionRequester>,
}

impl SuggestionsModule {
    pub fn new(requester: Arc<SuggestionRequester>) -> Self {
        Self { requester }
    }
}

#[async_trait]
impl Module for SuggestionsModule {
    fn name(&self) -> &'static str {
        "suggestions"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let enabled = ctx
            .settings
            .suggestions
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());

        if enabled {
            tracing::info!(
                module = self.name(),
                model = %ctx.settings.suggestions.model,
                "suggestions module initialized"
            );
        } else {
            tracing::warn!(
                module = self.name(),
                "no suggestions API key configured; suggestions will be empty"
            );
        }
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", post(suggest_books))
            .with_state(self.requester.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "post": {
                        "summary": "Suggest books similar to the one just reviewed",
                        "description": "Never fails on generator errors; returns an empty list instead.",
                        "tags": ["Suggestions"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/SuggestionRequest" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Suggested titles, excluding the reviewed book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/SuggestionResponse" }
                                    }
                                }
                            },
                            "400": {
                                "description": "Malformed request body",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "SuggestionRequest": {
                        "type": "object",
                        "properties": {
                            "reviewText": { "type": "string" },
                            "currentBookTitle": { "type": "string" }
                        },
                        "required": ["reviewText", "currentBookTitle"]
                    },
                    "SuggestionResponse": {
                        "type": "object",
                        "properties": {
                            "suggestedBooks": { "type": "array", "items": { "type": "string" } }
                        },
                        "required": ["suggestedBooks"]
                    }
                }
            }
        }))
    }
}

async fn suggest_books(
    State(requester): State<Arc<SuggestionRequester>>,
    payload: Result<Json<SuggestionRequest>, JsonRejection>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let suggested_books = requester.suggest(&request).await;
    Ok(Json(SuggestionResponse { suggested_books }))
}

/// Create a new instance of the suggestions module
pub fn create_module(requester: Arc<SuggestionRequester>) -> Arc<dyn Module> {
    Arc::new(SuggestionsModule::new(requester))
}
