pub mod catalog;
pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use lyrical_db::Book;
use lyrical_http::error::AppError;
use lyrical_kernel::{InitCtx, Module};
use serde_json::json;

use crate::error::from_store;
use catalog::Catalog;
use models::{CatalogPage, CatalogQuery};

/// Catalog browsing: filtered listing, featured shelf and book details
pub struct BooksModule {
    catalog: Arc<Catalog>,
}

impl BooksModule {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            default_page_size = ctx.settings.catalog.default_page_size,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_books))
            .route("/featured", get(featured_books))
            .route("/{id}", get(get_book))
            .with_state(self.catalog.clone())
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

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "title", "in": "query", "schema": { "type": "string" } },
                            { "name": "author", "in": "query", "schema": { "type": "string" } },
                            { "name": "genre", "in": "query", "schema": { "type": "string" } },
                            { "name": "page", "in": "query", "schema": { "type": "integer", "minimum": 1 } },
                            { "name": "limit", "in": "query", "schema": { "type": "integer", "minimum": 1 } }
                        ],
                        "responses": {
                            "200": {
                                "description": "One page of matching books",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/CatalogPage" }
                                    }
                                }
                            },
                            "400": error
                        }
                    }
                },
                "/featured": {
                    "get": {
                        "summary": "Featured books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Books flagged as featured",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }
                        ],
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "404": error
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "array", "items": { "type": "string" } },
                            "summary": { "type": "string" },
                            "coverImage": { "type": "string" },
                            "averageRating": {
                                "type": "number",
                                "description": "Mean review rating, one decimal place"
                            },
                            "featured": { "type": "boolean" },
                            "aiInsight": { "type": "string" },
                            "reviewsCount": { "type": "integer" }
                        },
                        "required": ["id", "title", "author", "genre", "summary", "coverImage", "averageRating"]
                    },
                    "CatalogPage": {
                        "type": "object",
                        "properties": {
                            "books": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            },
                            "total": {
                                "type": "integer",
                                "description": "Matches before pagination"
                            },
                            "genres": { "type": "array", "items": { "type": "string" } }
                        },
                        "required": ["books", "total", "genres"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

async fn list_books(
    State(catalog): State<Arc<Catalog>>,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> Result<Json<CatalogPage>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let page = catalog.query(&query).await.map_err(from_store)?;
    Ok(Json(page))
}

async fn featured_books(State(catalog): State<Arc<Catalog>>) -> Result<Json<Vec<Book>>, AppError> {
    let books = catalog.featured().await.map_err(from_store)?;
    Ok(Json(books))
}

async fn get_book(
    State(catalog): State<Arc<Catalog>>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    catalog
        .book(&id)
        .await
        .map_err(from_store)?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("book '{id}' does not exist")))
}

/// Create a new instance of the books module
pub fn create_module(catalog: Arc<Catalog>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(catalog))
}
