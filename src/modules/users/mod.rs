pub mod extract;
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
use lyrical_db::{User, UserRepository};
use lyrical_http::error::AppError;
use lyrical_kernel::{InitCtx, Module};
use serde_json::json;

use crate::error::{from_session, from_store};
use extract::CurrentUser;
use models::{LoginRequest, LoginResponse};

#[derive(Clone)]
pub struct UsersState {
    pub sessions: Arc<SessionStore>,
    pub users: Arc<dyn UserRepository>,
}

impl FromRef<UsersState> for Arc<SessionStore> {
    fn from_ref(state: &UsersState) -> Self {
        state.sessions.clone()
    }
}

/// Mock login, logout and profile lookup
pub struct UsersModule {
    state: UsersState,
}

impl UsersModule {
    pub fn new(state: UsersState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for UsersModule {
    fn name(&self) -> &'static str {
        "users"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "users module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/login", post(login))
            .route("/logout", post(logout))
            .route("/me", get(me))
            .route("/{id}", get(get_profile))
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
        let user = json!({
            "description": "User",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/User" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/login": {
                    "post": {
                        "summary": "Log in by display name, creating the user if needed",
                        "tags": ["Users"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": { "username": { "type": "string" } },
                                        "required": ["username"]
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Session opened",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/LoginResponse" }
                                    }
                                }
                            },
                            "422": error
                        }
                    }
                },
                "/logout": {
                    "post": {
                        "summary": "End the current session",
                        "tags": ["Users"],
                        "responses": { "204": { "description": "Session closed" }, "401": error }
                    }
                },
                "/me": {
                    "get": {
                        "summary": "Current user",
                        "tags": ["Users"],
                        "responses": { "200": user, "401": error }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "User profile",
                        "tags": ["Users"],
                        "parameters": [
                            { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }
                        ],
                        "responses": { "200": user, "404": error }
                    }
                }
            },
            "components": {
                "schemas": {
                    "User": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "username": { "type": "string" }
                        },
                        "required": ["id", "username"]
                    },
                    "LoginResponse": {
                        "type": "object",
                        "properties": {
                            "token": { "type": "string", "description": "Bearer token" },
                            "user": { "$ref": "#/components/schemas/User" }
                        },
                        "required": ["token", "user"]
                    }
                }
            }
        }))
    }
}

async fn login(
    State(state): State<UsersState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let session = state
        .sessions
        .login(&request.username)
        .await
        .map_err(from_session)?;

    Ok(Json(LoginResponse {
        token: session.token,
        user: session.user,
    }))
}

async fn logout(State(state): State<UsersState>, current: CurrentUser) -> StatusCode {
    state.sessions.logout(&current.token).await;
    StatusCode::NO_CONTENT
}

async fn me(current: CurrentUser) -> Json<User> {
    Json(current.user)
}

async fn get_profile(
    State(state): State<UsersState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    state
        .users
        .find_user(&id)
        .await
        .map_err(from_store)?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("user '{id}' does not exist")))
}

/// Create a new instance of the users module
pub fn create_module(state: UsersState) -> Arc<dyn Module> {
    Arc::new(UsersModule::new(state))
}
