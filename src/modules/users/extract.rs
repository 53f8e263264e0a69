//! Request guard resolving the bearer token to a logged-in user.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use lyrical_authz::{bearer_token, SessionStore};
use lyrical_db::User;
use lyrical_http::error::AppError;

use crate::error::from_session;

/// The user behind the request's session token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<SessionStore>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .map(str::to_string)
            .ok_or_else(|| AppError::unauthorized("You must be logged in to do that."))?;

        let sessions = Arc::<SessionStore>::from_ref(state);
        let user = sessions
            .resolve(&token)
            .await
            .map_err(from_session)?
            .ok_or_else(|| AppError::unauthorized("Session is invalid or has ended."))?;

        Ok(CurrentUser { user, token })
    }
}
