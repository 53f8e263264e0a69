//! Mock identity: login by display name, opaque session tokens, and token
//! resolution for request guards. No credentials are checked.

use std::collections::HashMap;
use std::sync::Arc;

use lyrical_db::{StoreError, User, UserRepository};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Prefix given to users created on first login
const AD_HOC_USER_PREFIX: &str = "temp-";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("username is required")]
    EmptyUsername,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// An issued session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Token -> user id map for the lifetime of the process
pub struct SessionStore {
    users: Arc<dyn UserRepository>,
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Log in as `username`, creating the user when the name is unknown.
    pub async fn login(&self, username: &str) -> Result<Session, SessionError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SessionError::EmptyUsername);
        }

        let user = match self.users.find_user_by_name(username).await? {
            Some(user) => user,
            None => {
                let user = User {
                    id: format!("{AD_HOC_USER_PREFIX}{}", Uuid::now_v7()),
                    username: username.to_string(),
                };
                tracing::info!(user_id = %user.id, "created user on first login");
                self.users.insert_user(user).await?
            }
        };

        let token = Uuid::new_v4().simple().to_string();
        self.sessions
            .write()
            .await
            .insert(token.clone(), user.id.clone());

        tracing::info!(user_id = %user.id, "session opened");
        Ok(Session { token, user })
    }

    /// Drop a session. Returns whether the token was known.
    pub async fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.write().await.remove(token);
        if let Some(user_id) = &removed {
            tracing::info!(user_id = %user_id, "session closed");
        }
        removed.is_some()
    }

    /// Resolve a token to its user.
    pub async fn resolve(&self, token: &str) -> Result<Option<User>, SessionError> {
        let user_id = match self.sessions.read().await.get(token) {
            Some(user_id) => user_id.clone(),
            None => return Ok(None),
        };
        Ok(self.users.find_user(&user_id).await?)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyrical_db::MemoryStore;

    fn sessions() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStore::seeded()))
    }

    #[tokio::test]
    async fn login_finds_seeded_user_ignoring_case() {
        let store = sessions();
        let session = store.login("  novellover23 ").await.unwrap();
        assert_eq!(session.user.id, "user2");
        assert_eq!(session.user.username, "NovelLover23");
    }

    #[tokio::test]
    async fn login_with_unknown_name_creates_a_user() {
        let store = sessions();
        let session = store.login("NewReader").await.unwrap();
        assert!(session.user.id.starts_with(AD_HOC_USER_PREFIX));

        let again = store.login("newreader").await.unwrap();
        assert_eq!(again.user, session.user);
        assert_ne!(again.token, session.token);
    }

    #[tokio::test]
    async fn blank_username_is_rejected() {
        let err = sessions().login("   ").await.unwrap_err();
        assert!(matches!(err, SessionError::EmptyUsername));
    }

    #[tokio::test]
    async fn tokens_resolve_until_logout() {
        let store = sessions();
        let session = store.login("StorySeeker").await.unwrap();

        let resolved = store.resolve(&session.token).await.unwrap();
        assert_eq!(resolved.map(|u| u.id), Some("user3".to_string()));

        assert!(store.logout(&session.token).await);
        assert!(!store.logout(&session.token).await);
        assert_eq!(store.resolve(&session.token).await.unwrap(), None);
    }

    #[test]
    fn bearer_header_parsing() {
        assert_eq!(bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(bearer_token("bearer   abc123 "), Some("abc123"));
        assert_eq!(bearer_token("Basic abc123"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc123"), None);
    }
}
