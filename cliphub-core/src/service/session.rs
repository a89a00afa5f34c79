use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;

use crate::{
    models::User,
    repository::UserRepository,
    Error, Result,
};

/// A server-tracked authenticated identity, valid until logout.
///
/// The token is the username itself; users are the session lookup key and
/// carry no separate session id.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub established_at: DateTime<Utc>,
}

/// Authenticates credentials and tracks logged-in sessions in process.
#[derive(Clone)]
pub struct SessionManager {
    users: Arc<dyn UserRepository>,
    sessions: Arc<DashMap<String, DateTime<Utc>>>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("active_sessions", &self.sessions.len())
            .finish()
    }
}

impl SessionManager {
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Create an account and immediately establish a session for it.
    pub async fn register(&self, username: String, password: String) -> Result<(User, Session)> {
        if self.users.username_exists(&username).await? {
            return Err(Error::DuplicateUsername(username));
        }

        let user = User::new(username, password);
        let created = self.users.create(&user).await?;
        let session = self.establish(&created.username);

        info!(username = %created.username, "user registered");

        Ok((created, session))
    }

    /// Authenticate stored credentials and establish a session.
    ///
    /// An unknown username and a wrong password are deliberately
    /// indistinguishable to the caller. Passwords are compared with plain
    /// string equality.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let user = self
            .users
            .get_by_username(username)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if user.password != password {
            return Err(Error::InvalidCredentials);
        }

        let session = self.establish(&user.username);

        info!(username = %user.username, "user logged in");

        Ok(session)
    }

    /// Invalidate a session unconditionally.
    pub fn logout(&self, session: &Session) {
        self.sessions.remove(&session.token);

        info!(username = %session.token, "user logged out");
    }

    /// Resolve a session back to its user record.
    ///
    /// An unknown token, or a token whose user no longer resolves, yields
    /// no current user rather than an error.
    pub async fn current_user(&self, session: &Session) -> Result<Option<User>> {
        if !self.sessions.contains_key(&session.token) {
            return Ok(None);
        }

        self.users.get_by_username(&session.token).await
    }

    /// Number of currently established sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn establish(&self, username: &str) -> Session {
        let established_at = Utc::now();
        self.sessions.insert(username.to_string(), established_at);
        Session {
            token: username.to_string(),
            established_at,
        }
    }
}
