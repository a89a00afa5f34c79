use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Registered account.
///
/// Users are created at registration and never updated or deleted through
/// any exposed operation. The unique `username` doubles as the session
/// identity token. The password is stored verbatim and compared with plain
/// string equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn new(username: String, password: String) -> Self {
        Self {
            id: UserId::new(),
            username,
            password,
            created_at: Utc::now(),
        }
    }
}
