use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A conversation container owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    /// The unique identifier for the session.
    pub id: i64,
    /// The ID of the user who owns the session.
    pub user_id: i64,
    /// The timestamp when the session was created.
    pub created_at: DateTime<Utc>,
}
