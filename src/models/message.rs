use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single message posted into a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// The session the message belongs to.
    pub session_id: i64,
    /// The author of the message.
    pub user_id: i64,
}
