use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{chat_session::ChatSession, message::Message, user::User};

/// The body returned by `POST /login`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

/// A chat session together with its messages.
#[derive(Debug, Serialize)]
pub struct ChatSessionResponse {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl ChatSessionResponse {
    pub fn new(session: ChatSession, messages: Vec<Message>) -> Self {
        Self {
            id: session.id,
            user_id: session.user_id,
            created_at: session.created_at,
            messages,
        }
    }
}

/// The public view of a user. Never includes the password digest.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub chat_sessions: Vec<ChatSessionResponse>,
    pub messages: Vec<Message>,
}

impl UserResponse {
    /// A user with no relationships loaded, as returned right after creation.
    pub fn bare(user: User) -> Self {
        Self::with_relations(user, Vec::new(), Vec::new())
    }

    pub fn with_relations(
        user: User,
        chat_sessions: Vec<ChatSessionResponse>,
        messages: Vec<Message>,
    ) -> Self {
        Self {
            id: user.id,
            email: user.email,
            chat_sessions,
            messages,
        }
    }
}
