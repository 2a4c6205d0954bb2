use async_trait::async_trait;
use deadpool_postgres::Pool;

use crate::{
    error::Result,
    models::{chat_session::ChatSession, message::Message, page::Page, user::User},
    repositories::{chat_session as session_repo, message as message_repo, user as user_repo},
};

/// Create/read access to users, chat sessions and messages.
///
/// Nothing is ever updated or deleted. Implementations report a duplicate
/// email as `AppError::Conflict` and a dangling foreign key as
/// `AppError::NotFound`.
#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn insert_user(&self, email: &str, hashed_password: &str) -> Result<User>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_user_by_id(&self, user_id: i64) -> Result<Option<User>>;
    async fn list_users(&self, page: Page) -> Result<Vec<User>>;

    async fn insert_session(&self, user_id: i64) -> Result<ChatSession>;
    async fn find_session(&self, session_id: i64) -> Result<Option<ChatSession>>;
    async fn list_sessions_for_user(&self, user_id: i64) -> Result<Vec<ChatSession>>;

    async fn insert_message(&self, session_id: i64, user_id: i64, text: &str) -> Result<Message>;
    async fn list_messages_for_session(&self, session_id: i64, page: Page) -> Result<Vec<Message>>;
    async fn list_messages_for_user(&self, user_id: i64, page: Page) -> Result<Vec<Message>>;
}

/// PostgreSQL-backed store. Each call checks a connection out of the pool
/// and hands it back when the call returns.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatStore for PgStore {
    async fn insert_user(&self, email: &str, hashed_password: &str) -> Result<User> {
        user_repo::create_user(&self.pool, email, hashed_password).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        user_repo::find_by_email(&self.pool, email).await
    }

    async fn find_user_by_id(&self, user_id: i64) -> Result<Option<User>> {
        user_repo::find_by_id(&self.pool, user_id).await
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>> {
        user_repo::list(&self.pool, page).await
    }

    async fn insert_session(&self, user_id: i64) -> Result<ChatSession> {
        session_repo::create_session(&self.pool, user_id).await
    }

    async fn find_session(&self, session_id: i64) -> Result<Option<ChatSession>> {
        session_repo::find_by_id(&self.pool, session_id).await
    }

    async fn list_sessions_for_user(&self, user_id: i64) -> Result<Vec<ChatSession>> {
        session_repo::list_for_user(&self.pool, user_id).await
    }

    async fn insert_message(&self, session_id: i64, user_id: i64, text: &str) -> Result<Message> {
        message_repo::create_message(&self.pool, session_id, user_id, text).await
    }

    async fn list_messages_for_session(&self, session_id: i64, page: Page) -> Result<Vec<Message>> {
        message_repo::list_for_session(&self.pool, session_id, page).await
    }

    async fn list_messages_for_user(&self, user_id: i64, page: Page) -> Result<Vec<Message>> {
        message_repo::list_for_user(&self.pool, user_id, page).await
    }
}
