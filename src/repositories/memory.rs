use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, Result},
    models::{chat_session::ChatSession, message::Message, page::Page, user::User},
    repositories::store::ChatStore,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    sessions: Vec<ChatSession>,
    messages: Vec<Message>,
}

/// In-process store with the same contract as the PostgreSQL one.
///
/// Rows are kept in insertion order and ids are `len + 1`, which matches
/// the `BIGSERIAL` numbering of a fresh database since nothing is deleted.
/// Selected with `DATABASE_URL=memory://`; also backs the test suite.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn window<T>(rows: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    rows.skip(page.skip.max(0) as usize)
        .take(page.limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn insert_user(&self, email: &str, hashed_password: &str) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == email) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let user = User {
            id: tables.users.len() as i64 + 1,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(window(tables.users.iter().cloned(), page))
    }

    async fn insert_session(&self, user_id: i64) -> Result<ChatSession> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(AppError::NotFound);
        }

        let session = ChatSession {
            id: tables.sessions.len() as i64 + 1,
            user_id,
            created_at: Utc::now(),
        };
        tables.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_session(&self, session_id: i64) -> Result<Option<ChatSession>> {
        let tables = self.tables.read().await;
        Ok(tables.sessions.iter().find(|s| s.id == session_id).cloned())
    }

    async fn list_sessions_for_user(&self, user_id: i64) -> Result<Vec<ChatSession>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_message(&self, session_id: i64, user_id: i64, text: &str) -> Result<Message> {
        let mut tables = self.tables.write().await;
        if !tables.sessions.iter().any(|s| s.id == session_id)
            || !tables.users.iter().any(|u| u.id == user_id)
        {
            return Err(AppError::NotFound);
        }

        let message = Message {
            id: tables.messages.len() as i64 + 1,
            text: text.to_string(),
            created_at: Utc::now(),
            session_id,
            user_id,
        };
        tables.messages.push(message.clone());
        Ok(message)
    }

    async fn list_messages_for_session(&self, session_id: i64, page: Page) -> Result<Vec<Message>> {
        let tables = self.tables.read().await;
        Ok(window(
            tables
                .messages
                .iter()
                .filter(|m| m.session_id == session_id)
                .cloned(),
            page,
        ))
    }

    async fn list_messages_for_user(&self, user_id: i64, page: Page) -> Result<Vec<Message>> {
        let tables = self.tables.read().await;
        Ok(window(
            tables
                .messages
                .iter()
                .filter(|m| m.user_id == user_id)
                .cloned(),
            page,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        let first = store.insert_user("a@x.com", "digest").await.unwrap();
        assert_eq!(first.id, 1);

        let second = store.insert_user("a@x.com", "other").await;
        assert!(matches!(second, Err(AppError::Conflict(_))));

        let third = store.insert_user("b@x.com", "digest").await.unwrap();
        assert_eq!(third.id, 2);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let store = MemoryStore::new();
        assert!(matches!(store.insert_session(7).await, Err(AppError::NotFound)));

        let user = store.insert_user("a@x.com", "digest").await.unwrap();
        assert!(matches!(
            store.insert_message(1, user.id, "hi").await,
            Err(AppError::NotFound)
        ));

        let session = store.insert_session(user.id).await.unwrap();
        assert!(matches!(
            store.insert_message(session.id, 99, "hi").await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn messages_are_filtered_by_session_and_windowed() {
        let store = MemoryStore::new();
        let user = store.insert_user("a@x.com", "digest").await.unwrap();
        let first = store.insert_session(user.id).await.unwrap();
        let second = store.insert_session(user.id).await.unwrap();

        for i in 0..5 {
            store
                .insert_message(first.id, user.id, &format!("first-{}", i))
                .await
                .unwrap();
            store
                .insert_message(second.id, user.id, &format!("second-{}", i))
                .await
                .unwrap();
        }

        let all = store
            .list_messages_for_session(first.id, Page::default())
            .await
            .unwrap();
        let texts: Vec<_> = all.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["first-0", "first-1", "first-2", "first-3", "first-4"]);

        let middle = store
            .list_messages_for_session(first.id, Page { skip: 1, limit: 2 })
            .await
            .unwrap();
        let texts: Vec<_> = middle.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["first-1", "first-2"]);

        let past_end = store
            .list_messages_for_session(first.id, Page { skip: 10, limit: 2 })
            .await
            .unwrap();
        assert!(past_end.is_empty());

        assert_eq!(
            store
                .list_messages_for_user(user.id, Page::default())
                .await
                .unwrap()
                .len(),
            10
        );
    }
}
