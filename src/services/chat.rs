use crate::{
    error::{AppError, Result},
    models::{
        chat_session::ChatSession,
        message::Message,
        page::Page,
        responses::{ChatSessionResponse, UserResponse},
        user::User,
    },
    repositories::store::ChatStore,
};

/// Creates a new chat session owned by `user`.
pub async fn create_session(store: &dyn ChatStore, user: &User) -> Result<ChatSession> {
    let session = store.insert_session(user.id).await?;
    tracing::info!("✅ Chat session {} created for user {}", session.id, user.id);
    Ok(session)
}

/// Posts a message into an existing session.
///
/// The session must exist. It does not have to belong to `author`.
pub async fn post_message(
    store: &dyn ChatStore,
    author: &User,
    session_id: i64,
    text: &str,
) -> Result<Message> {
    store
        .find_session(session_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let message = store.insert_message(session_id, author.id, text).await?;
    tracing::debug!(
        "Message {} posted to session {} by user {}",
        message.id,
        session_id,
        author.id
    );
    Ok(message)
}

/// Lists a session's messages in creation order.
///
/// An unknown session simply has no messages.
pub async fn list_messages(store: &dyn ChatStore, session_id: i64, page: Page) -> Result<Vec<Message>> {
    store.list_messages_for_session(session_id, page).await
}

/// Lists users, without their relationships.
pub async fn list_users(store: &dyn ChatStore, page: Page) -> Result<Vec<UserResponse>> {
    Ok(store
        .list_users(page)
        .await?
        .into_iter()
        .map(UserResponse::bare)
        .collect())
}

/// Loads a user with its sessions and authored messages.
///
/// Each relationship is one explicit query and is loaded in full.
pub async fn user_profile(store: &dyn ChatStore, user_id: i64) -> Result<UserResponse> {
    let user = store
        .find_user_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut chat_sessions = Vec::new();
    for session in store.list_sessions_for_user(user.id).await? {
        let messages = store
            .list_messages_for_session(session.id, Page::ALL)
            .await?;
        chat_sessions.push(ChatSessionResponse::new(session, messages));
    }

    let messages = store
        .list_messages_for_user(user.id, Page::ALL)
        .await?;

    Ok(UserResponse::with_relations(user, chat_sessions, messages))
}
