use axum::{extract::State, Extension, Json};
use garde::Validate;
use serde::Deserialize;

use crate::{
    error::Result,
    extractors::{AppJson, AppPath, AppQuery},
    models::{
        message::Message,
        page::PageQuery,
        responses::ChatSessionResponse,
        user::User,
    },
    services::chat as chat_service,
    state::AppState,
    validation::request::validated,
};

/// The request payload for posting a message.
#[derive(Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[garde(length(max = 10_000))]
    pub text: String,
}

/// Creates a chat session owned by the caller.
#[axum::debug_handler]
pub async fn create_session(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<ChatSessionResponse>> {
    let session = chat_service::create_session(state.store.as_ref(), &user).await?;
    Ok(Json(ChatSessionResponse::new(session, Vec::new())))
}

/// Posts a message into a session on behalf of the caller.
#[axum::debug_handler]
pub async fn create_message(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppPath(session_id): AppPath<i64>,
    AppJson(payload): AppJson<CreateMessageRequest>,
) -> Result<Json<Message>> {
    let payload = validated(payload)?;
    let message =
        chat_service::post_message(state.store.as_ref(), &user, session_id, &payload.text).await?;
    Ok(Json(message))
}

/// Lists a session's messages, oldest first.
#[axum::debug_handler]
pub async fn list_messages(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<i64>,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<Vec<Message>>> {
    let messages =
        chat_service::list_messages(state.store.as_ref(), session_id, query.into()).await?;
    Ok(Json(messages))
}
