use axum::{extract::State, Json};
use garde::Validate;
use serde::Deserialize;

use crate::{
    error::Result,
    extractors::{AppJson, AppPath, AppQuery},
    models::{page::PageQuery, responses::UserResponse},
    services::{auth as auth_service, chat as chat_service},
    state::AppState,
    validation::request::validated,
};

/// The request payload for user creation.
#[derive(Deserialize, Validate)]
pub struct CreateUserRequest {
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1, max = 128))]
    pub password: String,
}

/// Handles user registration.
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<Json<UserResponse>> {
    let payload = validated(payload)?;
    tracing::info!("📝 Register attempt for: {}", payload.email);

    let user = auth_service::create_user(state.store.as_ref(), &payload.email, &payload.password)
        .await?;

    tracing::info!("✅ User registered: {}", user.id);

    Ok(Json(UserResponse::bare(user)))
}

/// Lists registered users.
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<Vec<UserResponse>>> {
    let users = chat_service::list_users(state.store.as_ref(), query.into()).await?;
    Ok(Json(users))
}

/// Returns one user with its sessions and messages.
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
) -> Result<Json<UserResponse>> {
    let profile = chat_service::user_profile(state.store.as_ref(), user_id).await?;
    Ok(Json(profile))
}
