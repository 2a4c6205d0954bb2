use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{
    error::Result,
    extractors::AppForm,
    models::responses::TokenResponse,
    services::auth as auth_service,
    state::AppState,
};

/// The OAuth2 password-flow form posted to `/login`.
///
/// `username` carries the email. Other password-flow fields such as
/// `grant_type` and `scope` are accepted and ignored.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Handles user login.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    AppForm(form): AppForm<LoginForm>,
) -> Result<Json<TokenResponse>> {
    tracing::info!("🔐 Login attempt for: {}", form.username);

    let access_token = auth_service::login(
        state.store.as_ref(),
        &state.tokens,
        &form.username,
        &form.password,
    )
    .await?;

    tracing::info!("✅ Token issued for: {}", form.username);

    Ok(Json(TokenResponse::bearer(access_token)))
}
