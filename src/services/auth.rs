use crate::crypto::password::{hash_password, verify_password};
use crate::crypto::token::TokenService;
use crate::error::{AppError, Result};
use crate::models::user::User;
use crate::repositories::store::ChatStore;

const INVALID_LOGIN: &str = "Incorrect username or password";

/// Creates a new user.
///
/// # Arguments
///
/// * `store` - The user store.
/// * `email` - The user's email address.
/// * `password` - The user's plaintext password.
///
/// # Returns
///
/// A `Result` containing the created `User`, or `AppError::Conflict` if the
/// email is already registered.
pub async fn create_user(store: &dyn ChatStore, email: &str, password: &str) -> Result<User> {
    tracing::debug!("🔐 Creating user: {}", email);

    if store.find_user_by_email(email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let hashed_password = hash_password(password)?;
    let user = store.insert_user(email, &hashed_password).await?;

    tracing::info!("✅ User created with ID: {}", user.id);
    Ok(user)
}

/// Authenticates a user by email and password.
///
/// Unknown email and wrong password produce the same error.
pub async fn authenticate_user(store: &dyn ChatStore, email: &str, password: &str) -> Result<User> {
    tracing::debug!("🔐 Authenticating user: {}", email);

    let user = store
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| AppError::Authentication(INVALID_LOGIN.to_string()))?;

    if !verify_password(password, &user.hashed_password)? {
        return Err(AppError::Authentication(INVALID_LOGIN.to_string()));
    }

    tracing::info!("✅ User authenticated: {}", user.id);

    Ok(user)
}

/// Checks credentials and issues an access token for the user.
pub async fn login(
    store: &dyn ChatStore,
    tokens: &TokenService,
    email: &str,
    password: &str,
) -> Result<String> {
    let user = authenticate_user(store, email, password).await?;
    tokens.issue(&user.email)
}

/// Resolves a bearer token to the user it was issued for.
///
/// A valid token whose subject no longer matches a user is rejected the
/// same way as an invalid token.
pub async fn current_user(store: &dyn ChatStore, tokens: &TokenService, token: &str) -> Result<User> {
    let email = tokens.validate(token)?;

    store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Authentication("Could not validate credentials".to_string()))
}
