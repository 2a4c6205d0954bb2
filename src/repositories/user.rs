use deadpool_postgres::Pool;
use tokio_postgres::Row;
use crate::{
    error::{AppError, Result},
    models::{page::Page, user::User},
};

/// A helper function to map a `tokio_postgres::Row` to a `User`.
fn row_to_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        email: row.try_get("email").map_err(|_| AppError::MissingData("email".to_string()))?,
        hashed_password: row
            .try_get("hashed_password")
            .map_err(|_| AppError::MissingData("hashed_password".to_string()))?,
    })
}

/// Creates a new user in the database.
///
/// A duplicate email surfaces as `AppError::Conflict`, so concurrent
/// registrations of the same address cannot both succeed.
pub async fn create_user(pool: &Pool, email: &str, hashed_password: &str) -> Result<User> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached(
            r#"
            INSERT INTO users (email, hashed_password)
            VALUES ($1, $2)
            RETURNING id, email, hashed_password
            "#,
        )
        .await?;
    let row = client
        .query_one(&stmt, &[&email, &hashed_password])
        .await
        .map_err(|e| AppError::from_constraint(e, "Email already registered"))?;
    row_to_user(&row)
}

/// Finds a user by their email address.
pub async fn find_by_email(pool: &Pool, email: &str) -> Result<Option<User>> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached("SELECT id, email, hashed_password FROM users WHERE email = $1")
        .await?;
    let row = client.query_opt(&stmt, &[&email]).await?;
    row.map(|r| row_to_user(&r)).transpose()
}

/// Finds a user by their ID.
pub async fn find_by_id(pool: &Pool, user_id: i64) -> Result<Option<User>> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached("SELECT id, email, hashed_password FROM users WHERE id = $1")
        .await?;
    let row = client.query_opt(&stmt, &[&user_id]).await?;
    row.map(|r| row_to_user(&r)).transpose()
}

/// Lists users ordered by ID.
pub async fn list(pool: &Pool, page: Page) -> Result<Vec<User>> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached(
            r#"
            SELECT id, email, hashed_password
            FROM users
            ORDER BY id ASC
            OFFSET $1 LIMIT $2
            "#,
        )
        .await?;
    let rows = client.query(&stmt, &[&page.skip, &page.limit]).await?;
    rows.iter().map(row_to_user).collect()
}
