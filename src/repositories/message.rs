use deadpool_postgres::Pool;
use tokio_postgres::Row;
use crate::{
    error::{AppError, Result},
    models::{message::Message, page::Page},
};

fn row_to_message(row: &Row) -> Result<Message> {
    Ok(Message {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        text: row.try_get("text").map_err(|_| AppError::MissingData("text".to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|_| AppError::MissingData("created_at".to_string()))?,
        session_id: row
            .try_get("session_id")
            .map_err(|_| AppError::MissingData("session_id".to_string()))?,
        user_id: row.try_get("user_id").map_err(|_| AppError::MissingData("user_id".to_string()))?,
    })
}

/// Creates a message in `session_id` authored by `user_id`.
///
/// An unknown session or author violates a foreign key and surfaces as
/// `AppError::NotFound`.
pub async fn create_message(
    pool: &Pool,
    session_id: i64,
    user_id: i64,
    text: &str,
) -> Result<Message> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached(
            r#"
            INSERT INTO messages (text, session_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, text, created_at, session_id, user_id
            "#,
        )
        .await?;
    let row = client
        .query_one(&stmt, &[&text, &session_id, &user_id])
        .await
        .map_err(|e| AppError::from_constraint(e, "Message already exists"))?;
    row_to_message(&row)
}

/// Lists the messages of a session in creation order.
pub async fn list_for_session(pool: &Pool, session_id: i64, page: Page) -> Result<Vec<Message>> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached(
            r#"
            SELECT id, text, created_at, session_id, user_id
            FROM messages
            WHERE session_id = $1
            ORDER BY id ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .await?;
    let rows = client
        .query(&stmt, &[&session_id, &page.skip, &page.limit])
        .await?;
    rows.iter().map(row_to_message).collect()
}

/// Lists the messages written by a user across all sessions, in creation order.
pub async fn list_for_user(pool: &Pool, user_id: i64, page: Page) -> Result<Vec<Message>> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached(
            r#"
            SELECT id, text, created_at, session_id, user_id
            FROM messages
            WHERE user_id = $1
            ORDER BY id ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .await?;
    let rows = client
        .query(&stmt, &[&user_id, &page.skip, &page.limit])
        .await?;
    rows.iter().map(row_to_message).collect()
}
