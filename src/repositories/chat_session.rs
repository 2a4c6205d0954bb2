use deadpool_postgres::Pool;
use tokio_postgres::Row;
use crate::{
    error::{AppError, Result},
    models::chat_session::ChatSession,
};

fn row_to_session(row: &Row) -> Result<ChatSession> {
    Ok(ChatSession {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        user_id: row.try_get("user_id").map_err(|_| AppError::MissingData("user_id".to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|_| AppError::MissingData("created_at".to_string()))?,
    })
}

/// Creates a chat session owned by `user_id`. The timestamp is assigned by the database.
pub async fn create_session(pool: &Pool, user_id: i64) -> Result<ChatSession> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached(
            r#"
            INSERT INTO chat_sessions (user_id)
            VALUES ($1)
            RETURNING id, user_id, created_at
            "#,
        )
        .await?;
    let row = client
        .query_one(&stmt, &[&user_id])
        .await
        .map_err(|e| AppError::from_constraint(e, "Chat session already exists"))?;
    row_to_session(&row)
}

pub async fn find_by_id(pool: &Pool, session_id: i64) -> Result<Option<ChatSession>> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached("SELECT id, user_id, created_at FROM chat_sessions WHERE id = $1")
        .await?;
    let row = client.query_opt(&stmt, &[&session_id]).await?;
    row.map(|r| row_to_session(&r)).transpose()
}

/// Lists every session owned by a user, oldest first.
pub async fn list_for_user(pool: &Pool, user_id: i64) -> Result<Vec<ChatSession>> {
    let client = pool.get().await?;
    let stmt = client
        .prepare_cached(
            r#"
            SELECT id, user_id, created_at
            FROM chat_sessions
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .await?;
    let rows = client.query(&stmt, &[&user_id]).await?;
    rows.iter().map(row_to_session).collect()
}
