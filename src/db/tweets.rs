use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::*;

pub async fn create(pool: &SqlitePool, id: &str, owner_id: &str, content: &str) -> Result<Tweet, AppError> {
    sqlx::query("INSERT INTO tweets (id, content, owner_id) VALUES (?, ?, ?)")
        .bind(id)
        .bind(content)
        .bind(owner_id)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created tweet".to_string()))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Tweet>, AppError> {
    let tweet = sqlx::query_as::<_, Tweet>(
        r#"
        SELECT id, content, owner_id, created_at, updated_at
        FROM tweets
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(tweet)
}

/// 사용자의 트윗 (최신순, 좋아요 수 포함)
pub async fn list_by_owner(pool: &SqlitePool, owner_id: &str) -> Result<Vec<TweetWithLikes>, AppError> {
    let tweets = sqlx::query_as::<_, TweetWithLikes>(
        r#"
        SELECT t.id, t.content, t.owner_id, t.created_at, t.updated_at,
               (SELECT COUNT(*) FROM likes l WHERE l.tweet_id = t.id) AS likes_count
        FROM tweets t
        WHERE t.owner_id = ?
        ORDER BY t.created_at DESC, t.id DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(tweets)
}

pub async fn update_content(pool: &SqlitePool, id: &str, content: &str) -> Result<Tweet, AppError> {
    sqlx::query(
        r#"
        UPDATE tweets
        SET content = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(content)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or_else(|| AppError::not_found("Tweet"))
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM tweets WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
