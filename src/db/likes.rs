//! # 좋아요 쿼리
//!
//! 영상/댓글/트윗 좋아요를 하나의 `likes` 테이블로 다룹니다.
//! 대상 컬럼 이름은 `LikeTarget::column()`의 고정 문자열로만 SQL에 들어갑니다.

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::*;

/// 좋아요 대상(영상/댓글/트윗)이 존재하는지 확인합니다.
pub async fn target_exists(pool: &SqlitePool, target: LikeTarget, target_id: &str) -> Result<bool, AppError> {
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = ?)", target.table());
    let exists = sqlx::query_scalar::<_, bool>(&sql)
        .bind(target_id)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// 사용자가 대상에 누른 좋아요
pub async fn find(
    pool: &SqlitePool,
    liked_by: &str,
    target: LikeTarget,
    target_id: &str,
) -> Result<Option<Like>, AppError> {
    let sql = format!(
        "SELECT id, liked_by, video_id, comment_id, tweet_id, created_at \
         FROM likes WHERE liked_by = ? AND {} = ?",
        target.column()
    );

    let like = sqlx::query_as::<_, Like>(&sql)
        .bind(liked_by)
        .bind(target_id)
        .fetch_optional(pool)
        .await?;

    Ok(like)
}

pub async fn create(
    pool: &SqlitePool,
    id: &str,
    liked_by: &str,
    target: LikeTarget,
    target_id: &str,
) -> Result<Like, AppError> {
    let sql = format!(
        "INSERT INTO likes (id, liked_by, {}) VALUES (?, ?, ?)",
        target.column()
    );

    sqlx::query(&sql)
        .bind(id)
        .bind(liked_by)
        .bind(target_id)
        .execute(pool)
        .await?;

    find(pool, liked_by, target, target_id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created like".to_string()))
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM likes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// 사용자가 좋아요한 영상들 (최근에 누른 순).
/// 남의 비공개 영상은 제외합니다.
pub async fn liked_videos(pool: &SqlitePool, user_id: &str) -> Result<Vec<LikedVideo>, AppError> {
    let rows = sqlx::query_as::<_, LikedVideoRow>(
        r#"
        SELECT l.created_at AS liked_at,
               v.id, v.video_file, v.thumbnail, v.title, v.description, v.duration, v.views,
               v.is_published, v.created_at, v.updated_at,
               u.id AS owner_id, u.username AS owner_username,
               u.full_name AS owner_full_name, u.avatar AS owner_avatar
        FROM likes l
        JOIN videos v ON v.id = l.video_id
        JOIN users u ON u.id = v.owner_id
        WHERE l.liked_by = ? AND (v.is_published = 1 OR v.owner_id = l.liked_by)
        ORDER BY l.rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(LikedVideo::from).collect())
}
