use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::*;

pub async fn create(
    pool: &SqlitePool,
    id: &str,
    video_id: &str,
    owner_id: &str,
    content: &str,
) -> Result<Comment, AppError> {
    sqlx::query(
        r#"
        INSERT INTO comments (id, content, video_id, owner_id)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(content)
    .bind(video_id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created comment".to_string()))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Comment>, AppError> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, content, video_id, owner_id, created_at, updated_at
        FROM comments
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// 영상의 댓글 목록 (최신순, 페이지네이션). 각 댓글에 작성자와 좋아요 수를 붙입니다.
pub async fn list_for_video(
    pool: &SqlitePool,
    video_id: &str,
    params: PageParams,
) -> Result<(Vec<CommentCard>, i64), AppError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE video_id = ?")
        .bind(video_id)
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query_as::<_, CommentCardRow>(
        r#"
        SELECT c.id, c.content, c.video_id, c.created_at, c.updated_at,
               (SELECT COUNT(*) FROM likes l WHERE l.comment_id = c.id) AS likes_count,
               u.id AS owner_id, u.username AS owner_username,
               u.full_name AS owner_full_name, u.avatar AS owner_avatar
        FROM comments c
        JOIN users u ON u.id = c.owner_id
        WHERE c.video_id = ?
        ORDER BY c.created_at DESC, c.id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(video_id)
    .bind(params.limit)
    .bind(params.offset())
    .fetch_all(pool)
    .await?;

    Ok((rows.into_iter().map(CommentCard::from).collect(), total))
}

pub async fn update_content(pool: &SqlitePool, id: &str, content: &str) -> Result<Comment, AppError> {
    sqlx::query(
        r#"
        UPDATE comments
        SET content = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(content)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or_else(|| AppError::not_found("Comment"))
}

/// 댓글 삭제. 댓글에 달린 좋아요도 CASCADE로 지워집니다.
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
