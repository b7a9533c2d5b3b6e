//! # 댓글(Comment) 핸들러
//!
//! 하나의 경로 `/comments/{id}`에 메서드별로 다른 의미의 ID가 옵니다.
//! - `GET`    → 영상 ID: 영상의 댓글 목록 (최신순, 페이지네이션)
//! - `POST`   → 영상 ID: 댓글 작성
//! - `PATCH`  → 댓글 ID: 댓글 수정 (작성자만)
//! - `DELETE` → 댓글 ID: 댓글 삭제 (작성자 또는 영상 소유자)

use axum::extract::{Path, State};

use crate::{
    db,
    error::AppError,
    extract::{parse_id, ApiJson, ApiQuery},
    middleware::auth::AuthUser,
    models::*,
    response::ApiResponse,
    routes::{videos::find_visible, AppState},
};

fn required_content(req: &ContentRequest) -> Result<&str, AppError> {
    req.trimmed()
        .ok_or_else(|| AppError::BadRequest("Comment content is required".to_string()))
}

/// `GET /comments/{videoId}?page&limit`
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<ApiResponse<Page<CommentCard>>, AppError> {
    let video_id = parse_id(&video_id, "video")?;
    let params = PageParams::parse(query.page.as_deref(), query.limit.as_deref())?;
    let video = find_visible(&state, &auth, &video_id).await?;

    let (docs, total) = db::comments::list_for_video(&state.pool, &video.id, params).await?;
    Ok(ApiResponse::ok(
        Page::new(docs, total, params),
        "Comments fetched successfully",
    ))
}

/// `POST /comments/{videoId}`: `{ "content": "..." }`
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
    ApiJson(req): ApiJson<ContentRequest>,
) -> Result<ApiResponse<Comment>, AppError> {
    let video_id = parse_id(&video_id, "video")?;
    let content = required_content(&req)?;
    let video = find_visible(&state, &auth, &video_id).await?;

    let comment_id = uuid::Uuid::now_v7().to_string();
    let comment = db::comments::create(&state.pool, &comment_id, &video.id, auth.id(), content).await?;

    tracing::info!(comment_id = %comment.id, video_id = %video.id, "Comment added");
    Ok(ApiResponse::created(comment, "Comment added successfully"))
}

/// `PATCH /comments/{commentId}`: 작성자만 수정할 수 있습니다.
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
    ApiJson(req): ApiJson<ContentRequest>,
) -> Result<ApiResponse<Comment>, AppError> {
    let comment_id = parse_id(&comment_id, "comment")?;
    let content = required_content(&req)?;

    let comment = db::comments::find_by_id(&state.pool, &comment_id)
        .await?
        .ok_or_else(|| AppError::not_found("Comment"))?;
    auth.ensure_owner(&comment.owner_id, "update this comment")?;

    let updated = db::comments::update_content(&state.pool, &comment.id, content).await?;

    tracing::info!(comment_id = %updated.id, "Comment updated");
    Ok(ApiResponse::ok(updated, "Comment updated successfully"))
}

/// `DELETE /comments/{commentId}`
///
/// 댓글 작성자뿐 아니라 댓글이 달린 영상의 소유자도 지울 수 있습니다.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
) -> Result<ApiResponse<Comment>, AppError> {
    let comment_id = parse_id(&comment_id, "comment")?;

    let comment = db::comments::find_by_id(&state.pool, &comment_id)
        .await?
        .ok_or_else(|| AppError::not_found("Comment"))?;

    let video_owner = db::videos::find_by_id(&state.pool, &comment.video_id)
        .await?
        .map(|video| video.owner_id);

    let allowed = comment.owner_id == auth.user.id || video_owner.as_deref() == Some(auth.id());
    if !allowed {
        return Err(AppError::Unauthorized(
            "Only the comment owner or the video owner can delete this comment".to_string(),
        ));
    }

    db::comments::delete(&state.pool, &comment.id).await?;

    tracing::info!(comment_id = %comment.id, deleted_by = %auth.id(), "Comment deleted");
    Ok(ApiResponse::ok(comment, "Comment deleted successfully"))
}
