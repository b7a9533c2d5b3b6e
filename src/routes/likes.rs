//! # 좋아요(Like) 핸들러
//!
//! ## 엔드포인트 (모두 🔒)
//! - `PATCH /likes/v/{videoId}`   — 영상 좋아요 토글
//! - `PATCH /likes/c/{commentId}` — 댓글 좋아요 토글
//! - `PATCH /likes/t/{tweetId}`   — 트윗 좋아요 토글
//! - `GET   /likes/v`             — 내가 좋아요한 영상 목록
//!
//! 토글: 이미 좋아요한 대상이면 취소하고, 아니면 새로 누릅니다.
//! 두 번 누르면 원래 상태(좋아요 없음)로 돌아옵니다.

use axum::extract::{Path, State};

use crate::{
    db,
    error::AppError,
    extract::parse_id,
    middleware::auth::AuthUser,
    models::*,
    response::ApiResponse,
    routes::{videos::find_visible, AppState},
};

async fn toggle(
    state: &AppState,
    auth: &AuthUser,
    target: LikeTarget,
    raw_id: &str,
) -> Result<ApiResponse<LikeToggle>, AppError> {
    let target_id = parse_id(raw_id, target.label())?;

    if target == LikeTarget::Video {
        // 비공개 영상은 소유자가 아니면 없는 영상과 똑같이 404입니다.
        find_visible(state, auth, &target_id).await?;
    } else if !db::likes::target_exists(&state.pool, target, &target_id).await? {
        return Err(AppError::NotFound(format!(
            "No {} found with this id",
            target.label()
        )));
    }

    match db::likes::find(&state.pool, auth.id(), target, &target_id).await? {
        Some(like) => {
            db::likes::delete(&state.pool, &like.id).await?;
            tracing::info!(target = target.label(), %target_id, user_id = %auth.id(), "Like removed");
            Ok(ApiResponse::ok(
                LikeToggle {
                    is_liked: false,
                    like,
                },
                "Like removed",
            ))
        }
        None => {
            let like_id = uuid::Uuid::now_v7().to_string();
            let like = db::likes::create(&state.pool, &like_id, auth.id(), target, &target_id).await?;
            tracing::info!(target = target.label(), %target_id, user_id = %auth.id(), "Like added");
            Ok(ApiResponse::ok(
                LikeToggle {
                    is_liked: true,
                    like,
                },
                "Liked",
            ))
        }
    }
}

pub async fn toggle_video_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
) -> Result<ApiResponse<LikeToggle>, AppError> {
    toggle(&state, &auth, LikeTarget::Video, &video_id).await
}

pub async fn toggle_comment_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
) -> Result<ApiResponse<LikeToggle>, AppError> {
    toggle(&state, &auth, LikeTarget::Comment, &comment_id).await
}

pub async fn toggle_tweet_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(tweet_id): Path<String>,
) -> Result<ApiResponse<LikeToggle>, AppError> {
    toggle(&state, &auth, LikeTarget::Tweet, &tweet_id).await
}

/// `GET /likes/v`: 최근에 좋아요한 순서
pub async fn liked_videos(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<ApiResponse<Vec<LikedVideo>>, AppError> {
    let videos = db::likes::liked_videos(&state.pool, auth.id()).await?;
    Ok(ApiResponse::ok(videos, "Liked videos fetched successfully"))
}
