//! # 대시보드 핸들러
//!
//! - `GET /dashboard/stats?channelId`  — 채널 통계
//! - `GET /dashboard/videos?channelId` — 채널 영상 목록 (최신순)
//!
//! `channelId`가 없으면 로그인한 사용자 자신의 채널을 봅니다.
//! 비공개 영상은 자기 채널을 볼 때만 목록에 포함됩니다.

use axum::extract::State;

use crate::{
    db,
    error::AppError,
    extract::{parse_id, ApiQuery},
    middleware::auth::AuthUser,
    models::*,
    response::ApiResponse,
    routes::AppState,
};

fn resolve_channel(auth: &AuthUser, query: &ChannelQuery) -> Result<String, AppError> {
    match query.channel_id.as_deref().filter(|id| !id.trim().is_empty()) {
        Some(raw) => parse_id(raw, "channel"),
        None => Ok(auth.user.id.clone()),
    }
}

pub async fn channel_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ChannelQuery>,
) -> Result<ApiResponse<ChannelStats>, AppError> {
    let channel_id = resolve_channel(&auth, &query)?;

    let stats = db::dashboard::channel_stats(&state.pool, &channel_id)
        .await?
        .ok_or_else(|| AppError::not_found("Channel"))?;

    Ok(ApiResponse::ok(stats, "Channel stats fetched successfully"))
}

pub async fn channel_videos(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ChannelQuery>,
) -> Result<ApiResponse<Vec<VideoCard>>, AppError> {
    let channel_id = resolve_channel(&auth, &query)?;
    if db::users::find_by_id(&state.pool, &channel_id).await?.is_none() {
        return Err(AppError::not_found("Channel"));
    }

    let is_own_channel = channel_id == auth.user.id;
    let videos = db::videos::list_by_owner(&state.pool, &channel_id, is_own_channel).await?;

    Ok(ApiResponse::ok(videos, "Channel videos fetched successfully"))
}
