//! # 영상(Video) 핸들러
//!
//! ## 엔드포인트 (모두 🔒)
//! - `GET    /videos`                         — 공개 영상 목록 (검색, 정렬, 페이지네이션)
//! - `POST   /videos`                         — 영상 업로드 (multipart)
//! - `GET    /videos/{videoId}`               — 영상 조회 (조회수 +1, 시청 기록 추가)
//! - `PATCH  /videos/{videoId}`               — 제목/설명/썸네일 수정 (소유자)
//! - `DELETE /videos/{videoId}`               — 영상 삭제 (소유자)
//! - `PATCH  /videos/toggle/publish/{videoId}` — 공개 여부 전환 (소유자)
//!
//! 비공개 영상은 소유자가 아니면 "없는 영상"과 똑같이 404로 응답합니다.

use axum::extract::{Path, State};

use crate::{
    db,
    error::AppError,
    extract::{parse_id, ApiQuery},
    middleware::auth::AuthUser,
    models::*,
    response::ApiResponse,
    routes::AppState,
    services::{form::MultipartForm, media::MediaKind},
};

/// 호출자에게 보이는 영상을 찾습니다.
///
/// 없거나, 비공개인데 호출자가 소유자가 아니면 404입니다.
pub async fn find_visible(state: &AppState, auth: &AuthUser, video_id: &str) -> Result<Video, AppError> {
    db::videos::find_by_id(&state.pool, video_id)
        .await?
        .filter(|video| video.is_published || video.owner_id == auth.user.id)
        .ok_or_else(|| AppError::not_found("Video"))
}

/// 소유자 확인이 필요한 변경 작업용 조회. 없으면 404, 소유자가 아니면 401
async fn find_owned(state: &AppState, auth: &AuthUser, video_id: &str, action: &str) -> Result<Video, AppError> {
    let video = db::videos::find_by_id(&state.pool, video_id)
        .await?
        .ok_or_else(|| AppError::not_found("Video"))?;
    auth.ensure_owner(&video.owner_id, action)?;
    Ok(video)
}

/// `GET /videos?page&limit&sortBy&sortType&userId&query`
pub async fn list_videos(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<VideoListQuery>,
) -> Result<ApiResponse<Page<VideoCard>>, AppError> {
    let params = PageParams::parse(query.page.as_deref(), query.limit.as_deref())?;

    let (Some(sort_by), Some(sort_type)) = (query.sort_by.as_deref(), query.sort_type.as_deref()) else {
        return Err(AppError::BadRequest(
            "sortBy and sortType are required".to_string(),
        ));
    };

    let filter = VideoFilter {
        owner_id: query
            .user_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .map(|id| parse_id(id, "user"))
            .transpose()?,
        search: query
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string),
        sort_by: SortBy::parse(sort_by)?,
        sort_type: SortType::parse(sort_type)?,
    };

    let (docs, total) = db::videos::list(&state.pool, &filter, params).await?;
    Ok(ApiResponse::ok(
        Page::new(docs, total, params),
        "Videos fetched successfully",
    ))
}

/// `POST /videos`
///
/// 텍스트 필드: title, description, duration(선택)
/// 파일 필드: video, thumbnail
///
/// 재생 시간은 MP4 헤더에서 읽은 값을 우선 사용하고,
/// 읽을 수 없으면 `duration` 필드, 그것도 없으면 0입니다.
pub async fn publish_video(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> Result<ApiResponse<Video>, AppError> {
    let (Some(title), Some(description)) = (form.text("title"), form.text("description")) else {
        return Err(AppError::BadRequest(
            "Title and description are required".to_string(),
        ));
    };
    let (title, description) = (title.to_string(), description.to_string());

    let declared_duration = match form.text("duration") {
        Some(raw) => Some(
            raw.parse::<f64>()
                .ok()
                .filter(|d| d.is_finite() && *d >= 0.0)
                .ok_or_else(|| {
                    AppError::BadRequest("Duration must be a non-negative number".to_string())
                })?,
        ),
        None => None,
    };

    let video_file = form
        .take_file("video")
        .ok_or_else(|| AppError::BadRequest("Video file is required".to_string()))?;
    let thumbnail_file = form
        .take_file("thumbnail")
        .ok_or_else(|| AppError::BadRequest("Thumbnail is required".to_string()))?;

    let stored_video = state.media.store(MediaKind::Video, &video_file).await?;
    let stored_thumbnail = match state.media.store(MediaKind::Thumbnail, &thumbnail_file).await {
        Ok(stored) => stored,
        Err(e) => {
            state.media.remove(&stored_video.url).await;
            return Err(e);
        }
    };

    let new_video = NewVideo {
        owner_id: auth.user.id.clone(),
        video_file: stored_video.url.clone(),
        thumbnail: stored_thumbnail.url.clone(),
        title,
        description,
        duration: stored_video.duration.or(declared_duration).unwrap_or(0.0),
    };

    let video_id = uuid::Uuid::now_v7().to_string();
    let video = match db::videos::create(&state.pool, &video_id, &new_video).await {
        Ok(video) => video,
        Err(e) => {
            state.media.remove(&stored_video.url).await;
            state.media.remove(&stored_thumbnail.url).await;
            return Err(e);
        }
    };

    tracing::info!(video_id = %video.id, owner_id = %video.owner_id, duration = video.duration, "Video published");
    Ok(ApiResponse::created(video, "Video published successfully"))
}

/// `GET /videos/{videoId}`: 조회할 때마다 조회수가 오르고 시청 기록 맨 앞에 올라갑니다.
pub async fn get_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
) -> Result<ApiResponse<VideoCard>, AppError> {
    let video_id = parse_id(&video_id, "video")?;
    let video = find_visible(&state, &auth, &video_id).await?;

    db::videos::increment_views(&state.pool, &video.id).await?;
    db::videos::record_watch(&state.pool, auth.id(), &video.id).await?;

    let card = db::videos::find_card(&state.pool, &video.id)
        .await?
        .ok_or_else(|| AppError::not_found("Video"))?;

    Ok(ApiResponse::ok(card, "Video fetched successfully"))
}

/// `PATCH /videos/{videoId}`: multipart: title?, description?, thumbnail?
pub async fn update_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
    mut form: MultipartForm,
) -> Result<ApiResponse<Video>, AppError> {
    let video_id = parse_id(&video_id, "video")?;
    let video = find_owned(&state, &auth, &video_id, "update this video").await?;

    let mut changes = VideoChanges {
        title: form.text("title").map(str::to_string),
        description: form.text("description").map(str::to_string),
        thumbnail: None,
    };

    if let Some(file) = form.take_file("thumbnail") {
        changes.thumbnail = Some(state.media.store(MediaKind::Thumbnail, &file).await?.url);
    }

    if changes.is_empty() {
        return Err(AppError::BadRequest(
            "Title, description or thumbnail is required".to_string(),
        ));
    }

    let updated = match db::videos::update(&state.pool, &video.id, &changes).await {
        Ok(updated) => updated,
        Err(e) => {
            // 저장에 실패하면 방금 올린 썸네일을 되돌립니다.
            if let Some(url) = &changes.thumbnail {
                state.media.remove(url).await;
            }
            return Err(e);
        }
    };

    if changes.thumbnail.is_some() {
        state.media.remove(&video.thumbnail).await;
    }

    tracing::info!(video_id = %updated.id, "Video updated");
    Ok(ApiResponse::ok(updated, "Video updated successfully"))
}

/// `DELETE /videos/{videoId}`: 행을 지운 뒤 영상/썸네일 파일도 정리합니다.
pub async fn delete_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
) -> Result<ApiResponse<Video>, AppError> {
    let video_id = parse_id(&video_id, "video")?;
    let video = find_owned(&state, &auth, &video_id, "delete this video").await?;

    db::videos::delete(&state.pool, &video.id).await?;
    state.media.remove(&video.video_file).await;
    state.media.remove(&video.thumbnail).await;

    tracing::info!(video_id = %video.id, "Video deleted");
    Ok(ApiResponse::ok(video, "Video deleted successfully"))
}

/// `PATCH /videos/toggle/publish/{videoId}`
pub async fn toggle_publish(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
) -> Result<ApiResponse<Video>, AppError> {
    let video_id = parse_id(&video_id, "video")?;
    let video = find_owned(&state, &auth, &video_id, "change the publish status").await?;

    let updated = db::videos::set_published(&state.pool, &video.id, !video.is_published).await?;
    let message = if updated.is_published {
        "Video published"
    } else {
        "Video unpublished"
    };

    tracing::info!(video_id = %updated.id, is_published = updated.is_published, "Publish status toggled");
    Ok(ApiResponse::ok(updated, message))
}
