//! # 플레이리스트(Playlist) 핸들러
//!
//! ## 엔드포인트 (모두 🔒)
//! - `POST   /playlists`                        — 생성
//! - `GET    /playlists/u/{userId}`             — 사용자의 플레이리스트 목록
//! - `GET    /playlists/p/{playlistId}`         — 상세 (작성자, 영상 카드, 총 재생 시간)
//! - `PATCH  /playlists/p/{playlistId}`         — 이름/설명 수정 (소유자)
//! - `DELETE /playlists/p/{playlistId}`         — 삭제 (소유자)
//! - `POST   /playlists/v/{playlistId}/{videoId}` — 영상 추가 (소유자)
//! - `DELETE /playlists/v/{playlistId}/{videoId}` — 영상 제거 (소유자)

use axum::extract::{Path, State};

use crate::{
    db,
    error::AppError,
    extract::{parse_id, ApiJson},
    middleware::auth::AuthUser,
    models::*,
    response::ApiResponse,
    routes::{videos::find_visible, AppState},
};

fn required_fields(req: &PlaylistRequest) -> Result<(&str, &str), AppError> {
    req.fields().ok_or_else(|| {
        AppError::BadRequest("Name and description are both required".to_string())
    })
}

/// 플레이리스트를 찾고 소유자인지 확인합니다. 없으면 404, 소유자가 아니면 401
async fn find_owned(
    state: &AppState,
    auth: &AuthUser,
    playlist_id: &str,
    action: &str,
) -> Result<Playlist, AppError> {
    let playlist = db::playlists::find_by_id(&state.pool, playlist_id)
        .await?
        .ok_or_else(|| AppError::not_found("Playlist"))?;
    auth.ensure_owner(&playlist.owner_id, action)?;
    Ok(playlist)
}

pub async fn create_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<PlaylistRequest>,
) -> Result<ApiResponse<PlaylistResponse>, AppError> {
    let (name, description) = required_fields(&req)?;

    let id = uuid::Uuid::now_v7().to_string();
    let playlist = db::playlists::create(&state.pool, &id, auth.id(), name, description).await?;

    tracing::info!(playlist_id = %playlist.id, owner_id = %auth.id(), "Playlist created");
    Ok(ApiResponse::created(
        PlaylistResponse {
            playlist,
            videos: Vec::new(),
        },
        "Playlist created successfully",
    ))
}

pub async fn user_playlists(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<PlaylistResponse>>, AppError> {
    let user_id = parse_id(&user_id, "user")?;
    if db::users::find_by_id(&state.pool, &user_id).await?.is_none() {
        return Err(AppError::not_found("User"));
    }

    let playlists = db::playlists::list_by_owner(&state.pool, &user_id).await?;
    Ok(ApiResponse::ok(playlists, "Playlists fetched successfully"))
}

/// `GET /playlists/p/{playlistId}`: 영상은 추가된 순서이고 총 재생 시간을 함께 돌려줍니다.
pub async fn get_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(playlist_id): Path<String>,
) -> Result<ApiResponse<PlaylistDetail>, AppError> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let playlist = db::playlists::find_by_id(&state.pool, &playlist_id)
        .await?
        .ok_or_else(|| AppError::not_found("Playlist"))?;

    let owner = db::users::find_by_id(&state.pool, &playlist.owner_id)
        .await?
        .ok_or_else(|| AppError::not_found("Playlist owner"))?;
    let videos = db::playlists::videos(&state.pool, &playlist.id, auth.id()).await?;

    let detail = PlaylistDetail {
        id: playlist.id,
        name: playlist.name,
        description: playlist.description,
        created_at: playlist.created_at,
        updated_at: playlist.updated_at,
        owner: OwnerSummary {
            id: owner.id,
            username: owner.username,
            full_name: owner.full_name,
            avatar: owner.avatar,
        },
        total_videos: videos.len(),
        total_duration: videos.iter().map(|video| video.duration).sum(),
        videos,
    };

    Ok(ApiResponse::ok(detail, "Playlist fetched successfully"))
}

pub async fn update_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(playlist_id): Path<String>,
    ApiJson(req): ApiJson<PlaylistRequest>,
) -> Result<ApiResponse<PlaylistResponse>, AppError> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let (name, description) = required_fields(&req)?;
    let playlist = find_owned(&state, &auth, &playlist_id, "update this playlist").await?;

    let updated = db::playlists::update(&state.pool, &playlist.id, name, description).await?;
    let response = db::playlists::with_video_ids(&state.pool, updated).await?;

    tracing::info!(playlist_id = %response.playlist.id, "Playlist updated");
    Ok(ApiResponse::ok(response, "Playlist updated successfully"))
}

pub async fn delete_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(playlist_id): Path<String>,
) -> Result<ApiResponse<PlaylistResponse>, AppError> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let playlist = find_owned(&state, &auth, &playlist_id, "delete this playlist").await?;

    // 삭제하면 연결 행도 사라지므로 영상 ID를 먼저 읽어 둡니다.
    let response = db::playlists::with_video_ids(&state.pool, playlist).await?;
    db::playlists::delete(&state.pool, &response.playlist.id).await?;

    tracing::info!(playlist_id = %response.playlist.id, "Playlist deleted");
    Ok(ApiResponse::ok(response, "Playlist deleted successfully"))
}

/// `POST /playlists/v/{playlistId}/{videoId}`: 이미 있으면 그대로 200
pub async fn add_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((playlist_id, video_id)): Path<(String, String)>,
) -> Result<ApiResponse<PlaylistResponse>, AppError> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let video_id = parse_id(&video_id, "video")?;

    let playlist = find_owned(&state, &auth, &playlist_id, "add videos to this playlist").await?;
    let video = find_visible(&state, &auth, &video_id).await?;

    if db::playlists::contains(&state.pool, &playlist.id, &video.id).await? {
        let response = db::playlists::with_video_ids(&state.pool, playlist).await?;
        return Ok(ApiResponse::ok(response, "Video is already in the playlist"));
    }

    db::playlists::add_video(&state.pool, &playlist.id, &video.id).await?;
    let refreshed = db::playlists::find_by_id(&state.pool, &playlist.id)
        .await?
        .ok_or_else(|| AppError::not_found("Playlist"))?;
    let response = db::playlists::with_video_ids(&state.pool, refreshed).await?;

    tracing::info!(playlist_id = %playlist_id, video_id = %video_id, "Video added to playlist");
    Ok(ApiResponse::ok(response, "Video added to playlist successfully"))
}

/// `DELETE /playlists/v/{playlistId}/{videoId}`: 플레이리스트에 없는 영상이면 404
pub async fn remove_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((playlist_id, video_id)): Path<(String, String)>,
) -> Result<ApiResponse<PlaylistResponse>, AppError> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let video_id = parse_id(&video_id, "video")?;

    let playlist = find_owned(&state, &auth, &playlist_id, "remove videos from this playlist").await?;

    if !db::playlists::remove_video(&state.pool, &playlist.id, &video_id).await? {
        return Err(AppError::NotFound(
            "Video is not in the playlist".to_string(),
        ));
    }

    let refreshed = db::playlists::find_by_id(&state.pool, &playlist.id)
        .await?
        .ok_or_else(|| AppError::not_found("Playlist"))?;
    let response = db::playlists::with_video_ids(&state.pool, refreshed).await?;

    tracing::info!(playlist_id = %playlist_id, video_id = %video_id, "Video removed from playlist");
    Ok(ApiResponse::ok(response, "Video removed from playlist successfully"))
}
