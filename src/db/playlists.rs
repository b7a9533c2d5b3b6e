//! # 플레이리스트 쿼리
//!
//! `playlists`와 연결 테이블 `playlist_videos`를 다룹니다.
//! 플레이리스트 안의 영상 순서는 추가된 순서(`playlist_videos.rowid`)입니다.

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::*;

pub async fn create(
    pool: &SqlitePool,
    id: &str,
    owner_id: &str,
    name: &str,
    description: &str,
) -> Result<Playlist, AppError> {
    sqlx::query("INSERT INTO playlists (id, name, description, owner_id) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(owner_id)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created playlist".to_string()))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Playlist>, AppError> {
    let playlist = sqlx::query_as::<_, Playlist>(
        r#"
        SELECT id, name, description, owner_id, created_at, updated_at
        FROM playlists
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(playlist)
}

/// 플레이리스트에 담긴 영상 ID (추가된 순서)
pub async fn video_ids(pool: &SqlitePool, playlist_id: &str) -> Result<Vec<String>, AppError> {
    let ids = sqlx::query_scalar::<_, String>(
        "SELECT video_id FROM playlist_videos WHERE playlist_id = ? ORDER BY rowid",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// 플레이리스트 + 영상 ID 목록
pub async fn with_video_ids(pool: &SqlitePool, playlist: Playlist) -> Result<PlaylistResponse, AppError> {
    let videos = video_ids(pool, &playlist.id).await?;
    Ok(PlaylistResponse { playlist, videos })
}

/// 사용자의 플레이리스트 목록 (최신순)
pub async fn list_by_owner(pool: &SqlitePool, owner_id: &str) -> Result<Vec<PlaylistResponse>, AppError> {
    let playlists = sqlx::query_as::<_, Playlist>(
        r#"
        SELECT id, name, description, owner_id, created_at, updated_at
        FROM playlists
        WHERE owner_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    let mut result = Vec::with_capacity(playlists.len());
    for playlist in playlists {
        result.push(with_video_ids(pool, playlist).await?);
    }

    Ok(result)
}

/// 플레이리스트의 영상 카드들 (추가된 순서).
/// `viewer_id`가 아닌 사람의 비공개 영상은 제외합니다.
pub async fn videos(pool: &SqlitePool, playlist_id: &str, viewer_id: &str) -> Result<Vec<VideoCard>, AppError> {
    let rows = sqlx::query_as::<_, VideoCardRow>(
        r#"
        SELECT v.id, v.video_file, v.thumbnail, v.title, v.description, v.duration, v.views,
               v.is_published, v.created_at, v.updated_at,
               u.id AS owner_id, u.username AS owner_username,
               u.full_name AS owner_full_name, u.avatar AS owner_avatar
        FROM playlist_videos pv
        JOIN videos v ON v.id = pv.video_id
        JOIN users u ON u.id = v.owner_id
        WHERE pv.playlist_id = ? AND (v.is_published = 1 OR v.owner_id = ?)
        ORDER BY pv.rowid
        "#,
    )
    .bind(playlist_id)
    .bind(viewer_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(VideoCard::from).collect())
}

pub async fn update(pool: &SqlitePool, id: &str, name: &str, description: &str) -> Result<Playlist, AppError> {
    sqlx::query(
        r#"
        UPDATE playlists
        SET name = ?, description = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or_else(|| AppError::not_found("Playlist"))
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn contains(pool: &SqlitePool, playlist_id: &str, video_id: &str) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM playlist_videos WHERE playlist_id = ? AND video_id = ?)",
    )
    .bind(playlist_id)
    .bind(video_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// 영상을 플레이리스트 끝에 추가합니다. 이미 있으면 아무것도 바꾸지 않습니다.
pub async fn add_video(pool: &SqlitePool, playlist_id: &str, video_id: &str) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let inserted = sqlx::query(
        "INSERT INTO playlist_videos (playlist_id, video_id) VALUES (?, ?) ON CONFLICT DO NOTHING",
    )
    .bind(playlist_id)
    .bind(video_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if inserted > 0 {
        touch(&mut tx, playlist_id).await?;
    }

    tx.commit().await?;
    Ok(())
}

/// 플레이리스트에서 영상을 뺍니다. 원래 없었으면 false
pub async fn remove_video(pool: &SqlitePool, playlist_id: &str, video_id: &str) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM playlist_videos WHERE playlist_id = ? AND video_id = ?")
        .bind(playlist_id)
        .bind(video_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed > 0 {
        touch(&mut tx, playlist_id).await?;
    }

    tx.commit().await?;
    Ok(removed > 0)
}

async fn touch(tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>, playlist_id: &str) -> Result<(), AppError> {
    sqlx::query("UPDATE playlists SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = ?")
        .bind(playlist_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
