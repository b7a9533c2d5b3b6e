//! # 사용자 쿼리
//!
//! `users` 테이블 CRUD와 채널 프로필 집계를 담당합니다.
//! 사용자명과 이메일은 항상 소문자로 저장/조회합니다.

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::user::{ChannelProfile, NewUser, User};

pub async fn create(pool: &SqlitePool, id: &str, new_user: &NewUser) -> Result<User, AppError> {
    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, full_name, password_hash, avatar, cover_image)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(new_user.username.to_lowercase())
    .bind(new_user.email.to_lowercase())
    .bind(&new_user.full_name)
    .bind(&new_user.password_hash)
    .bind(&new_user.avatar)
    .bind(&new_user.cover_image)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, full_name, avatar, cover_image,
               password_hash, refresh_token_hash, created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, full_name, avatar, cover_image,
               password_hash, refresh_token_hash, created_at, updated_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username.to_lowercase())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, full_name, avatar, cover_image,
               password_hash, refresh_token_hash, created_at, updated_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email.to_lowercase())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// 현재 유효한 refresh 토큰 해시를 교체합니다. None이면 로그아웃 상태가 됩니다.
pub async fn set_refresh_token_hash(
    pool: &SqlitePool,
    id: &str,
    token_hash: Option<&str>,
) -> Result<(), AppError> {
    sqlx::query("UPDATE users SET refresh_token_hash = ? WHERE id = ?")
        .bind(token_hash)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_password(pool: &SqlitePool, id: &str, password_hash: &str) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE users
        SET password_hash = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(password_hash)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// 이름/이메일 부분 수정. None인 값은 기존 값을 유지합니다 (COALESCE).
pub async fn update_account(
    pool: &SqlitePool,
    id: &str,
    full_name: Option<&str>,
    email: Option<&str>,
) -> Result<User, AppError> {
    sqlx::query(
        r#"
        UPDATE users
        SET full_name = COALESCE(?, full_name),
            email = COALESCE(?, email),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(full_name)
    .bind(email.map(str::to_lowercase))
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or_else(|| AppError::not_found("User"))
}

pub async fn update_avatar(pool: &SqlitePool, id: &str, avatar: &str) -> Result<User, AppError> {
    sqlx::query(
        r#"
        UPDATE users
        SET avatar = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(avatar)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or_else(|| AppError::not_found("User"))
}

pub async fn update_cover_image(pool: &SqlitePool, id: &str, cover_image: &str) -> Result<User, AppError> {
    sqlx::query(
        r#"
        UPDATE users
        SET cover_image = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(cover_image)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or_else(|| AppError::not_found("User"))
}

/// 채널 페이지 정보.
///
/// 구독자 수, 이 채널이 구독 중인 채널 수, 그리고 `viewer_id`가
/// 이 채널을 구독 중인지를 스칼라 서브쿼리로 한 번에 계산합니다.
pub async fn channel_profile(
    pool: &SqlitePool,
    username: &str,
    viewer_id: &str,
) -> Result<Option<ChannelProfile>, AppError> {
    let profile = sqlx::query_as::<_, ChannelProfile>(
        r#"
        SELECT u.id, u.username, u.full_name, u.email, u.avatar, u.cover_image,
               (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id)
                   AS subscribers_count,
               (SELECT COUNT(*) FROM subscriptions s WHERE s.subscriber_id = u.id)
                   AS channels_subscribed_to_count,
               EXISTS (
                   SELECT 1 FROM subscriptions s
                   WHERE s.channel_id = u.id AND s.subscriber_id = ?
               ) AS is_subscribed
        FROM users u
        WHERE u.username = ?
        "#,
    )
    .bind(viewer_id)
    .bind(username.to_lowercase())
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}
