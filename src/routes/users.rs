//! # 사용자(User) 핸들러
//!
//! ## 엔드포인트
//! - `POST  /users/register`               — 회원가입 (multipart, 아바타 필수)
//! - `POST  /users/login`                  — 로그인, 토큰 쿠키 설정
//! - `POST  /users/logout`                 — 로그아웃, 토큰 무효화 🔒
//! - `POST  /users/refresh-token`          — refresh 토큰으로 새 토큰 쌍 발급
//! - `PATCH /users/change-password`        — 비밀번호 변경 🔒
//! - `GET   /users/get-current-user`       — 내 정보 🔒
//! - `PATCH /users/update-account-details` — 이름/이메일 수정 🔒
//! - `PATCH /users/update-avatar`          — 아바타 교체 🔒
//! - `PATCH /users/update-cover-image`     — 커버 이미지 교체 🔒
//! - `GET   /users/get-channel-profile/{username}` — 채널 프로필 🔒
//! - `GET   /users/get-watch-history`      — 시청 기록 🔒
//!
//! 🔒 표시는 `AuthUser` 추출기를 매개변수로 받는 엔드포인트입니다.

use axum::{
    body::Bytes,
    extract::{Path, State},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    db,
    error::AppError,
    extract::ApiJson,
    middleware::auth::{
        clear_token_cookies, create_access_token, create_refresh_token, hash_password,
        hash_token, set_token_cookies, verify_password, verify_token, AuthUser, REFRESH_COOKIE,
    },
    models::*,
    response::{ApiResponse, Empty},
    routes::AppState,
    services::{form::MultipartForm, media::MediaKind},
};

/// 아주 느슨한 이메일 형식 검사: `@` 앞뒤에 글자가 있어야 합니다.
fn is_valid_email(email: &str) -> bool {
    matches!(email.split_once('@'), Some((local, domain)) if !local.is_empty() && !domain.is_empty())
}

/// 새 토큰 쌍을 발급하고, refresh 토큰 해시를 사용자 행에 저장합니다 (회전).
async fn issue_tokens(state: &AppState, user: &User) -> Result<TokenPair, AppError> {
    let access_token = create_access_token(user, &state.auth)?;
    let refresh_token = create_refresh_token(&user.id, &state.auth)?;

    db::users::set_refresh_token_hash(&state.pool, &user.id, Some(&hash_token(&refresh_token)))
        .await?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// `POST /users/register`
///
/// 텍스트 필드: username, email, fullName, password
/// 파일 필드: avatar (필수), coverImage (선택)
pub async fn register(
    State(state): State<AppState>,
    mut form: MultipartForm,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let fields = ["username", "email", "fullName", "password"].map(|name| form.text(name));
    let [Some(username), Some(email), Some(full_name), Some(password)] = fields else {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    };
    let (username, email, full_name, password) = (
        username.to_lowercase(),
        email.to_lowercase(),
        full_name.to_string(),
        password.to_string(),
    );

    if !is_valid_email(&email) {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if db::users::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Conflict("User with this email already exists".to_string()));
    }
    if db::users::find_by_username(&state.pool, &username).await?.is_some() {
        return Err(AppError::Conflict("Username is already taken".to_string()));
    }

    let avatar_file = form
        .take_file("avatar")
        .ok_or_else(|| AppError::BadRequest("Avatar file is required".to_string()))?;
    let avatar = state.media.store(MediaKind::Avatar, &avatar_file).await?;

    let cover_image = match form.take_file("coverImage") {
        Some(file) => match state.media.store(MediaKind::CoverImage, &file).await {
            Ok(stored) => Some(stored),
            Err(e) => {
                state.media.remove(&avatar.url).await;
                return Err(e);
            }
        },
        None => None,
    };

    let new_user = NewUser {
        username,
        email,
        full_name,
        password_hash: hash_password(&password)?,
        avatar: avatar.url.clone(),
        cover_image: cover_image.as_ref().map(|stored| stored.url.clone()),
    };

    let user_id = uuid::Uuid::now_v7().to_string();
    let user = match db::users::create(&state.pool, &user_id, &new_user).await {
        Ok(user) => user,
        Err(e) => {
            // 가입이 실패하면 방금 올린 파일도 남기지 않습니다.
            state.media.remove(&avatar.url).await;
            if let Some(cover) = &cover_image {
                state.media.remove(&cover.url).await;
            }
            return Err(e);
        }
    };

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");
    Ok(ApiResponse::created(user.into(), "User registered successfully"))
}

/// `POST /users/login`: 사용자명 또는 이메일 + 비밀번호
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<LoginResponse>), AppError> {
    let username = req.username.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let email = req.email.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let user = match (username, email) {
        (Some(username), _) => db::users::find_by_username(&state.pool, username).await?,
        (None, Some(email)) => db::users::find_by_email(&state.pool, email).await?,
        (None, None) => {
            return Err(AppError::BadRequest("Username or email is required".to_string()))
        }
    };

    let password = req
        .password
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Password is required".to_string()))?;

    let user = user.ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid user credentials".to_string()));
    }

    let tokens = issue_tokens(&state, &user).await?;
    let jar = set_token_cookies(jar, &tokens.access_token, &tokens.refresh_token, &state.auth);

    tracing::info!(user_id = %user.id, "User logged in");
    Ok((
        jar,
        ApiResponse::ok(
            LoginResponse {
                user: user.into(),
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            },
            "User logged in successfully",
        ),
    ))
}

/// `POST /users/logout`: 저장된 refresh 토큰 해시를 지우고 쿠키를 만료시킵니다.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, ApiResponse<Empty>), AppError> {
    db::users::set_refresh_token_hash(&state.pool, auth.id(), None).await?;

    tracing::info!(user_id = %auth.id(), "User logged out");
    Ok((
        clear_token_cookies(jar, &state.auth),
        ApiResponse::ok(Empty::default(), "User logged out successfully"),
    ))
}

/// `POST /users/refresh-token`
///
/// refresh 토큰은 `refreshToken` 쿠키에서 먼저 찾고, 없으면 JSON 본문
/// `{ "refreshToken": "..." }`에서 찾습니다. 본문은 비어 있어도 됩니다.
///
/// 토큰 서명이 맞더라도 사용자 행에 저장된 해시와 다르면 (이미 회전되었거나
/// 로그아웃한 토큰) 거절합니다. 그래서 refresh 토큰은 한 번만 쓸 수 있습니다.
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, ApiResponse<TokenPair>), AppError> {
    // 쿠키가 없고 본문도 읽을 수 없으면 토큰이 없는 것과 같습니다.
    let incoming = match jar.get(REFRESH_COOKIE) {
        Some(cookie) => Some(cookie.value().to_string()),
        None => serde_json::from_slice::<RefreshRequest>(&body)
            .ok()
            .and_then(|req| req.refresh_token),
    };
    let incoming = incoming
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Refresh token is required".to_string()))?;

    let claims = verify_token(&incoming, &state.auth.refresh_token_secret)
        .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    let user = db::users::find_by_id(&state.pool, &claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    if user.refresh_token_hash.as_deref() != Some(hash_token(&incoming).as_str()) {
        return Err(AppError::Unauthorized(
            "Refresh token is expired or used".to_string(),
        ));
    }

    let tokens = issue_tokens(&state, &user).await?;
    let jar = set_token_cookies(jar, &tokens.access_token, &tokens.refresh_token, &state.auth);

    tracing::info!(user_id = %user.id, "Access token refreshed");
    Ok((jar, ApiResponse::ok(tokens, "Access token refreshed")))
}

/// `PATCH /users/change-password`
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> Result<ApiResponse<Empty>, AppError> {
    let (Some(old_password), Some(new_password)) = (
        req.old_password.as_deref().filter(|s| !s.is_empty()),
        req.new_password.as_deref().filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "Old password and new password are required".to_string(),
        ));
    };

    if req.confirmed_password.as_deref() != Some(new_password) {
        return Err(AppError::BadRequest(
            "New password and confirmed password do not match".to_string(),
        ));
    }

    if !verify_password(old_password, &auth.user.password_hash)? {
        return Err(AppError::BadRequest("Invalid old password".to_string()));
    }

    db::users::update_password(&state.pool, auth.id(), &hash_password(new_password)?).await?;

    tracing::info!(user_id = %auth.id(), "Password changed");
    Ok(ApiResponse::ok(Empty::default(), "Password changed successfully"))
}

/// `GET /users/get-current-user`
pub async fn get_current_user(auth: AuthUser) -> ApiResponse<UserResponse> {
    ApiResponse::ok(auth.user.into(), "Current user fetched successfully")
}

/// `PATCH /users/update-account-details`: fullName, email 중 하나 이상
pub async fn update_account_details(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<UpdateAccountRequest>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let full_name = req.full_name.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let email = req
        .email
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    if full_name.is_none() && email.is_none() {
        return Err(AppError::BadRequest(
            "Full name or email is required".to_string(),
        ));
    }

    if let Some(email) = &email {
        if !is_valid_email(email) {
            return Err(AppError::BadRequest("Invalid email address".to_string()));
        }
        if let Some(other) = db::users::find_by_email(&state.pool, email).await? {
            if other.id != auth.user.id {
                return Err(AppError::Conflict("Email is already in use".to_string()));
            }
        }
    }

    let user = db::users::update_account(&state.pool, auth.id(), full_name, email.as_deref()).await?;

    tracing::info!(user_id = %user.id, "Account details updated");
    Ok(ApiResponse::ok(user.into(), "Account details updated successfully"))
}

/// `PATCH /users/update-avatar`: 파일 필드 `avatar`
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let file = form
        .take_file("avatar")
        .ok_or_else(|| AppError::BadRequest("Avatar file is missing".to_string()))?;

    let stored = state.media.store(MediaKind::Avatar, &file).await?;
    let user = db::users::update_avatar(&state.pool, auth.id(), &stored.url).await?;

    // 새 URL이 저장된 뒤에 이전 파일을 지웁니다.
    state.media.remove(&auth.user.avatar).await;

    tracing::info!(user_id = %user.id, "Avatar updated");
    Ok(ApiResponse::ok(user.into(), "Avatar updated successfully"))
}

/// `PATCH /users/update-cover-image`: 파일 필드 `coverImage`
pub async fn update_cover_image(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let file = form
        .take_file("coverImage")
        .ok_or_else(|| AppError::BadRequest("Cover image file is missing".to_string()))?;

    let stored = state.media.store(MediaKind::CoverImage, &file).await?;
    let user = db::users::update_cover_image(&state.pool, auth.id(), &stored.url).await?;

    if let Some(old) = &auth.user.cover_image {
        state.media.remove(old).await;
    }

    tracing::info!(user_id = %user.id, "Cover image updated");
    Ok(ApiResponse::ok(user.into(), "Cover image updated successfully"))
}

/// `GET /users/get-channel-profile/{username}`
pub async fn get_channel_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> Result<ApiResponse<ChannelProfile>, AppError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("Username is missing".to_string()));
    }

    let profile = db::users::channel_profile(&state.pool, username, auth.id())
        .await?
        .ok_or_else(|| AppError::NotFound("Channel does not exist".to_string()))?;

    Ok(ApiResponse::ok(profile, "Channel profile fetched successfully"))
}

/// `GET /users/get-watch-history`: 최근 시청 순
pub async fn get_watch_history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<ApiResponse<Vec<VideoCard>>, AppError> {
    let history = db::videos::watch_history(&state.pool, auth.id()).await?;
    Ok(ApiResponse::ok(history, "Watch history fetched successfully"))
}
