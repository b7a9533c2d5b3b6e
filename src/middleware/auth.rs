//! # 인증(Authentication) 미들웨어
//!
//! JWT 발급/검증, 비밀번호 해싱, 그리고 로그인한 사용자를 핸들러에 주입하는
//! `AuthUser` 추출기를 담당합니다.
//!
//! ## 토큰 흐름
//! ```text
//! 로그인 ─▶ access 토큰(짧은 수명) + refresh 토큰(긴 수명) 발급
//!          refresh 토큰은 SHA-256 해시만 users.refresh_token_hash에 저장
//! 요청   ─▶ accessToken 쿠키 또는 Authorization: Bearer 헤더로 access 토큰 전달
//! 갱신   ─▶ refresh 토큰 검증 + 저장된 해시와 비교 → 새 토큰 쌍 발급(회전)
//! 로그아웃 ─▶ 저장된 해시 삭제 → 기존 refresh 토큰은 더 이상 사용 불가
//! ```

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::{config::AuthConfig, db, error::AppError, models::User, routes::AppState};

/// access 토큰 쿠키 이름
pub const ACCESS_COOKIE: &str = "accessToken";
/// refresh 토큰 쿠키 이름
pub const REFRESH_COOKIE: &str = "refreshToken";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    /// 같은 초에 발급된 토큰끼리도 서로 다르도록 붙이는 고유 ID
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// 인증된 사용자: 핸들러 매개변수로 선언하면 인증이 필요한 엔드포인트가 됩니다.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.user.id
    }

    /// 리소스 소유자 확인. 다르면 401을 반환합니다.
    pub fn ensure_owner(&self, owner_id: &str, action: &str) -> Result<(), AppError> {
        if self.user.id == owner_id {
            Ok(())
        } else {
            Err(AppError::Unauthorized(format!(
                "Only the owner can {}",
                action
            )))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 쿠키가 우선이고, 없으면 Authorization 헤더를 봅니다.
        let jar = CookieJar::from_headers(&parts.headers);
        let token = match jar.get(ACCESS_COOKIE) {
            Some(cookie) => cookie.value().to_string(),
            None => parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .ok_or(AuthError::MissingToken)?
                .strip_prefix("Bearer ")
                .ok_or(AuthError::InvalidToken)?
                .trim()
                .to_string(),
        };

        let claims = verify_token(&token, &state.auth.access_token_secret)?;

        // 토큰은 유효하지만 그 사이 계정이 삭제되었을 수 있습니다.
        let user = db::users::find_by_id(&state.pool, &claims.sub)
            .await?
            .ok_or(AuthError::UnknownUser)?;

        Ok(AuthUser { user })
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization token is required")]
    MissingToken,
    #[error("Invalid authorization token")]
    InvalidToken,
    #[error("Authorization token has expired")]
    ExpiredToken,
    #[error("User for this token no longer exists")]
    UnknownUser,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Unauthorized(err.to_string())
    }
}

fn sign(claims: &Claims, secret: &str) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

pub fn create_access_token(user: &User, config: &AuthConfig) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.clone(),
        jti: uuid::Uuid::now_v7().to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(config.access_token_ttl_minutes)).timestamp(),
        username: Some(user.username.clone()),
        email: Some(user.email.clone()),
    };

    sign(&claims, &config.access_token_secret)
}

pub fn create_refresh_token(user_id: &str, config: &AuthConfig) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        jti: uuid::Uuid::now_v7().to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::days(config.refresh_token_ttl_days)).timestamp(),
        username: None,
        email: None,
    };

    sign(&claims, &config.refresh_token_secret)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Argon2id로 비밀번호를 해싱합니다.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// 저장된 해시와 비밀번호를 비교합니다. 해시 자체가 깨져 있으면 500입니다.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// HttpOnly 토큰 쿠키를 만듭니다.
pub fn token_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// 두 토큰 쿠키를 jar에 추가합니다.
pub fn set_token_cookies(
    jar: CookieJar,
    access_token: &str,
    refresh_token: &str,
    config: &AuthConfig,
) -> CookieJar {
    jar.add(token_cookie(
        ACCESS_COOKIE,
        access_token.to_string(),
        config.cookie_secure,
    ))
    .add(token_cookie(
        REFRESH_COOKIE,
        refresh_token.to_string(),
        config.cookie_secure,
    ))
}

/// 두 토큰 쿠키를 만료시킵니다.
///
/// `jar.remove()`는 요청에 그 쿠키가 실려 왔을 때만 삭제 헤더를 내보내므로,
/// 헤더 인증으로 로그아웃해도 지워지도록 만료된 쿠키를 직접 추가합니다.
pub fn clear_token_cookies(jar: CookieJar, config: &AuthConfig) -> CookieJar {
    let expired = |name: &'static str| {
        let mut cookie = token_cookie(name, String::new(), config.cookie_secure);
        cookie.make_removal();
        cookie
    };

    jar.add(expired(ACCESS_COOKIE)).add(expired(REFRESH_COOKIE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            access_token_secret: "access-secret".to_string(),
            access_token_ttl_minutes: 15,
            refresh_token_secret: "refresh-secret".to_string(),
            refresh_token_ttl_days: 10,
            cookie_secure: true,
        }
    }

    fn user() -> User {
        User {
            id: uuid::Uuid::now_v7().to_string(),
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            full_name: "Ana".to_string(),
            avatar: "/media/avatars/a.png".to_string(),
            cover_image: None,
            password_hash: String::new(),
            refresh_token_hash: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn access_token_carries_user_identity() {
        let config = config();
        let user = user();
        let token = create_access_token(&user, &config).unwrap();
        let claims = verify_token(&token, &config.access_token_secret).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username.as_deref(), Some("ana"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_token_is_not_valid_as_access_token() {
        let config = config();
        let token = create_refresh_token("someone", &config).unwrap();

        assert!(verify_token(&token, &config.refresh_token_secret).is_ok());
        assert!(matches!(
            verify_token(&token, &config.access_token_secret),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn consecutive_refresh_tokens_differ() {
        let config = config();
        let a = create_refresh_token("someone", &config).unwrap();
        let b = create_refresh_token("someone", &config).unwrap();
        assert_ne!(hash_token(&a), hash_token(&b));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let config = AuthConfig {
            access_token_ttl_minutes: -10,
            ..config()
        };
        let token = create_access_token(&user(), &config).unwrap();

        assert!(matches!(
            verify_token(&token, &config.access_token_secret),
            Err(AuthError::ExpiredToken)
        ));
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }
}
