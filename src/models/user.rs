//! # 사용자(User) 모델 정의
//!
//! - `User`: `users` 테이블 한 행 (비밀번호 해시 포함, 응답에 직접 쓰지 않음)
//! - `UserResponse`: 클라이언트에 내보내는 사용자 정보
//! - `OwnerSummary`: 영상/댓글/플레이리스트에 붙는 작성자 요약
//! - 요청 본문 구조체들 (로그인, 토큰 갱신, 비밀번호 변경, 계정 수정)
//! - `ChannelProfile`: 채널 페이지용 집계 결과

use serde::{Deserialize, Serialize};

/// 사용자 엔티티: DB의 `users` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// 항상 소문자로 저장됩니다
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// 아바타 이미지 URL (가입 시 필수)
    pub avatar: String,
    /// 커버 이미지 URL (선택)
    pub cover_image: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// 현재 유효한 refresh 토큰의 SHA-256 해시. 로그아웃 상태면 None
    #[serde(skip_serializing)]
    pub refresh_token_hash: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            avatar: user.avatar,
            cover_image: user.cover_image,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// 다른 리소스에 붙여서 내보내는 작성자(채널) 요약 정보
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
}

/// `POST /users/register` multipart 폼의 텍스트 필드들
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub avatar: String,
    pub cover_image: Option<String>,
}

/// 로그인 요청: 사용자명 또는 이메일 중 하나와 비밀번호
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// 토큰 갱신 요청: 쿠키가 없을 때 본문으로 refresh 토큰을 보냅니다
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    pub confirmed_password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// 새로 발급된 토큰 쌍
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

/// 채널 페이지 정보: 구독자 수, 구독 중인 채널 수,
/// 그리고 조회하는 사용자가 이 채널을 구독 중인지 여부
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub subscribers_count: i64,
    pub channels_subscribed_to_count: i64,
    pub is_subscribed: bool,
}
