//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `ACCESS_TOKEN_SECRET` / `REFRESH_TOKEN_SECRET`: JWT 서명 비밀키 (필수)
//! - `ACCESS_TOKEN_EXPIRY_MINUTES` / `REFRESH_TOKEN_EXPIRY_DAYS`: 토큰 수명
//! - `COOKIE_SECURE`: 토큰 쿠키에 Secure 속성을 붙일지 여부
//! - `UPLOADS_PATH`: 업로드 파일 저장 디렉토리
//! - `MEDIA_BASE_URL`: 업로드 파일이 서빙되는 URL 접두사
//! - `CORS_ORIGIN`: 쿠키 인증을 허용할 프론트엔드 출처
//! - `MAX_UPLOAD_BYTES`: 요청 본문 최대 크기
//! - `HOST` / `PORT`: 서버 바인딩 주소

use std::env;
use std::str::FromStr;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/vidtube.db?mode=rwc")
    pub database_url: String,
    /// 토큰 발급/검증 설정
    pub auth: AuthConfig,
    /// 업로드 파일이 저장되는 디렉토리 경로
    pub uploads_path: String,
    /// 업로드 파일의 공개 URL 접두사 (기본값: "/media", 빈 문자열이면 루트)
    pub media_base_url: String,
    /// 쿠키를 포함한 요청을 허용할 출처. None이면 모든 출처 허용(쿠키 제외)
    pub cors_origin: Option<String>,
    /// 요청 본문 최대 바이트 수 (영상 업로드 때문에 넉넉하게 잡습니다)
    pub max_upload_bytes: usize,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 8000)
    pub port: u16,
}

/// JWT와 토큰 쿠키 관련 설정
///
/// access 토큰과 refresh 토큰은 서로 다른 비밀키로 서명되므로
/// 한쪽 토큰을 다른 용도로 재사용할 수 없습니다.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub access_token_secret: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_secret: String,
    pub refresh_token_ttl_days: i64,
    /// true면 쿠키에 Secure 속성을 붙입니다 (HTTPS 전용)
    pub cookie_secure: bool,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`, `ACCESS_TOKEN_SECRET`, `REFRESH_TOKEN_SECRET`은 필수이며,
    /// 없으면 에러가 발생합니다. 나머지 설정은 기본값이 있습니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            auth: AuthConfig {
                access_token_secret: env::var("ACCESS_TOKEN_SECRET")?,
                access_token_ttl_minutes: parse_or("ACCESS_TOKEN_EXPIRY_MINUTES", 15),
                refresh_token_secret: env::var("REFRESH_TOKEN_SECRET")?,
                refresh_token_ttl_days: parse_or("REFRESH_TOKEN_EXPIRY_DAYS", 10),
                cookie_secure: parse_or("COOKIE_SECURE", true),
            },
            uploads_path: env::var("UPLOADS_PATH").unwrap_or_else(|_| "data/uploads".to_string()),
            media_base_url: media_base_url(env::var("MEDIA_BASE_URL").ok()),
            // 빈 문자열은 "설정 안 함"으로 취급합니다.
            cors_origin: env::var("CORS_ORIGIN").ok().filter(|origin| !origin.is_empty()),
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", 100 * 1024 * 1024),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 8000),
        })
    }
}

/// `MEDIA_BASE_URL` 정규화
///
/// 끝의 `/`를 떼므로 `"/"`는 빈 문자열, 즉 루트 서빙이 됩니다.
/// 스킴 없는 상대 경로(`media`)에는 앞에 `/`를 붙입니다.
fn media_base_url(raw: Option<String>) -> String {
    let Some(raw) = raw else {
        return "/media".to_string();
    };
    let trimmed = raw.trim().trim_end_matches('/');

    if trimmed.is_empty() || trimmed.starts_with('/') || trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// 환경변수를 읽어 원하는 타입으로 파싱합니다.
/// 변수가 없거나 파싱에 실패하면 기본값을 사용합니다.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
