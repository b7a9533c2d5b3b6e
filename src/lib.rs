//! # VidTube 백엔드 라이브러리
//!
//! 서버 실행 파일(`main.rs`)과 통합 테스트(`tests/`)가 같은 라우터를
//! 조립할 수 있도록 모듈과 `build_router()`를 공개합니다.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use config::Config;
use routes::AppState;

/// 전체 애플리케이션 라우터를 만듭니다.
///
/// - `/api/v1/...`: API 라우트 (`routes::api_router`)
/// - `MEDIA_BASE_URL` (기본 `/media`, 비어 있으면 루트): 업로드된 파일 정적 서빙
/// - CORS, 요청 로깅(TraceLayer), 업로드 크기 제한 레이어
pub fn build_router(state: AppState, config: &Config) -> anyhow::Result<Router> {
    let mut app = Router::new().nest("/api/v1", routes::api_router().with_state(state));

    // 외부 CDN 주소처럼 절대 URL이면 이 서버가 서빙하지 않습니다.
    // 루트("")에는 nest할 수 없으므로 API에 걸리지 않은 경로를 모두 넘깁니다.
    let media_dir = ServeDir::new(&config.uploads_path);
    if config.media_base_url.is_empty() {
        app = app.fallback_service(media_dir);
    } else if config.media_base_url.starts_with('/') {
        app = app.nest_service(&config.media_base_url, media_dir);
    }

    Ok(app
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors_layer(config.cors_origin.as_deref())?)
        .layer(TraceLayer::new_for_http()))
}

/// CORS 설정
///
/// 쿠키 인증을 쓰려면 출처를 정확히 지정하고 credentials를 허용해야 합니다.
/// `CORS_ORIGIN`이 없으면 모든 출처를 허용하되 쿠키는 보내지 않습니다.
fn cors_layer(origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let layer = match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    Ok(layer)
}
