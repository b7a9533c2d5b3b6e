//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `users`: 회원가입, 로그인/로그아웃, 토큰 갱신, 계정 관리, 채널 프로필
//! - `videos`: 영상 업로드/목록/조회/수정/삭제/공개 전환
//! - `comments`: 영상 댓글
//! - `likes`: 영상/댓글/트윗 좋아요 토글
//! - `subscriptions`: 채널 구독 토글과 구독 목록
//! - `playlists`: 플레이리스트와 담긴 영상 관리
//! - `tweets`: 트윗 CRUD
//! - `dashboard`: 채널 통계와 채널 영상 목록
//!
//! 모든 라우트는 `api_router()`에서 조립되고, `lib.rs`에서 `/api/v1` 아래에 붙습니다.

use axum::{
    routing::{get, patch, post},
    Router,
};
use sqlx::SqlitePool;

use crate::config::AuthConfig;
use crate::services::media::MediaStore;

pub mod comments;
pub mod dashboard;
pub mod health;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod users;
pub mod videos;

/// 모든 핸들러가 공유하는 애플리케이션 상태
///
/// `SqlitePool`은 내부적으로 Arc라서 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth: AuthConfig,
    pub media: MediaStore,
}

impl AppState {
    pub fn new(pool: SqlitePool, auth: AuthConfig, media: MediaStore) -> Self {
        Self { pool, auth, media }
    }
}

/// `/api/v1` 아래에 붙는 전체 API 라우터
pub fn api_router() -> Router<AppState> {
    let user_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/logout", post(users::logout))
        .route("/refresh-token", post(users::refresh_token))
        .route("/change-password", patch(users::change_password))
        .route("/get-current-user", get(users::get_current_user))
        .route("/update-account-details", patch(users::update_account_details))
        .route("/update-avatar", patch(users::update_avatar))
        .route("/update-cover-image", patch(users::update_cover_image))
        .route("/get-channel-profile/{username}", get(users::get_channel_profile))
        .route("/get-watch-history", get(users::get_watch_history));

    let video_routes = Router::new()
        .route("/", get(videos::list_videos).post(videos::publish_video))
        .route(
            "/{video_id}",
            get(videos::get_video)
                .patch(videos::update_video)
                .delete(videos::delete_video),
        )
        .route("/toggle/publish/{video_id}", patch(videos::toggle_publish));

    // 같은 경로 파라미터 자리에 GET/POST는 영상 ID, PATCH/DELETE는 댓글 ID가 옵니다.
    let comment_routes = Router::new().route(
        "/{id}",
        get(comments::list_comments)
            .post(comments::add_comment)
            .patch(comments::update_comment)
            .delete(comments::delete_comment),
    );

    let like_routes = Router::new()
        .route("/v/{video_id}", patch(likes::toggle_video_like))
        .route("/c/{comment_id}", patch(likes::toggle_comment_like))
        .route("/t/{tweet_id}", patch(likes::toggle_tweet_like))
        .route("/v", get(likes::liked_videos));

    let subscription_routes = Router::new()
        .route(
            "/c/{channel_id}",
            post(subscriptions::toggle_subscription).get(subscriptions::channel_subscribers),
        )
        .route("/u/{subscriber_id}", get(subscriptions::subscribed_channels));

    let playlist_routes = Router::new()
        .route("/", post(playlists::create_playlist))
        .route("/u/{user_id}", get(playlists::user_playlists))
        .route(
            "/p/{playlist_id}",
            get(playlists::get_playlist)
                .patch(playlists::update_playlist)
                .delete(playlists::delete_playlist),
        )
        .route(
            "/v/{playlist_id}/{video_id}",
            post(playlists::add_video).delete(playlists::remove_video),
        );

    let tweet_routes = Router::new()
        .route("/", post(tweets::create_tweet))
        .route("/user/{user_id}", get(tweets::user_tweets))
        .route(
            "/{tweet_id}",
            patch(tweets::update_tweet).delete(tweets::delete_tweet),
        );

    let dashboard_routes = Router::new()
        .route("/stats", get(dashboard::channel_stats))
        .route("/videos", get(dashboard::channel_videos));

    Router::new()
        .route("/healthcheck", get(health::health_check))
        .nest("/users", user_routes)
        .nest("/videos", video_routes)
        .nest("/comments", comment_routes)
        .nest("/likes", like_routes)
        .nest("/subscriptions", subscription_routes)
        .nest("/playlists", playlist_routes)
        .nest("/tweets", tweet_routes)
        .nest("/dashboard", dashboard_routes)
}
