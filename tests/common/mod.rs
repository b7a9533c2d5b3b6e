//! 통합 테스트 공통 도구
//!
//! 테스트마다 인메모리 SQLite와 임시 업로드 디렉토리로 전체 라우터를 조립하고,
//! `tower::ServiceExt::oneshot`으로 요청을 하나씩 보냅니다.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tempfile::TempDir;
use tower::ServiceExt;

use vidtube::{
    config::{AuthConfig, Config},
    routes::AppState,
    services::media::MediaStore,
};

pub const PASSWORD: &str = "password123";
const BOUNDARY: &str = "vidtube-test-boundary";

/// 테스트용 PNG 바이트 (내용은 검사하지 않으므로 시그니처만)
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub media: MediaStore,
    /// drop되면 업로드 디렉토리가 지워지므로 테스트가 끝날 때까지 들고 있습니다.
    pub uploads: TempDir,
}

pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// multipart 본문의 한 부분
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn test_config(uploads_path: &str) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        auth: AuthConfig {
            access_token_secret: "test-access-secret".to_string(),
            access_token_ttl_minutes: 15,
            refresh_token_secret: "test-refresh-secret".to_string(),
            refresh_token_ttl_days: 10,
            cookie_secure: false,
        },
        uploads_path: uploads_path.to_string(),
        media_base_url: "/media".to_string(),
        cors_origin: None,
        max_upload_bytes: 10 * 1024 * 1024,
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// 기본 테스트 설정을 고친 뒤 앱을 띄웁니다.
pub async fn spawn_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    // 인메모리 DB는 연결마다 따로 생기므로 연결 하나만 계속 유지합니다.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database should open");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations should run");

    let uploads = tempfile::tempdir().expect("temp dir should be created");
    let uploads_path = uploads.path().to_string_lossy().to_string();
    let mut config = test_config(&uploads_path);
    configure(&mut config);

    let media = MediaStore::new(&uploads_path, &config.media_base_url);
    let state = AppState::new(pool.clone(), config.auth.clone(), media.clone());
    let router = vidtube::build_router(state, &config).expect("router should build");

    TestApp {
        router,
        pool,
        media,
        uploads,
    }
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn multipart_request(method: Method, uri: &str, token: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::from(body)).unwrap()
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        Response {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: &str) -> Response {
        self.send(json_request(Method::GET, uri, Some(token), None)).await
    }

    pub async fn post_json(&self, uri: &str, token: &str, body: Value) -> Response {
        self.send(json_request(Method::POST, uri, Some(token), Some(body)))
            .await
    }

    pub async fn patch_json(&self, uri: &str, token: &str, body: Value) -> Response {
        self.send(json_request(Method::PATCH, uri, Some(token), Some(body)))
            .await
    }

    pub async fn patch(&self, uri: &str, token: &str) -> Response {
        self.send(json_request(Method::PATCH, uri, Some(token), None)).await
    }

    pub async fn post(&self, uri: &str, token: &str) -> Response {
        self.send(json_request(Method::POST, uri, Some(token), None)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Response {
        self.send(json_request(Method::DELETE, uri, Some(token), None)).await
    }

    /// `{username}@example.com` / PASSWORD 로 가입합니다. 응답의 `data`(사용자)를 반환
    pub async fn register(&self, username: &str) -> Value {
        let email = format!("{username}@example.com");
        let response = self
            .send(multipart_request(
                Method::POST,
                "/api/v1/users/register",
                None,
                &[
                    Part::Text("username", username),
                    Part::Text("email", &email),
                    Part::Text("fullName", "Test User"),
                    Part::Text("password", PASSWORD),
                    Part::File("avatar", "avatar.png", PNG),
                ],
            ))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"].clone()
    }

    /// 로그인 응답의 `data` (user, accessToken, refreshToken)
    pub async fn login(&self, username: &str) -> Value {
        let response = self
            .send(json_request(
                Method::POST,
                "/api/v1/users/login",
                None,
                Some(json!({ "username": username, "password": PASSWORD })),
            ))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["data"].clone()
    }

    /// 가입 + 로그인. (사용자 ID, access 토큰)
    pub async fn sign_up(&self, username: &str) -> (String, String) {
        let user = self.register(username).await;
        let login = self.login(username).await;
        (
            user["id"].as_str().unwrap().to_string(),
            login["accessToken"].as_str().unwrap().to_string(),
        )
    }

    /// 썸네일과 가짜 MP4로 영상을 올립니다. 응답의 `data`(영상)를 반환
    pub async fn upload_video(&self, token: &str, title: &str) -> Value {
        let response = self
            .send(multipart_request(
                Method::POST,
                "/api/v1/videos",
                Some(token),
                &[
                    Part::Text("title", title),
                    Part::Text("description", "a test video"),
                    Part::Text("duration", "42"),
                    Part::File("video", "clip.mp4", b"not really an mp4"),
                    Part::File("thumbnail", "thumb.png", PNG),
                ],
            ))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"].clone()
    }
}

pub fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}
