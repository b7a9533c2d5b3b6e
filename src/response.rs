//! # 응답 봉투(Envelope)
//!
//! 모든 성공 응답은 같은 모양으로 감싸서 보냅니다:
//! ```json
//! { "status": 200, "data": { ... }, "message": "Video fetched successfully", "success": true }
//! ```
//! 에러 응답도 같은 키를 사용합니다 (`error.rs` 참고).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 성공 응답 봉투
///
/// `status`는 HTTP 상태 코드와 같은 값이 본문에도 들어갑니다.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub data: T,
    pub message: String,
}

/// 실제로 JSON으로 직렬화되는 본문
#[derive(Serialize)]
struct Envelope<'a, T> {
    status: u16,
    data: &'a T,
    message: &'a str,
    success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    /// HTTP 200 응답
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            data,
            message: message.into(),
        }
    }

    /// HTTP 201 응답 (리소스 생성)
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
            message: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = Json(Envelope {
            status: self.status.as_u16(),
            data: &self.data,
            message: &self.message,
            success: self.status.is_success(),
        });
        (self.status, body).into_response()
    }
}

/// `data`가 비어 있는 응답에 쓰는 `{}`
#[derive(Debug, Default, Serialize)]
pub struct Empty {}
