//! # 커스텀 추출기(Extractor)
//!
//! axum 기본 `Json`/`Query`는 파싱 실패 시 일반 텍스트로 응답합니다.
//! 아래 래퍼들은 거부(rejection) 타입을 `AppError`로 바꿔서
//! 파싱 실패도 에러 봉투 형태(400)로 응답하게 합니다.
//!
//! 그리고 경로 파라미터로 들어오는 ID를 DB 조회 전에 검증하는
//! `parse_id()`도 여기에 있습니다.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json`과 같지만, 실패하면 `AppError::BadRequest`를 반환합니다.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query`와 같지만, 실패하면 `AppError::BadRequest`를 반환합니다.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// 경로/쿼리로 받은 ID가 올바른 UUID 형식인지 확인합니다.
///
/// 형식이 틀린 ID는 DB까지 가지 않고 바로 400으로 거절합니다.
/// 성공하면 소문자 하이픈 형식으로 정규화된 문자열을 돌려줍니다.
///
/// ```text
/// parse_id("0190c3b2-...", "video") → Ok("0190c3b2-...")
/// parse_id("abc", "video")          → Err(BadRequest("Invalid video id"))
/// ```
pub fn parse_id(raw: &str, what: &str) -> Result<String, AppError> {
    uuid::Uuid::parse_str(raw.trim())
        .map(|id| id.hyphenated().to_string())
        .map_err(|_| AppError::BadRequest(format!("Invalid {} id", what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_and_normalizes_uuid() {
        let id = uuid::Uuid::now_v7();
        let upper = id.hyphenated().to_string().to_uppercase();
        assert_eq!(parse_id(&upper, "video").unwrap(), id.hyphenated().to_string());
    }

    #[test]
    fn parse_id_rejects_garbage() {
        let err = parse_id("not-an-id", "tweet").unwrap_err();
        assert_eq!(err.to_string(), "Invalid tweet id");
    }
}
