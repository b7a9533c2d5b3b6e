//! # 헬스체크(Health Check) 핸들러
//!
//! 서버가 정상적으로 동작하는지 확인하는 엔드포인트입니다.
//!
//! ## 엔드포인트
//! - `GET /api/v1/healthcheck` → `{ "status": 200, "data": {}, "message": "OK", "success": true }`
//!
//! 로드밸런서나 컨테이너 오케스트레이터의 상태 확인용이라 인증이 필요 없습니다.

use crate::response::{ApiResponse, Empty};

/// `GET /healthcheck`: 고정된 봉투만 반환하므로 실패하지 않습니다.
pub async fn health_check() -> ApiResponse<Empty> {
    ApiResponse::ok(Empty::default(), "OK")
}
