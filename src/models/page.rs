//! # 페이지네이션
//!
//! 목록 응답을 페이지 단위로 감싸는 `Page<T>`와,
//! 쿼리 문자열의 `page`/`limit` 값을 검증하는 `PageParams`를 정의합니다.
//!
//! 응답 예시 (`page=2&limit=10`, 전체 25개):
//! ```json
//! { "docs": [...], "totalDocs": 25, "limit": 10, "page": 2, "totalPages": 3,
//!   "pagingCounter": 11, "hasPrevPage": true, "hasNextPage": true,
//!   "prevPage": 1, "nextPage": 3 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
/// 한 페이지에 담을 수 있는 최대 항목 수. 더 큰 값은 이 값으로 줄입니다.
pub const MAX_LIMIT: i64 = 100;

/// 검증된 페이지 번호와 페이지 크기
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    /// 쿼리 문자열 원본 값에서 페이지 파라미터를 만듭니다.
    ///
    /// 값이 없으면 기본값(1, 10)을 쓰고,
    /// 양의 정수가 아니면 400 에러를 반환합니다.
    /// `limit`은 `MAX_LIMIT`을 넘지 않습니다.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, AppError> {
        Ok(Self {
            page: positive_or(page, DEFAULT_PAGE)?,
            limit: positive_or(limit, DEFAULT_LIMIT)?.min(MAX_LIMIT),
        })
    }

    /// SQL OFFSET 값. 아주 큰 페이지 번호는 i64::MAX에서 멈춥니다.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn positive_or(raw: Option<&str>, default: i64) -> Result<i64, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => s.parse::<i64>().ok().filter(|n| *n > 0).ok_or_else(|| {
            AppError::BadRequest("Page and limit both have to be positive integers".to_string())
        }),
    }
}

/// `page`/`limit`만 받는 목록 쿼리 (댓글 목록 등)
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub docs: Vec<T>,
    pub total_docs: i64,
    pub limit: i64,
    pub page: i64,
    pub total_pages: i64,
    /// 이 페이지 첫 항목의 전체 순번 (1부터 시작)
    pub paging_counter: i64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<i64>,
    pub next_page: Option<i64>,
}

impl<T> Page<T> {
    pub fn new(docs: Vec<T>, total_docs: i64, params: PageParams) -> Self {
        let PageParams { page, limit } = params;
        // 결과가 0개여도 페이지 수는 최소 1입니다.
        let total_pages = (total_docs / limit + i64::from(total_docs % limit != 0)).max(1);
        let has_prev_page = page > 1;
        let has_next_page = page < total_pages;

        Self {
            docs,
            total_docs,
            limit,
            page,
            total_pages,
            paging_counter: params.offset().saturating_add(1),
            has_prev_page,
            has_next_page,
            prev_page: has_prev_page.then(|| page - 1),
            next_page: has_next_page.then(|| page + 1),
        }
    }
}
