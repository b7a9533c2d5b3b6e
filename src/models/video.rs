//! # 영상(Video) 모델 정의
//!
//! - `Video`: `videos` 테이블 한 행
//! - `VideoCard`: 작성자 요약이 붙은 영상 (목록/상세/시청 기록 응답용)
//! - `VideoCardRow`: `VideoCard`를 만들기 위한 JOIN 결과 평탄화 행
//! - `VideoListQuery` / `SortBy` / `SortType`: 영상 목록 쿼리 파라미터

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::user::OwnerSummary;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub owner_id: String,
    /// 영상 파일 URL
    pub video_file: String,
    /// 썸네일 이미지 URL
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    /// 재생 시간 (초)
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCard {
    pub id: String,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
    pub owner: OwnerSummary,
}

/// `videos v JOIN users u` 결과 한 행.
/// 작성자 컬럼은 `owner_` 접두사로 별칭을 붙여 조회합니다.
#[derive(Debug, sqlx::FromRow)]
pub struct VideoCardRow {
    pub id: String,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: String,
    pub updated_at: String,
    pub owner_id: String,
    pub owner_username: String,
    pub owner_full_name: String,
    pub owner_avatar: String,
}

impl From<VideoCardRow> for VideoCard {
    fn from(row: VideoCardRow) -> Self {
        Self {
            id: row.id,
            video_file: row.video_file,
            thumbnail: row.thumbnail,
            title: row.title,
            description: row.description,
            duration: row.duration,
            views: row.views,
            is_published: row.is_published,
            created_at: row.created_at,
            updated_at: row.updated_at,
            owner: OwnerSummary {
                id: row.owner_id,
                username: row.owner_username,
                full_name: row.owner_full_name,
                avatar: row.owner_avatar,
            },
        }
    }
}

/// 영상 INSERT에 필요한 값들
#[derive(Debug)]
pub struct NewVideo {
    pub owner_id: String,
    pub video_file: String,
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
}

/// 영상 부분 수정: None인 필드는 그대로 둡니다
#[derive(Debug, Default)]
pub struct VideoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

impl VideoChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.thumbnail.is_none()
    }
}

/// `GET /videos` 쿼리 파라미터 (검증 전 원본 문자열)
///
/// 숫자도 문자열로 받아서 직접 파싱합니다.
/// 그래야 `page=abc` 같은 입력에도 에러 봉투로 400을 돌려줄 수 있습니다.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_type: Option<String>,
    pub user_id: Option<String>,
    pub query: Option<String>,
}

/// 영상 목록 정렬 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Title,
    Duration,
    Views,
    CreatedAt,
    OwnerUsername,
}

impl SortBy {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "title" => Ok(SortBy::Title),
            "duration" => Ok(SortBy::Duration),
            "views" => Ok(SortBy::Views),
            "createdAt" => Ok(SortBy::CreatedAt),
            "owner.username" => Ok(SortBy::OwnerUsername),
            _ => Err(AppError::BadRequest("Invalid option to sort by".to_string())),
        }
    }

    /// ORDER BY에 들어갈 컬럼 표현식 (고정 문자열이므로 SQL 인젝션 위험 없음)
    pub fn column(self) -> &'static str {
        match self {
            SortBy::Title => "v.title",
            SortBy::Duration => "v.duration",
            SortBy::Views => "v.views",
            SortBy::CreatedAt => "v.created_at",
            SortBy::OwnerUsername => "u.username",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortType {
    Ascending,
    Descending,
}

impl SortType {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "ascending" => Ok(SortType::Ascending),
            "descending" => Ok(SortType::Descending),
            _ => Err(AppError::BadRequest("Invalid type for sorting".to_string())),
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortType::Ascending => "ASC",
            SortType::Descending => "DESC",
        }
    }
}

/// 검증이 끝난 영상 목록 필터
#[derive(Debug)]
pub struct VideoFilter {
    pub owner_id: Option<String>,
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub sort_type: SortType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_accepts_known_options() {
        assert_eq!(SortBy::parse("views").unwrap(), SortBy::Views);
        assert_eq!(SortBy::parse("owner.username").unwrap().column(), "u.username");
        assert!(SortBy::parse("password").is_err());
    }

    #[test]
    fn sort_type_maps_to_sql_keyword() {
        assert_eq!(SortType::parse("ascending").unwrap().keyword(), "ASC");
        assert_eq!(SortType::parse("descending").unwrap().keyword(), "DESC");
        assert!(SortType::parse("up").is_err());
    }
}
