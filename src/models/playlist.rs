//! # 플레이리스트 모델 정의
//!
//! 플레이리스트와 영상의 관계는 `playlist_videos` 연결 테이블에 저장되고,
//! 응답에서는 두 가지 모양으로 내보냅니다:
//! - `PlaylistResponse`: 영상 ID 목록만 포함 (생성/수정/사용자별 목록)
//! - `PlaylistDetail`: 영상 카드와 작성자 정보 포함 (단건 조회)

use serde::{Deserialize, Serialize};

use crate::models::user::OwnerSummary;
use crate::models::video::VideoCard;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResponse {
    #[serde(flatten)]
    pub playlist: Playlist,
    /// 추가된 순서대로 정렬된 영상 ID
    pub videos: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDetail {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
    pub owner: OwnerSummary,
    pub total_videos: usize,
    pub total_duration: f64,
    pub videos: Vec<VideoCard>,
}

/// 플레이리스트 생성/수정 요청: 이름과 설명 모두 필수
#[derive(Debug, Deserialize)]
pub struct PlaylistRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl PlaylistRequest {
    /// 공백을 제거한 (이름, 설명). 둘 중 하나라도 비어 있으면 None
    pub fn fields(&self) -> Option<(&str, &str)> {
        let name = self.name.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        Some((name, description))
    }
}
