use serde::{Deserialize, Serialize};

use crate::models::user::OwnerSummary;

/// 댓글 엔티티: `comments` 테이블 한 행
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub video_id: String,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 목록 응답용 댓글: 작성자 요약과 좋아요 수 포함
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCard {
    pub id: String,
    pub content: String,
    pub video_id: String,
    pub likes_count: i64,
    pub created_at: String,
    pub updated_at: String,
    pub owner: OwnerSummary,
}

#[derive(Debug, sqlx::FromRow)]
pub struct CommentCardRow {
    pub id: String,
    pub content: String,
    pub video_id: String,
    pub likes_count: i64,
    pub created_at: String,
    pub updated_at: String,
    pub owner_id: String,
    pub owner_username: String,
    pub owner_full_name: String,
    pub owner_avatar: String,
}

impl From<CommentCardRow> for CommentCard {
    fn from(row: CommentCardRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            video_id: row.video_id,
            likes_count: row.likes_count,
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

/// 댓글 작성/수정 요청 본문 (트윗도 같은 모양을 씁니다)
#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    pub content: Option<String>,
}

impl ContentRequest {
    /// 앞뒤 공백을 제거한 내용. 비어 있으면 None
    pub fn trimmed(&self) -> Option<&str> {
        self.content.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
