use serde::Serialize;

/// 트윗(짧은 글) 엔티티: `tweets` 테이블 한 행
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub id: String,
    pub content: String,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 사용자 트윗 목록용: 좋아요 수 포함
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TweetWithLikes {
    pub id: String,
    pub content: String,
    pub owner_id: String,
    pub likes_count: i64,
    pub created_at: String,
    pub updated_at: String,
}
