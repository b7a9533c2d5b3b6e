use serde::{Deserialize, Serialize};

/// 대시보드 쿼리: `channelId`가 없으면 로그인한 사용자의 채널
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelQuery {
    pub channel_id: Option<String>,
}

/// 채널 통계
///
/// `total_likes`는 영상·댓글·트윗 좋아요의 합입니다.
/// 댓글/트윗 수치는 이 채널(사용자)이 작성한 것을 기준으로 셉니다.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub total_videos: i64,
    pub total_views: i64,
    pub total_subscribers: i64,
    pub video_likes: i64,
    pub total_comments: i64,
    pub comment_likes: i64,
    pub total_tweets: i64,
    pub tweet_likes: i64,
    pub total_likes: i64,
}
