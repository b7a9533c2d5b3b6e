//! # 대시보드 통계 쿼리
//!
//! 채널 하나의 통계를 스칼라 서브쿼리로 한 번에 계산합니다.
//!
//! ```text
//! total_videos / total_views      ← videos (owner_id = 채널)
//! total_subscribers               ← subscriptions (channel_id = 채널)
//! video_likes                     ← 채널 영상에 달린 좋아요
//! total_comments / comment_likes  ← 채널이 작성한 댓글과 그 좋아요
//! total_tweets / tweet_likes      ← 채널이 작성한 트윗과 그 좋아요
//! total_likes = video_likes + comment_likes + tweet_likes
//! ```

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::ChannelStats;

pub async fn channel_stats(pool: &SqlitePool, channel_id: &str) -> Result<Option<ChannelStats>, AppError> {
    let stats = sqlx::query_as::<_, ChannelStats>(
        r#"
        SELECT id, username, full_name, avatar, cover_image,
               total_videos, total_views, total_subscribers,
               video_likes, total_comments, comment_likes, total_tweets, tweet_likes,
               video_likes + comment_likes + tweet_likes AS total_likes
        FROM (
            SELECT u.id, u.username, u.full_name, u.avatar, u.cover_image,
                   (SELECT COUNT(*) FROM videos v WHERE v.owner_id = u.id) AS total_videos,
                   (SELECT COALESCE(SUM(v.views), 0) FROM videos v WHERE v.owner_id = u.id)
                       AS total_views,
                   (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id)
                       AS total_subscribers,
                   (SELECT COUNT(*) FROM likes l JOIN videos v ON v.id = l.video_id
                    WHERE v.owner_id = u.id) AS video_likes,
                   (SELECT COUNT(*) FROM comments c WHERE c.owner_id = u.id) AS total_comments,
                   (SELECT COUNT(*) FROM likes l JOIN comments c ON c.id = l.comment_id
                    WHERE c.owner_id = u.id) AS comment_likes,
                   (SELECT COUNT(*) FROM tweets t WHERE t.owner_id = u.id) AS total_tweets,
                   (SELECT COUNT(*) FROM likes l JOIN tweets t ON t.id = l.tweet_id
                    WHERE t.owner_id = u.id) AS tweet_likes
            FROM users u
            WHERE u.id = ?
        )
        "#,
    )
    .bind(channel_id)
    .fetch_optional(pool)
    .await?;

    Ok(stats)
}
