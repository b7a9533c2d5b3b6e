use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::*;

pub async fn find(
    pool: &SqlitePool,
    subscriber_id: &str,
    channel_id: &str,
) -> Result<Option<Subscription>, AppError> {
    let subscription = sqlx::query_as::<_, Subscription>(
        r#"
        SELECT id, subscriber_id, channel_id, created_at
        FROM subscriptions
        WHERE subscriber_id = ? AND channel_id = ?
        "#,
    )
    .bind(subscriber_id)
    .bind(channel_id)
    .fetch_optional(pool)
    .await?;

    Ok(subscription)
}

pub async fn create(
    pool: &SqlitePool,
    id: &str,
    subscriber_id: &str,
    channel_id: &str,
) -> Result<Subscription, AppError> {
    sqlx::query("INSERT INTO subscriptions (id, subscriber_id, channel_id) VALUES (?, ?, ?)")
        .bind(id)
        .bind(subscriber_id)
        .bind(channel_id)
        .execute(pool)
        .await?;

    find(pool, subscriber_id, channel_id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created subscription".to_string()))
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM subscriptions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// 채널의 구독자 목록 (최근 구독 순)
pub async fn subscribers(pool: &SqlitePool, channel_id: &str) -> Result<Vec<SubscriberEntry>, AppError> {
    let rows = sqlx::query_as::<_, SubscriberRow>(
        r#"
        SELECT u.id, u.username, u.full_name, u.avatar, s.created_at AS subscribed_at
        FROM subscriptions s
        JOIN users u ON u.id = s.subscriber_id
        WHERE s.channel_id = ?
        ORDER BY s.created_at DESC, s.rowid DESC
        "#,
    )
    .bind(channel_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(SubscriberEntry::from).collect())
}

/// 사용자가 구독 중인 채널 목록. 각 채널의 구독자 수도 함께 계산합니다.
pub async fn subscribed_channels(
    pool: &SqlitePool,
    subscriber_id: &str,
) -> Result<Vec<SubscribedChannel>, AppError> {
    let rows = sqlx::query_as::<_, SubscribedChannelRow>(
        r#"
        SELECT u.id, u.username, u.full_name, u.avatar,
               (SELECT COUNT(*) FROM subscriptions c WHERE c.channel_id = u.id)
                   AS subscriber_count,
               s.created_at AS subscribed_at
        FROM subscriptions s
        JOIN users u ON u.id = s.channel_id
        WHERE s.subscriber_id = ?
        ORDER BY s.created_at DESC, s.rowid DESC
        "#,
    )
    .bind(subscriber_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(SubscribedChannel::from).collect())
}
