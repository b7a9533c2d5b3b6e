use serde::Serialize;

/// 구독 엔티티: `subscriber`가 `channel`을 구독합니다
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub subscriber_id: String,
    pub channel_id: String,
    pub created_at: String,
}

/// 구독 토글 결과
///
/// 구독을 취소했다면 `old_subscription`에 삭제된 구독이,
/// 새로 구독했다면 `new_subscription`에 생성된 구독이 들어갑니다.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionToggle {
    pub old_subscription: Option<Subscription>,
    pub new_subscription: Option<Subscription>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberSummary {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberEntry {
    pub subscriber: SubscriberSummary,
    pub subscribed_at: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct SubscriberRow {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
    pub subscribed_at: String,
}

impl From<SubscriberRow> for SubscriberEntry {
    fn from(row: SubscriberRow) -> Self {
        Self {
            subscriber: SubscriberSummary {
                id: row.id,
                username: row.username,
                full_name: row.full_name,
                avatar: row.avatar,
            },
            subscribed_at: row.subscribed_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSubscribers {
    pub subscribers: Vec<SubscriberEntry>,
    pub subscriber_count: usize,
}

/// 구독 중인 채널 요약: 채널 자체의 구독자 수 포함
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
    pub subscriber_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedChannel {
    pub channel: ChannelSummary,
    pub subscribed_at: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct SubscribedChannelRow {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
    pub subscriber_count: i64,
    pub subscribed_at: String,
}

impl From<SubscribedChannelRow> for SubscribedChannel {
    fn from(row: SubscribedChannelRow) -> Self {
        Self {
            channel: ChannelSummary {
                id: row.id,
                username: row.username,
                full_name: row.full_name,
                avatar: row.avatar,
                subscriber_count: row.subscriber_count,
            },
            subscribed_at: row.subscribed_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedChannels {
    pub channels: Vec<SubscribedChannel>,
    pub channels_count: usize,
}
