//! # 구독(Subscription) 핸들러
//!
//! - `POST /subscriptions/c/{channelId}`    — 구독 토글
//! - `GET  /subscriptions/c/{channelId}`    — 채널의 구독자 목록
//! - `GET  /subscriptions/u/{subscriberId}` — 사용자가 구독 중인 채널 목록

use axum::extract::{Path, State};

use crate::{
    db,
    error::AppError,
    extract::parse_id,
    middleware::auth::AuthUser,
    models::*,
    response::ApiResponse,
    routes::AppState,
};

/// 채널(사용자)이 존재하는지 확인합니다.
async fn ensure_user_exists(state: &AppState, user_id: &str, what: &str) -> Result<(), AppError> {
    db::users::find_by_id(&state.pool, user_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(what))
}

/// 구독 중이면 취소하고(`oldSubscription`), 아니면 구독합니다(`newSubscription`).
/// 자기 자신의 채널은 구독할 수 없습니다.
pub async fn toggle_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> Result<ApiResponse<SubscriptionToggle>, AppError> {
    let channel_id = parse_id(&channel_id, "channel")?;
    ensure_user_exists(&state, &channel_id, "Channel").await?;

    if channel_id == auth.user.id {
        return Err(AppError::BadRequest(
            "You cannot subscribe to your own channel".to_string(),
        ));
    }

    match db::subscriptions::find(&state.pool, auth.id(), &channel_id).await? {
        Some(existing) => {
            db::subscriptions::delete(&state.pool, &existing.id).await?;
            tracing::info!(subscriber_id = %auth.id(), %channel_id, "Unsubscribed");
            Ok(ApiResponse::ok(
                SubscriptionToggle {
                    old_subscription: Some(existing),
                    new_subscription: None,
                },
                "Unsubscribed successfully",
            ))
        }
        None => {
            let id = uuid::Uuid::now_v7().to_string();
            let created = db::subscriptions::create(&state.pool, &id, auth.id(), &channel_id).await?;
            tracing::info!(subscriber_id = %auth.id(), %channel_id, "Subscribed");
            Ok(ApiResponse::ok(
                SubscriptionToggle {
                    old_subscription: None,
                    new_subscription: Some(created),
                },
                "Subscribed successfully",
            ))
        }
    }
}

pub async fn channel_subscribers(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(channel_id): Path<String>,
) -> Result<ApiResponse<ChannelSubscribers>, AppError> {
    let channel_id = parse_id(&channel_id, "channel")?;
    ensure_user_exists(&state, &channel_id, "Channel").await?;

    let subscribers = db::subscriptions::subscribers(&state.pool, &channel_id).await?;
    let subscriber_count = subscribers.len();

    Ok(ApiResponse::ok(
        ChannelSubscribers {
            subscribers,
            subscriber_count,
        },
        "Subscribers fetched successfully",
    ))
}

pub async fn subscribed_channels(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(subscriber_id): Path<String>,
) -> Result<ApiResponse<SubscribedChannels>, AppError> {
    let subscriber_id = parse_id(&subscriber_id, "subscriber")?;
    ensure_user_exists(&state, &subscriber_id, "User").await?;

    let channels = db::subscriptions::subscribed_channels(&state.pool, &subscriber_id).await?;
    let channels_count = channels.len();

    Ok(ApiResponse::ok(
        SubscribedChannels {
            channels,
            channels_count,
        },
        "Subscribed channels fetched successfully",
    ))
}
